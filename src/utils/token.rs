use chrono::Utc;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub fn random_suffix(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Session ids are a millisecond timestamp plus a random suffix. Not
/// cryptographically unique, but collisions are negligible at the expected
/// session volume.
pub fn generate_session_id() -> String {
    format!("ivw_{}_{}", Utc::now().timestamp_millis(), random_suffix(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_have_the_expected_shape() {
        let id = generate_session_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ivw");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
    }
}
