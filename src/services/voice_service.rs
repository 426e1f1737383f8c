use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, Rng, SeedableRng};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::question::QuestionType;
use crate::models::session::InterviewerReply;

/// Produces the interviewer's spoken reaction on the voice-augmented route:
/// a canned follow-up prompt matching the question type, optionally turned
/// into audio by the external synthesis service. Synthesis is best-effort;
/// any failure degrades to `audio_url: None` and never blocks the session.
#[derive(Clone)]
pub struct VoiceService {
    client: Client,
    api_url: Option<String>,
    api_key: Option<String>,
    rng: Arc<Mutex<StdRng>>,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    rate: f32,
    pitch: f32,
    emotion: &'a str,
}

#[derive(Debug, Deserialize)]
struct SynthesisResponse {
    audio_url: String,
}

const TECHNICAL_FOLLOW_UPS: &[&str] = &[
    "Interesting. Could you go one level deeper on the technical side?",
    "Thanks. How would that approach hold up at ten times the load?",
    "Got it. What trade-offs did you have to accept there?",
];

const HR_FOLLOW_UPS: &[&str] = &[
    "Thank you for sharing that. What did that experience teach you?",
    "I see. How did the people around you react?",
    "Understood. Would you make the same choice again?",
];

const APTITUDE_FOLLOW_UPS: &[&str] = &[
    "Noted. Can you explain your reasoning step by step?",
    "Alright. How confident are you in that answer?",
];

const SCENARIO_FOLLOW_UPS: &[&str] = &[
    "That makes sense. What would you do if that first step failed?",
    "Okay. Who else would you involve in that situation?",
    "Fair. How would you communicate that to the wider team?",
];

impl VoiceService {
    pub fn new(
        api_url: Option<String>,
        api_key: Option<String>,
        client: Client,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            client,
            api_url,
            api_key,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Picks a canned follow-up for the given question type. Selection is
    /// deterministic when the service was built with a seed.
    pub fn pick_follow_up(&self, question_type: QuestionType) -> String {
        let bank = match question_type {
            QuestionType::Technical => TECHNICAL_FOLLOW_UPS,
            QuestionType::Hr => HR_FOLLOW_UPS,
            QuestionType::Aptitude => APTITUDE_FOLLOW_UPS,
            QuestionType::Scenario => SCENARIO_FOLLOW_UPS,
        };
        let idx = {
            let mut rng = self.rng.lock().expect("follow-up rng mutex poisoned");
            rng.gen_range(0..bank.len())
        };
        bank[idx].to_string()
    }

    pub async fn interviewer_reply(
        &self,
        question_type: QuestionType,
        voice_id: &str,
    ) -> InterviewerReply {
        let text = self.pick_follow_up(question_type);
        let audio_url = self.synthesize(&text, voice_id).await;
        InterviewerReply { text, audio_url }
    }

    /// Requests synthesized speech from the external voice API. Returns
    /// `None` when the service is not configured or the call fails.
    pub async fn synthesize(&self, text: &str, voice_id: &str) -> Option<String> {
        let api_url = self.api_url.as_ref()?;

        let request = SynthesisRequest {
            text,
            voice_id,
            rate: 1.0,
            pitch: 1.0,
            emotion: "neutral",
        };
        let mut builder = self.client.post(api_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        match builder.send().await {
            Ok(resp) if resp.status().is_success() => {
                match resp.json::<SynthesisResponse>().await {
                    Ok(body) => Some(body.audio_url),
                    Err(e) => {
                        tracing::warn!(error = ?e, "Voice synthesis returned an unreadable body");
                        None
                    }
                }
            }
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "Voice synthesis request rejected");
                None
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Voice synthesis request failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> VoiceService {
        VoiceService::new(None, None, Client::new(), Some(seed))
    }

    #[test]
    fn follow_up_selection_is_deterministic_with_a_seed() {
        let a = seeded(7);
        let b = seeded(7);
        for _ in 0..10 {
            assert_eq!(
                a.pick_follow_up(QuestionType::Technical),
                b.pick_follow_up(QuestionType::Technical)
            );
        }
    }

    #[test]
    fn follow_up_matches_question_type() {
        let svc = seeded(1);
        let text = svc.pick_follow_up(QuestionType::Hr);
        assert!(HR_FOLLOW_UPS.contains(&text.as_str()));
    }

    #[tokio::test]
    async fn unconfigured_synthesis_degrades_to_none() {
        let svc = seeded(1);
        let reply = svc.interviewer_reply(QuestionType::Scenario, "voice-1").await;
        assert!(reply.audio_url.is_none());
        assert!(!reply.text.is_empty());
    }
}
