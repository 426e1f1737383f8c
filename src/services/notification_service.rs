use serde_json::Value as JsonValue;
use tokio::sync::broadcast;

pub const EVENT_STARTED: &str = "ai-interview:started";
pub const EVENT_RESPONSE: &str = "ai-interview:response";
pub const EVENT_COMPLETED: &str = "ai-interview:completed";

#[derive(Debug, Clone)]
pub struct InterviewEvent {
    pub event_type: String,
    pub payload: JsonValue,
}

/// In-process push bus for live dashboards. Emission is fire-and-forget:
/// events are dropped when nobody is subscribed, and delivery carries no
/// acknowledgment.
#[derive(Clone)]
pub struct NotificationService {
    tx: broadcast::Sender<InterviewEvent>,
}

impl NotificationService {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn emit(&self, event_type: &str, payload: JsonValue) {
        let event = InterviewEvent {
            event_type: event_type.to_string(),
            payload,
        };
        tracing::debug!(event = %event.event_type, "Emitting interview event");
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InterviewEvent> {
        self.tx.subscribe()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let notifier = NotificationService::new(8);
        let mut rx = notifier.subscribe();
        notifier.emit(EVENT_STARTED, json!({"session_id": "ivw_1_abc"}));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EVENT_STARTED);
        assert_eq!(event.payload["session_id"], "ivw_1_abc");
    }

    #[test]
    fn emit_without_subscribers_is_a_no_op() {
        let notifier = NotificationService::new(8);
        notifier.emit(EVENT_COMPLETED, json!({"session_id": "ivw_1_abc"}));
    }
}
