//! Ephemeral user-facing messages that clear themselves

use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, task::JoinHandle};

/// How long form-level messages stay up
pub const FORM_NOTICE_TTL: Duration = Duration::from_secs(4);

/// How long per-field conflict messages stay up
pub const FIELD_NOTICE_TTL: Duration = Duration::from_secs(2);

#[derive(Default)]
struct Slot {
    message: Option<String>,
    /// Bumped on every `show`; a timer only clears the message it was started for
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// A single message slot with an auto-clear timer.
///
/// Not a queue: showing a message replaces whatever is up and cancels the
/// previous timer. Clones share the same slot.
#[derive(Clone, Default)]
pub struct Notice {
    slot: Arc<Mutex<Slot>>,
}

impl Notice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` for `ttl`. Must be called inside a tokio runtime.
    pub async fn show(&self, message: impl Into<String>, ttl: Duration) {
        let mut slot = self.slot.lock().await;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        slot.generation += 1;
        slot.message = Some(message.into());

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut slot = shared.lock().await;
            if slot.generation == generation {
                slot.message = None;
                slot.timer = None;
            }
        }));
    }

    /// The message currently shown, if any
    pub async fn message(&self) -> Option<String> {
        self.slot.lock().await.message.clone()
    }

    /// Drop the message now and cancel its timer
    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation += 1;
        slot.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn message_clears_after_its_ttl() {
        let notice = Notice::new();
        notice.show("Please fill in all fields.", FORM_NOTICE_TTL).await;

        sleep(Duration::from_millis(3_900)).await;
        assert_eq!(
            notice.message().await.as_deref(),
            Some("Please fill in all fields.")
        );

        sleep(Duration::from_millis(200)).await;
        assert_eq!(notice.message().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn new_message_replaces_old_and_its_timer() {
        let notice = Notice::new();
        notice.show("first", FORM_NOTICE_TTL).await;

        sleep(Duration::from_secs(3)).await;
        notice.show("second", FORM_NOTICE_TTL).await;
        assert_eq!(notice.message().await.as_deref(), Some("second"));

        // Past the first message's deadline, before the second's.
        sleep(Duration::from_secs(2)).await;
        assert_eq!(notice.message().await.as_deref(), Some("second"));

        sleep(Duration::from_millis(2_100)).await;
        assert_eq!(notice.message().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_timer() {
        let notice = Notice::new();
        notice.show("gone", FIELD_NOTICE_TTL).await;
        notice.clear().await;
        assert_eq!(notice.message().await, None);

        notice.show("kept", FORM_NOTICE_TTL).await;
        sleep(FIELD_NOTICE_TTL + Duration::from_millis(100)).await;
        assert_eq!(notice.message().await.as_deref(), Some("kept"));
    }
}
