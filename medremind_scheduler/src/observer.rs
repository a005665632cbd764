use async_trait::async_trait;
use medremind_models::reminder::Reminder;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StatusEvent {
    /// First time the reminder shows up in a listing.
    Discovered(Reminder),
    /// The server flipped the sent flag. Reported once per reminder.
    Delivered(Reminder),
}

impl StatusEvent {
    pub fn reminder(&self) -> &Reminder {
        match self {
            StatusEvent::Discovered(reminder) | StatusEvent::Delivered(reminder) => reminder,
        }
    }
}

#[async_trait]
pub trait StatusObserver: Send + Sync + 'static {
    async fn on_status_event(&self, event: &StatusEvent);
}
