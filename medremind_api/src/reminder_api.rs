use async_trait::async_trait;
use chrono::{DateTime, Utc};
use medremind_models::reminder::{DEFAULT_CHANNEL, Reminder, ReminderDraft, ReminderId};
use tokio::sync::RwLock;

use crate::ApiError;

/// The two calls a client makes against the reminder backend.
///
/// `create` sends exactly one request per call and carries no idempotency
/// key, so submitting the same draft twice creates it twice.
#[async_trait]
pub trait ReminderApi: Send + Sync {
    async fn create(&self, draft: &ReminderDraft) -> Result<Vec<Reminder>, ApiError>;
    async fn list(&self) -> Result<Vec<Reminder>, ApiError>;
}

struct InMemoryReminderStore {
    next_id: u64,
    reminders: Vec<Reminder>,
}

/// Stand-in for the reminder service. Fans every draft out into one row per
/// occurrence and lets the caller play the dispatcher.
pub struct InMemoryReminderApi {
    store: RwLock<InMemoryReminderStore>,
}

impl InMemoryReminderApi {
    pub fn new() -> Self {
        InMemoryReminderApi {
            store: RwLock::new(InMemoryReminderStore {
                next_id: 1,
                reminders: Vec::new(),
            }),
        }
    }

    /// Flips the sent flag. Returns `false` for unknown or already sent reminders.
    pub async fn mark_sent(&self, id: &ReminderId) -> bool {
        let mut store = self.store.write().await;
        match store
            .reminders
            .iter_mut()
            .find(|reminder| &reminder.id == id)
        {
            Some(reminder) if !reminder.sent => {
                reminder.sent = true;
                true
            }
            _ => false,
        }
    }

    /// Marks every pending reminder due at or before `now` as sent.
    pub async fn deliver_due(&self, now: DateTime<Utc>) -> Vec<ReminderId> {
        let mut store = self.store.write().await;
        let delivered: Vec<ReminderId> = store
            .reminders
            .iter_mut()
            .filter(|reminder| !reminder.sent && reminder.send_at <= now)
            .map(|reminder| {
                reminder.sent = true;
                reminder.id.clone()
            })
            .collect();

        if !delivered.is_empty() {
            log::info!("Delivered {} due reminders", delivered.len());
        }
        delivered
    }
}

impl Default for InMemoryReminderApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderApi for InMemoryReminderApi {
    async fn create(&self, draft: &ReminderDraft) -> Result<Vec<Reminder>, ApiError> {
        let mut store = self.store.write().await;
        let mut created = Vec::new();

        for send_at in draft.occurrences() {
            let reminder = Reminder {
                id: ReminderId::new(store.next_id.to_string()),
                name: draft.name().to_string(),
                phone: draft.phone().to_string(),
                medication: Some(draft.medication().to_string()),
                channel: DEFAULT_CHANNEL.to_string(),
                send_at: send_at.and_utc(),
                sent: false,
            };
            store.next_id += 1;
            store.reminders.push(reminder.clone());
            created.push(reminder);
        }

        log::info!(
            "Stored {} occurrence(s) for {}",
            created.len(),
            draft.name()
        );
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Reminder>, ApiError> {
        let store = self.store.read().await;
        Ok(store.reminders.clone())
    }
}
