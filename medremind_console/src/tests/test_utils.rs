use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use medremind_api::{ApiError, ReminderApi, SmsGateway, SmsOutcome};
use medremind_models::reminder::{Reminder, ReminderDraft, ReminderId};

use crate::form::FormFields;

pub struct RecordingReminderApi {
    created: Mutex<Vec<ReminderDraft>>,
    reminders: Vec<Reminder>,
    list_calls: AtomicUsize,
    fail: bool,
}

impl RecordingReminderApi {
    pub fn new() -> Self {
        Self::with_reminders(Vec::new())
    }

    pub fn with_reminders(reminders: Vec<Reminder>) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            reminders,
            list_calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn created_drafts(&self) -> Vec<ReminderDraft> {
        self.created.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }

    fn server_error() -> ApiError {
        ApiError::Server {
            status: 500,
            body: r#"{"error":"database unavailable"}"#.to_string(),
        }
    }
}

#[async_trait]
impl ReminderApi for RecordingReminderApi {
    async fn create(&self, draft: &ReminderDraft) -> Result<Vec<Reminder>, ApiError> {
        self.created.lock().unwrap().push(draft.clone());
        if self.fail {
            return Err(Self::server_error());
        }
        Ok(Vec::new())
    }

    async fn list(&self) -> Result<Vec<Reminder>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(Self::server_error());
        }
        Ok(self.reminders.clone())
    }
}

pub struct RecordingSmsGateway {
    sent: Mutex<Vec<(String, String, Option<String>)>>,
    outcome: SmsOutcome,
}

impl RecordingSmsGateway {
    pub fn new(outcome: SmsOutcome) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            outcome,
        }
    }

    pub fn sent(&self) -> Vec<(String, String, Option<String>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsGateway for RecordingSmsGateway {
    async fn send_sms(&self, to: &str, message: &str, name: Option<&str>) -> SmsOutcome {
        self.sent.lock().unwrap().push((
            to.to_string(),
            message.to_string(),
            name.map(str::to_string),
        ));
        self.outcome.clone()
    }
}

pub fn reminder(id: &str, sent: bool) -> Reminder {
    Reminder {
        id: ReminderId::new(id),
        name: "Jane Doe".to_string(),
        phone: "0712345678".to_string(),
        medication: Some("Take 1 tablet of Paracetamol".to_string()),
        channel: "medication".to_string(),
        send_at: Utc.with_ymd_and_hms(2025, 5, 31, 8, 30, 0).unwrap(),
        sent,
    }
}

pub fn filled_fields() -> FormFields {
    FormFields {
        name: "Jane Doe".to_string(),
        phone: "0712345678".to_string(),
        medication: "Take 1 tablet of Paracetamol".to_string(),
        send_at: "2025-05-31T08:30".to_string(),
        repeat_days: "5".to_string(),
    }
}
