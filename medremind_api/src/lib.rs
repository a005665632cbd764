mod error;
pub mod http;
mod reminder_api;
mod sms;

pub use error::ApiError;
pub use reminder_api::{InMemoryReminderApi, ReminderApi};
pub use sms::{InMemorySmsGateway, SentSms, SmsGateway, SmsOutcome};
