use chrono::{DateTime, Utc};
use medremind_models::reminder::{DEFAULT_CHANNEL, Reminder, ReminderDraft, ReminderId, SendAt};
use serde::{Deserialize, Serialize};

use crate::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReminderDraftBody<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub medication: &'a str,
    pub send_at: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_days: Option<u32>,
}

impl<'a> From<&'a ReminderDraft> for ReminderDraftBody<'a> {
    fn from(value: &'a ReminderDraft) -> Self {
        Self {
            name: value.name(),
            phone: value.phone(),
            medication: value.medication(),
            send_at: value.send_at().entered(),
            repeat_days: value.repeat_days().map(|days| days.get()),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(super) enum RecordId {
    Text(String),
    Number(i64),
}

impl From<RecordId> for ReminderId {
    fn from(value: RecordId) -> Self {
        match value {
            RecordId::Text(text) => ReminderId::new(text),
            RecordId::Number(number) => ReminderId::new(number.to_string()),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReminderRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub medication: Option<String>,
    #[serde(rename = "type", default)]
    pub channel: Option<String>,
    pub send_at: String,
    #[serde(default)]
    pub sent: bool,
}

impl TryFrom<ReminderRecord> for Reminder {
    type Error = ApiError;

    fn try_from(value: ReminderRecord) -> Result<Self, Self::Error> {
        let send_at = parse_send_time(&value.send_at).ok_or_else(|| {
            ApiError::Decode(format!("invalid sendAt \"{}\"", value.send_at))
        })?;

        Ok(Self {
            id: value.id.into(),
            name: value.name,
            phone: value.phone,
            medication: value.medication,
            channel: value.channel.unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            send_at,
            sent: value.sent,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedReminders {
    Many(Vec<ReminderRecord>),
    One(ReminderRecord),
}

/// Server timestamps come back either zoned (RFC 3339) or as the naive
/// wall-clock string that was submitted. Naive ones are taken as UTC.
pub(super) fn parse_send_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        return Some(zoned.with_timezone(&Utc));
    }

    value
        .parse::<SendAt>()
        .ok()
        .map(|send_at| send_at.into_datetime().and_utc())
}

/// A successful create already means the reminder is persisted, so a body that
/// carries no usable records is not an error.
pub(super) fn decode_created(body: &str) -> Vec<Reminder> {
    let records = match serde_json::from_str::<CreatedReminders>(body) {
        Ok(CreatedReminders::Many(records)) => records,
        Ok(CreatedReminders::One(record)) => vec![record],
        Err(_) => {
            log::debug!("Create response carried no reminder records");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| match Reminder::try_from(record) {
            Ok(reminder) => Some(reminder),
            Err(error) => {
                log::warn!("Skipping created reminder: {error}");
                None
            }
        })
        .collect()
}
