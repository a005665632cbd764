use std::{fmt, num::NonZeroU32, str::FromStr};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};
use thiserror::Error;

pub const DEFAULT_CHANNEL: &str = "sms";

const SEND_AT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderId(String);

impl ReminderId {
    pub fn new(inner: impl Into<String>) -> Self {
        Self(inner.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-observable delivery state of a reminder.
///
/// The server owns the transition. A reminder only ever moves from
/// `Pending` to `Sent`; there is no failed or cancelled state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReminderStatus {
    Pending,
    Sent,
}

impl ReminderStatus {
    pub fn from_sent_flag(sent: bool) -> Self {
        if sent {
            ReminderStatus::Sent
        } else {
            ReminderStatus::Pending
        }
    }

    /// Folds a freshly observed status into the known one. `Sent` is terminal.
    pub fn advance(self, observed: ReminderStatus) -> ReminderStatus {
        match self {
            ReminderStatus::Sent => ReminderStatus::Sent,
            ReminderStatus::Pending => observed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReminderStatus::Pending => "Pending",
            ReminderStatus::Sent => "Sent",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    pub name: String,
    pub phone: String,
    pub medication: Option<String>,
    pub channel: String,
    pub send_at: DateTime<Utc>,
    pub sent: bool,
}

impl Reminder {
    pub fn status(&self) -> ReminderStatus {
        ReminderStatus::from_sent_flag(self.sent)
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Could not parse send time \"{0}\", expected e.g. 2025-06-01T09:30")]
    InvalidSendAt(String),

    #[error("Repeat days must be a whole number from 1 to {MAX_REPEAT_DAYS}, got \"{0}\"")]
    InvalidRepeatDays(String),
}

/// Wall-clock send time. Keeps the text it was parsed from so it can be sent
/// back exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAt {
    datetime: NaiveDateTime,
    entered: String,
}

impl SendAt {
    pub fn new(inner: NaiveDateTime) -> Self {
        let datetime = inner.with_nanosecond(0).expect("Will never fail.");
        let format = if datetime.second() == 0 {
            SEND_AT_FORMATS[0]
        } else {
            SEND_AT_FORMATS[1]
        };

        Self {
            entered: datetime.format(format).to_string(),
            datetime,
        }
    }

    pub fn datetime(&self) -> &NaiveDateTime {
        &self.datetime
    }

    pub fn into_datetime(self) -> NaiveDateTime {
        self.datetime
    }

    /// The text this value was parsed from, or the `datetime-local` shape when
    /// built from a `NaiveDateTime`.
    pub fn entered(&self) -> &str {
        &self.entered
    }
}

impl FromStr for SendAt {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SEND_AT_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|datetime| SendAt {
                datetime,
                entered: s.to_string(),
            })
            .ok_or_else(|| DraftError::InvalidSendAt(s.to_string()))
    }
}

impl fmt::Display for SendAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entered)
    }
}

/// Longest daily series a single draft may request.
pub const MAX_REPEAT_DAYS: u32 = 366;

/// "Repeat daily for N days", between 1 and [`MAX_REPEAT_DAYS`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RepeatDays(NonZeroU32);

impl RepeatDays {
    pub fn new(days: u32) -> Option<Self> {
        NonZeroU32::new(days)
            .filter(|days| days.get() <= MAX_REPEAT_DAYS)
            .map(Self)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl FromStr for RepeatDays {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(RepeatDays::new)
            .ok_or_else(|| DraftError::InvalidRepeatDays(s.to_string()))
    }
}

/// A reminder creation request. Constructed only through [`ReminderDraft::new`],
/// so every draft in circulation has its required fields filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    name: String,
    phone: String,
    medication: String,
    send_at: SendAt,
    repeat_days: Option<RepeatDays>,
}

impl ReminderDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        medication: impl Into<String>,
        send_at: SendAt,
        repeat_days: Option<RepeatDays>,
    ) -> Result<Self, DraftError> {
        let name = required(name.into(), "Patient name")?;
        let phone = required(phone.into(), "Phone number")?;
        let medication = required(medication.into(), "Medication")?;

        Ok(Self {
            name,
            phone,
            medication,
            send_at,
            repeat_days,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn medication(&self) -> &str {
        &self.medication
    }

    pub fn send_at(&self) -> &SendAt {
        &self.send_at
    }

    pub fn repeat_days(&self) -> Option<RepeatDays> {
        self.repeat_days
    }

    pub fn occurrence_count(&self) -> u32 {
        self.repeat_days.map_or(1, |days| days.get())
    }

    /// One send time per day the reminder repeats, starting at `send_at`.
    ///
    /// Days are added on the wall clock, so every occurrence keeps the
    /// entered time of day.
    pub fn occurrences(&self) -> Vec<NaiveDateTime> {
        let first = *self.send_at.datetime();
        (0..i64::from(self.occurrence_count()))
            .map_while(|day| {
                TimeDelta::try_days(day).and_then(|delta| first.checked_add_signed(delta))
            })
            .collect()
    }
}

fn required(value: String, field: &'static str) -> Result<String, DraftError> {
    if value.trim().is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(value)
    }
}
