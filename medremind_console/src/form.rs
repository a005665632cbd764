use medremind_api::{ApiError, ReminderApi};
use medremind_models::reminder::{DraftError, Reminder, RepeatDays, ReminderDraft, SendAt};

pub const SENDING_MESSAGE: &str = "Sending...";
pub const SCHEDULED_MESSAGE: &str = "Reminder(s) scheduled successfully";
pub const FAILED_MESSAGE: &str = "Failed to schedule reminder";

/// Raw input exactly as typed. Empty strings mean "not filled in".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub phone: String,
    pub medication: String,
    pub send_at: String,
    pub repeat_days: String,
}

impl FormFields {
    pub fn prefilled(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_draft(&self) -> Result<ReminderDraft, DraftError> {
        if self.send_at.trim().is_empty() {
            return Err(DraftError::MissingField("Send time"));
        }
        let send_at = self.send_at.parse::<SendAt>()?;

        let repeat_days = if self.repeat_days.trim().is_empty() {
            None
        } else {
            Some(self.repeat_days.parse::<RepeatDays>()?)
        };

        ReminderDraft::new(
            self.name.clone(),
            self.phone.clone(),
            self.medication.clone(),
            send_at,
            repeat_days,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Sending,
    Invalid(DraftError),
    Scheduled { occurrences: u32 },
    Failed,
}

impl FormStatus {
    pub fn message(&self) -> Option<String> {
        match self {
            FormStatus::Idle => None,
            FormStatus::Sending => Some(SENDING_MESSAGE.to_string()),
            FormStatus::Invalid(error) => Some(error.to_string()),
            FormStatus::Scheduled { .. } => Some(SCHEDULED_MESSAGE.to_string()),
            FormStatus::Failed => Some(FAILED_MESSAGE.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormStatus::Scheduled { .. })
    }
}

/// Medication reminder form. Cleared after a successful submit, left as is
/// otherwise so the same values can be sent again.
pub struct ReminderForm {
    fields: FormFields,
    status: FormStatus,
}

impl ReminderForm {
    pub fn new() -> Self {
        Self::with_fields(FormFields::default())
    }

    pub fn with_fields(fields: FormFields) -> Self {
        Self {
            fields,
            status: FormStatus::Idle,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Validates the fields and marks the form as sending. Returns `None` when
    /// the fields are invalid; `status()` then carries the reason.
    pub fn begin_submit(&mut self) -> Option<ReminderDraft> {
        match self.fields.to_draft() {
            Ok(draft) => {
                self.status = FormStatus::Sending;
                Some(draft)
            }
            Err(error) => {
                self.status = FormStatus::Invalid(error);
                None
            }
        }
    }

    /// Applies the outcome of the create call started by `begin_submit`.
    pub fn complete(
        &mut self,
        draft: &ReminderDraft,
        result: Result<Vec<Reminder>, ApiError>,
    ) -> &FormStatus {
        match result {
            Ok(created) => {
                log::info!(
                    "Scheduled reminder for {}, server reported {} record(s)",
                    draft.name(),
                    created.len()
                );
                self.fields = FormFields::default();
                self.status = FormStatus::Scheduled {
                    occurrences: draft.occurrence_count(),
                };
            }
            Err(error) => {
                log::error!("Scheduling reminder failed: {error}");
                self.status = FormStatus::Failed;
            }
        }

        &self.status
    }

    pub async fn submit(&mut self, api: &dyn ReminderApi) -> &FormStatus {
        let Some(draft) = self.begin_submit() else {
            return &self.status;
        };

        let result = api.create(&draft).await;
        self.complete(&draft, result)
    }
}

impl Default for ReminderForm {
    fn default() -> Self {
        Self::new()
    }
}
