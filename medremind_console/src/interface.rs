use std::{sync::Arc, time::Duration};

use chrono_tz::Tz;
use medremind_api::{ReminderApi, SmsGateway};
use medremind_models::session::Session;
use medremind_scheduler::StatusWatcher;

use crate::{
    form::{FormFields, FormStatus, ReminderForm},
    list::{ListState, ReminderList},
    session::SessionContext,
    watch::ConsoleStatusObserver,
};

/// What a command printed and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub success: bool,
}

impl Report {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}

pub struct ConsoleInterface {
    reminder_api: Arc<dyn ReminderApi>,
    sms_gateway: Arc<dyn SmsGateway>,
    session: SessionContext,
    timezone: Tz,
}

impl ConsoleInterface {
    pub fn new(
        reminder_api: Arc<dyn ReminderApi>,
        sms_gateway: Arc<dyn SmsGateway>,
        session: SessionContext,
        timezone: Tz,
    ) -> Self {
        Self {
            reminder_api,
            sms_gateway,
            session,
            timezone,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn create_reminder(&self, fields: FormFields) -> Report {
        let mut form = ReminderForm::with_fields(fields);
        let status = match form.begin_submit() {
            Some(draft) => {
                if let Some(sending) = form.status().message() {
                    println!("{sending}");
                }
                let result = self.reminder_api.create(&draft).await;
                form.complete(&draft, result)
            }
            None => form.status(),
        };
        let message = status.message().unwrap_or_default();

        match status {
            FormStatus::Scheduled { occurrences } => {
                Report::ok(format!("{message} ({occurrences} occurrence(s))"))
            }
            _ => Report::failed(message),
        }
    }

    pub async fn list_reminders(&self) -> Report {
        let mut list = ReminderList::new();
        let success = !matches!(
            list.load(self.reminder_api.as_ref()).await,
            ListState::Failed
        );

        Report {
            text: list.render(self.timezone),
            success,
        }
    }

    pub async fn send_sms(&self, to: &str, message: &str, name: Option<&str>) -> Report {
        let outcome = self.sms_gateway.send_sms(to, message, name).await;

        if outcome.success {
            Report::ok(format!("Message sent to {to}"))
        } else {
            let reason = outcome.error.as_deref().unwrap_or("unknown error");
            Report::failed(format!("Failed to send message: {reason}"))
        }
    }

    pub async fn login(&mut self, session: Session) -> anyhow::Result<Report> {
        let email = session.doctor_email.clone();
        self.session.sign_in(session).await?;
        Ok(Report::ok(format!("Signed in as {email}")))
    }

    pub async fn logout(&mut self) -> anyhow::Result<Report> {
        let was_signed_in = self.session.is_signed_in();
        self.session.sign_out().await?;

        Ok(if was_signed_in {
            Report::ok("Signed out")
        } else {
            Report::ok("Not signed in")
        })
    }

    pub fn whoami(&self) -> Report {
        match self.session.current() {
            Some(session) => match session.expires_at {
                Some(expires_at) => Report::ok(format!(
                    "Signed in as {} until {}",
                    session.doctor_email,
                    expires_at.with_timezone(&self.timezone).format("%Y-%m-%d %H:%M %Z")
                )),
                None => Report::ok(format!("Signed in as {}", session.doctor_email)),
            },
            None => Report::failed("Not signed in"),
        }
    }

    /// Starts printing status changes until the returned watcher is cancelled.
    pub fn watch(&self, interval: Duration) -> StatusWatcher {
        StatusWatcher::spawn(
            self.reminder_api.clone(),
            Arc::new(ConsoleStatusObserver::new(self.timezone)),
            interval,
        )
    }
}
