use chrono_tz::Tz;
use medremind_api::ReminderApi;
use medremind_models::reminder::Reminder;

pub const TITLE: &str = "All Scheduled Reminders";
pub const LOADING_MESSAGE: &str = "Loading reminders...";
pub const EMPTY_MESSAGE: &str = "No reminders scheduled.";
pub const FAILED_MESSAGE: &str = "Failed to load reminders.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Reminder>),
    Failed,
}

/// Listing of every reminder the server knows, in server order.
///
/// Fetched once by [`ReminderList::load`]; it goes stale until loaded again.
pub struct ReminderList {
    state: ListState,
}

impl ReminderList {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn reminders(&self) -> &[Reminder] {
        match &self.state {
            ListState::Loaded(reminders) => reminders,
            _ => &[],
        }
    }

    pub async fn load(&mut self, api: &dyn ReminderApi) -> &ListState {
        self.state = match api.list().await {
            Ok(reminders) => {
                log::debug!("Loaded {} reminders", reminders.len());
                ListState::Loaded(reminders)
            }
            Err(error) => {
                log::error!("Failed to fetch reminders: {error}");
                ListState::Failed
            }
        };

        &self.state
    }

    pub fn render(&self, timezone: Tz) -> String {
        match &self.state {
            ListState::Loading => LOADING_MESSAGE.to_string(),
            ListState::Failed => FAILED_MESSAGE.to_string(),
            ListState::Loaded(reminders) if reminders.is_empty() => {
                format!("{TITLE}\n\n{EMPTY_MESSAGE}")
            }
            ListState::Loaded(reminders) => {
                let entries: Vec<String> = reminders
                    .iter()
                    .map(|reminder| render_entry(reminder, timezone))
                    .collect();
                format!("{TITLE}\n\n{}", entries.join("\n\n"))
            }
        }
    }
}

impl Default for ReminderList {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_send_time(reminder: &Reminder, timezone: Tz) -> String {
    reminder
        .send_at
        .with_timezone(&timezone)
        .format("%Y-%m-%d %H:%M %Z")
        .to_string()
}

pub fn render_entry(reminder: &Reminder, timezone: Tz) -> String {
    let mut lines = vec![
        format!("Name: {}", reminder.name),
        format!("Phone: {}", reminder.phone),
        format!("Type: {}", reminder.channel),
    ];
    if let Some(medication) = &reminder.medication {
        lines.push(format!("Medication: {medication}"));
    }
    lines.push(format!("Send At: {}", format_send_time(reminder, timezone)));
    lines.push(format!("Status: {}", reminder.status()));

    lines.join("\n")
}
