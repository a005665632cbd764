use async_trait::async_trait;
use chrono_tz::Tz;
use medremind_scheduler::{StatusEvent, StatusObserver};

use crate::list::format_send_time;

pub struct ConsoleStatusObserver {
    timezone: Tz,
}

impl ConsoleStatusObserver {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

#[async_trait]
impl StatusObserver for ConsoleStatusObserver {
    async fn on_status_event(&self, event: &StatusEvent) {
        println!("{}", describe_event(event, self.timezone));
    }
}

pub fn describe_event(event: &StatusEvent, timezone: Tz) -> String {
    let reminder = event.reminder();
    let send_at = format_send_time(reminder, timezone);

    match event {
        StatusEvent::Discovered(_) => format!(
            "[{}] {} ({}) at {}",
            reminder.status(),
            reminder.name,
            reminder.phone,
            send_at
        ),
        StatusEvent::Delivered(_) => format!(
            "[Sent] Delivered to {} ({}), scheduled for {}",
            reminder.name, reminder.phone, send_at
        ),
    }
}
