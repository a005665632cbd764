use std::collections::{HashMap, hash_map::Entry};

use medremind_models::reminder::{Reminder, ReminderId, ReminderStatus};

use crate::StatusEvent;

/// Last known status of every reminder seen so far.
#[derive(Default)]
pub struct StatusTracker {
    known: HashMap<ReminderId, ReminderStatus>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, id: &ReminderId) -> Option<ReminderStatus> {
        self.known.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Folds one listing into the known state and returns what changed, in
    /// listing order. Reminders missing from the listing keep their status.
    pub fn observe(&mut self, reminders: &[Reminder]) -> Vec<StatusEvent> {
        let mut events = Vec::new();

        for reminder in reminders {
            let observed = reminder.status();
            match self.known.entry(reminder.id.clone()) {
                Entry::Vacant(e) => {
                    e.insert(observed);
                    events.push(StatusEvent::Discovered(reminder.clone()));
                }
                Entry::Occupied(mut e) => {
                    let current = *e.get();
                    let next = current.advance(observed);

                    match (current, next) {
                        (ReminderStatus::Pending, ReminderStatus::Sent) => {
                            events.push(StatusEvent::Delivered(reminder.clone()));
                        }
                        (ReminderStatus::Sent, _) if observed == ReminderStatus::Pending => {
                            log::warn!(
                                "Reminder {} reported pending after being sent, keeping it sent",
                                reminder.id
                            );
                        }
                        _ => {}
                    }

                    e.insert(next);
                }
            }
        }

        events
    }
}
