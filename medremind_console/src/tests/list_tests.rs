use chrono_tz::Tz;

use crate::list::*;
use crate::tests::test_utils::*;

#[test]
fn new_list_is_loading() {
    let list = ReminderList::new();

    assert_eq!(*list.state(), ListState::Loading);
    assert_eq!(list.render(Tz::UTC), LOADING_MESSAGE);
}

#[tokio::test]
async fn empty_listing_shows_empty_message() {
    let api = RecordingReminderApi::new();
    let mut list = ReminderList::new();

    list.load(&api).await;

    assert_eq!(*list.state(), ListState::Loaded(Vec::new()));
    let rendered = list.render(Tz::UTC);
    assert!(rendered.starts_with(TITLE));
    assert!(rendered.ends_with(EMPTY_MESSAGE));
}

#[tokio::test]
async fn one_entry_per_record_in_server_order() {
    let api = RecordingReminderApi::with_reminders(vec![
        reminder("b", true),
        reminder("a", false),
        reminder("c", false),
    ]);
    let mut list = ReminderList::new();

    list.load(&api).await;

    let ids: Vec<&str> = list.reminders().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["b", "a", "c"]);

    let rendered = list.render(Tz::UTC);
    assert_eq!(rendered.matches("Name: Jane Doe").count(), 3);
    assert_eq!(rendered.matches("Status: Sent").count(), 1);
    assert_eq!(rendered.matches("Status: Pending").count(), 2);
    assert!(!rendered.contains(EMPTY_MESSAGE));
}

#[tokio::test]
async fn failed_listing_shows_failure_and_no_entries() {
    let api = RecordingReminderApi::failing();
    let mut list = ReminderList::new();

    list.load(&api).await;

    assert_eq!(*list.state(), ListState::Failed);
    assert!(list.reminders().is_empty());
    assert_eq!(list.render(Tz::UTC), FAILED_MESSAGE);
}

#[tokio::test]
async fn loading_again_replaces_the_listing() {
    let api = RecordingReminderApi::with_reminders(vec![reminder("1", false)]);
    let mut list = ReminderList::new();

    list.load(&RecordingReminderApi::failing()).await;
    list.load(&api).await;

    assert_eq!(list.reminders().len(), 1);
    assert_eq!(api.list_calls(), 1);
}

#[test]
fn entry_lists_every_field() {
    let entry = render_entry(&reminder("1", false), Tz::UTC);

    assert_eq!(
        entry,
        "Name: Jane Doe\n\
         Phone: 0712345678\n\
         Type: medication\n\
         Medication: Take 1 tablet of Paracetamol\n\
         Send At: 2025-05-31 08:30 UTC\n\
         Status: Pending"
    );
}

#[test]
fn entry_without_medication_skips_the_line() {
    let mut reminder = reminder("1", true);
    reminder.medication = None;

    let entry = render_entry(&reminder, Tz::UTC);

    assert!(!entry.contains("Medication:"));
    assert!(entry.ends_with("Status: Sent"));
}

#[test]
fn send_time_is_shown_in_display_timezone() {
    let formatted = format_send_time(&reminder("1", false), Tz::Africa__Nairobi);

    assert_eq!(formatted, "2025-05-31 11:30 EAT");
}
