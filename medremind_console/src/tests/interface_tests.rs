use std::sync::Arc;

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use medremind_api::SmsOutcome;
use medremind_models::session::Session;
use medremind_scheduler::StatusEvent;

use crate::{
    ConsoleInterface,
    form::{FAILED_MESSAGE, FormFields, SCHEDULED_MESSAGE},
    session::{MemorySessionStore, SessionContext},
    tests::test_utils::*,
    watch::describe_event,
};

struct TestContext {
    interface: ConsoleInterface,
    api: Arc<RecordingReminderApi>,
    sms: Arc<RecordingSmsGateway>,
}

impl TestContext {
    async fn new(api: RecordingReminderApi, outcome: SmsOutcome) -> Self {
        let api = Arc::new(api);
        let sms = Arc::new(RecordingSmsGateway::new(outcome));
        let session =
            SessionContext::initialize(Arc::new(MemorySessionStore::new()), Utc::now()).await;
        let interface = ConsoleInterface::new(api.clone(), sms.clone(), session, Tz::UTC);

        Self {
            interface,
            api,
            sms,
        }
    }
}

#[tokio::test]
async fn create_reports_occurrences() {
    let ctx = TestContext::new(RecordingReminderApi::new(), SmsOutcome::sent()).await;

    let report = ctx.interface.create_reminder(filled_fields()).await;

    assert!(report.success);
    assert_eq!(report.text, format!("{SCHEDULED_MESSAGE} (5 occurrence(s))"));
    assert_eq!(ctx.api.created_drafts().len(), 1);
}

#[tokio::test]
async fn create_failure_is_reported() {
    let ctx = TestContext::new(RecordingReminderApi::failing(), SmsOutcome::sent()).await;

    let report = ctx.interface.create_reminder(filled_fields()).await;

    assert!(!report.success);
    assert_eq!(report.text, FAILED_MESSAGE);
}

#[tokio::test]
async fn create_with_missing_field_names_it() {
    let ctx = TestContext::new(RecordingReminderApi::new(), SmsOutcome::sent()).await;
    let fields = FormFields {
        phone: String::new(),
        ..filled_fields()
    };

    let report = ctx.interface.create_reminder(fields).await;

    assert!(!report.success);
    assert!(report.text.contains("Phone number"));
    assert!(ctx.api.created_drafts().is_empty());
}

#[tokio::test]
async fn list_failure_is_reported() {
    let ctx = TestContext::new(RecordingReminderApi::failing(), SmsOutcome::sent()).await;

    let report = ctx.interface.list_reminders().await;

    assert!(!report.success);
}

#[tokio::test]
async fn list_shows_records() {
    let api = RecordingReminderApi::with_reminders(vec![reminder("1", true)]);
    let ctx = TestContext::new(api, SmsOutcome::sent()).await;

    let report = ctx.interface.list_reminders().await;

    assert!(report.success);
    assert!(report.text.contains("Status: Sent"));
}

#[tokio::test]
async fn sms_is_forwarded_as_given() {
    let ctx = TestContext::new(RecordingReminderApi::new(), SmsOutcome::sent()).await;

    let report = ctx
        .interface
        .send_sms("0712345678", "Your test results are ready", Some("Jane Doe"))
        .await;

    assert!(report.success);
    assert_eq!(report.text, "Message sent to 0712345678");
    assert_eq!(
        ctx.sms.sent(),
        [(
            "0712345678".to_string(),
            "Your test results are ready".to_string(),
            Some("Jane Doe".to_string())
        )]
    );
}

#[tokio::test]
async fn sms_failure_carries_reason() {
    let ctx = TestContext::new(
        RecordingReminderApi::new(),
        SmsOutcome::failed("Invalid phone number"),
    )
    .await;

    let report = ctx.interface.send_sms("07", "hello", None).await;

    assert!(!report.success);
    assert_eq!(report.text, "Failed to send message: Invalid phone number");
}

#[tokio::test]
async fn login_then_logout() {
    let mut ctx = TestContext::new(RecordingReminderApi::new(), SmsOutcome::sent()).await;
    assert!(!ctx.interface.whoami().success);

    let session = Session {
        doctor_email: "dr.otieno@example.com".to_string(),
        access_token: "token".to_string(),
        expires_at: Some(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap()),
    };
    ctx.interface.login(session).await.unwrap();

    let whoami = ctx.interface.whoami();
    assert!(whoami.success);
    assert_eq!(
        whoami.text,
        "Signed in as dr.otieno@example.com until 2099-01-01 00:00 UTC"
    );

    let logout = ctx.interface.logout().await.unwrap();
    assert_eq!(logout.text, "Signed out");
    assert!(!ctx.interface.session().is_signed_in());
}

#[test]
fn status_events_are_described() {
    let discovered = describe_event(&StatusEvent::Discovered(reminder("1", false)), Tz::UTC);
    let delivered = describe_event(&StatusEvent::Delivered(reminder("1", true)), Tz::UTC);

    assert_eq!(
        discovered,
        "[Pending] Jane Doe (0712345678) at 2025-05-31 08:30 UTC"
    );
    assert_eq!(
        delivered,
        "[Sent] Delivered to Jane Doe (0712345678), scheduled for 2025-05-31 08:30 UTC"
    );
}
