use async_trait::async_trait;
use tokio::sync::RwLock;

/// Result of an immediate, one-off SMS. Failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl SmsOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(&self, to: &str, message: &str, name: Option<&str>) -> SmsOutcome;
}

/// Records messages instead of sending them. Rejects the same empty input
/// the HTTP gateway rejects.
#[derive(Default)]
pub struct InMemorySmsGateway {
    sent: RwLock<Vec<SentSms>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: String,
    pub message: String,
    pub name: Option<String>,
}

impl InMemorySmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentSms> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl SmsGateway for InMemorySmsGateway {
    async fn send_sms(&self, to: &str, message: &str, name: Option<&str>) -> SmsOutcome {
        if let Some(error) = missing_input(to, message) {
            return SmsOutcome::failed(error);
        }

        log::info!("Recorded SMS to {to}");
        self.sent.write().await.push(SentSms {
            to: to.to_string(),
            message: message.to_string(),
            name: name.map(str::to_string),
        });
        SmsOutcome::sent()
    }
}

pub(crate) fn missing_input(to: &str, message: &str) -> Option<&'static str> {
    if to.trim().is_empty() {
        Some("Phone number is required")
    } else if message.trim().is_empty() {
        Some("Message is required")
    } else {
        None
    }
}
