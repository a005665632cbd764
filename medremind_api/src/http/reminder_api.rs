mod model;

use async_trait::async_trait;
use medremind_models::{
    reminder::{Reminder, ReminderDraft},
    session::Session,
    settings::ApiSettings,
};
use reqwest::Client;

use super::{REMINDERS_PATH, authorize, build_client, endpoint, ensure_success};
use crate::{ApiError, ReminderApi};
use model::{ReminderDraftBody, ReminderRecord, decode_created};

pub struct HttpReminderApi {
    client: Client,
    reminders_url: String,
    access_token: Option<String>,
}

impl HttpReminderApi {
    pub fn new(settings: &ApiSettings, session: Option<&Session>) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(settings.timeout())?,
            reminders_url: endpoint(&settings.base_url, REMINDERS_PATH),
            access_token: session.map(|session| session.access_token.clone()),
        })
    }
}

#[async_trait]
impl ReminderApi for HttpReminderApi {
    async fn create(&self, draft: &ReminderDraft) -> Result<Vec<Reminder>, ApiError> {
        log::info!(
            "POST {} ({} occurrence(s))",
            self.reminders_url,
            draft.occurrence_count()
        );

        let request = self
            .client
            .post(&self.reminders_url)
            .json(&ReminderDraftBody::from(draft));
        let response = authorize(request, self.access_token.as_deref()).send().await?;
        let body = ensure_success(response).await?.text().await?;

        Ok(decode_created(&body))
    }

    async fn list(&self) -> Result<Vec<Reminder>, ApiError> {
        log::debug!("GET {}", self.reminders_url);

        let request = self.client.get(&self.reminders_url);
        let response = authorize(request, self.access_token.as_deref()).send().await?;
        let body = ensure_success(response).await?.text().await?;

        let records: Vec<ReminderRecord> = serde_json::from_str(&body)?;
        records.into_iter().map(Reminder::try_from).collect()
    }
}
