use async_trait::async_trait;
use medremind_models::{session::Session, settings::ApiSettings};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{SEND_SMS_PATH, authorize, build_client, endpoint};
use crate::{ApiError, SmsGateway, SmsOutcome, sms::missing_input};

#[derive(Serialize)]
struct SendSmsBody<'a> {
    to: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Deserialize, Default)]
struct SmsResponseBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpSmsGateway {
    client: Client,
    send_sms_url: String,
    access_token: Option<String>,
}

impl HttpSmsGateway {
    pub fn new(settings: &ApiSettings, session: Option<&Session>) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(settings.timeout())?,
            send_sms_url: endpoint(&settings.base_url, SEND_SMS_PATH),
            access_token: session.map(|session| session.access_token.clone()),
        })
    }

    async fn post(&self, body: &SendSmsBody<'_>) -> Result<(StatusCode, String), reqwest::Error> {
        let request = self.client.post(&self.send_sms_url).json(body);
        let response = authorize(request, self.access_token.as_deref()).send().await?;
        let status = response.status();
        let text = response.text().await?;

        Ok((status, text))
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send_sms(&self, to: &str, message: &str, name: Option<&str>) -> SmsOutcome {
        if let Some(error) = missing_input(to, message) {
            return SmsOutcome::failed(error);
        }

        log::info!("POST {}", self.send_sms_url);
        let body = SendSmsBody { to, message, name };

        match self.post(&body).await {
            Ok((status, text)) if status.is_success() => {
                let body: SmsResponseBody = serde_json::from_str(&text).unwrap_or_default();
                SmsOutcome {
                    success: body.success.unwrap_or(true),
                    error: body.error,
                }
            }
            Ok((status, text)) => {
                let server_error = serde_json::from_str::<SmsResponseBody>(&text)
                    .ok()
                    .and_then(|body| body.error);
                log::warn!("SMS dispatch rejected with {status}");
                SmsOutcome::failed(
                    server_error.unwrap_or_else(|| format!("Server responded with {status}")),
                )
            }
            Err(error) => {
                log::warn!("SMS dispatch failed: {error}");
                SmsOutcome::failed(error.to_string())
            }
        }
    }
}
