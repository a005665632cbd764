//! reqwest-backed implementations of the reminder and SMS collaborators.

mod reminder_api;
mod sms_gateway;

pub use reminder_api::HttpReminderApi;
pub use sms_gateway::HttpSmsGateway;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};

use crate::ApiError;

pub const REMINDERS_PATH: &str = "/api/reminders";
pub const SEND_SMS_PATH: &str = "/send-sms";

fn build_client(timeout: Option<Duration>) -> Result<Client, ApiError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn authorize(request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
    match access_token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        body,
    })
}
