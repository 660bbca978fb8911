// src/notify/telegram.rs

use crate::notify::{Notification, Notifier, NotifierError, ParseMode};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TELEGRAM_API: &str = "https://api.telegram.org";

/// Sends messages to one chat through the Telegram Bot API.
pub struct TelegramNotifier {
    token: String,
    chat_id: i64,
    api_base: String,
    client: Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: i64) -> Result<Self, NotifierError> {
        Self::with_api_base(token, chat_id, TELEGRAM_API)
    }

    pub fn with_api_base(
        token: String,
        chat_id: i64,
        api_base: impl Into<String>,
    ) -> Result<Self, NotifierError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            token,
            chat_id,
            api_base: api_base.into(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base.trim_end_matches('/'), self.token)
    }

    fn post(&self, text: &str, parse_mode: Option<ParseMode>) -> Result<(), NotifierError> {
        let payload = SendMessage {
            chat_id: self.chat_id,
            text,
            parse_mode,
        };

        let resp = self.client.post(self.endpoint()).json(&payload).send()?;

        let status = resp.status();
        let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());

        let api: Option<ApiResponse> = serde_json::from_str(&body).ok();
        match api {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse {
                description: Some(description),
                ..
            }) => Err(NotifierError::Api(format!("{status}: {description}"))),
            _ => Err(NotifierError::Api(format!("{status}: {body}"))),
        }
    }
}

/// Telegram rejects the whole message when listing text breaks its Markdown.
fn is_entity_parse_error(err: &NotifierError) -> bool {
    matches!(err, NotifierError::Api(msg) if msg.contains("can't parse entities"))
}

impl Notifier for TelegramNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifierError> {
        match self.post(&notification.text, notification.parse_mode) {
            Err(e) if notification.parse_mode.is_some() && is_entity_parse_error(&e) => {
                tracing::warn!(error = %e, "markdown rejected, resending as plain text");
                self.post(&notification.text, None)
            }
            other => other,
        }
    }
}
