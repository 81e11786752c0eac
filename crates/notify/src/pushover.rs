use crate::http;
use async_trait::async_trait;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::PushoverOptions;
use herald_core::notify::port::Notifier;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.pushover.net";
/// Emergency priority, repeated until acknowledged; Pushover requires `retry` and `expire` with it.
const EMERGENCY_PRIORITY: i32 = 2;
/// Seconds between emergency retries (Pushover minimum is 30).
const EMERGENCY_RETRY_SECS: u32 = 60;
/// Seconds before an unacknowledged emergency stops retrying (maximum is 10800).
const EMERGENCY_EXPIRE_SECS: u32 = 3600;

/// A notifier for the Pushover message API.
pub struct PushoverNotifier {
    options: PushoverOptions,
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct PushoverForm<'a> {
    token: &'a str,
    user: &'a str,
    message: &'a str,
    priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expire: Option<u32>,
}

#[derive(Deserialize)]
struct PushoverResponse {
    status: i64,
    #[serde(default)]
    errors: Vec<String>,
}

impl PushoverNotifier {
    pub fn new(options: PushoverOptions) -> Result<Self, NotifyError> {
        Ok(Self {
            options,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: http::client()?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        http::require(&self.options.token, "pushover token")?;
        http::require(&self.options.user, "pushover user")?;
        http::require(message.text(), "message")?;
        if !(-2..=2).contains(&self.options.priority) {
            return Err(NotifyError::Config(format!(
                "Pushover priority must be between -2 and 2, got {}",
                self.options.priority
            )));
        }

        let emergency = self.options.priority == EMERGENCY_PRIORITY;
        let form = PushoverForm {
            token: &self.options.token,
            user: &self.options.user,
            message: message.text(),
            priority: self.options.priority,
            retry: emergency.then_some(EMERGENCY_RETRY_SECS),
            expire: emergency.then_some(EMERGENCY_EXPIRE_SECS),
        };
        let url = format!("{}/1/messages.json", self.base_url);

        let body = http::execute(self.client.post(&url).form(&form), "Pushover").await?;
        let response: PushoverResponse = http::decode(&body, "Pushover")?;
        if response.status != 1 {
            return Err(NotifyError::Platform(format!(
                "Pushover API error: {}",
                response.errors.join(", ")
            )));
        }
        Ok(())
    }
}
