use crate::http;
use async_trait::async_trait;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::SlackOptions;
use herald_core::notify::port::Notifier;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://slack.com";

/// # Summary
/// A notifier that posts messages through the Slack Web API (`chat.postMessage`).
///
/// # Invariants
/// - `token` is a bot token with `chat:write` scope.
pub struct SlackNotifier {
    options: SlackOptions,
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    error: String,
}

impl SlackNotifier {
    pub fn new(options: SlackOptions) -> Result<Self, NotifyError> {
        Ok(Self {
            options,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: http::client()?,
        })
    }

    /// Points the notifier at another API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        http::require(&self.options.token, "slack token")?;
        http::require(&self.options.channel, "slack channel")?;
        http::require(message.text(), "message")?;

        let url = format!("{}/api/chat.postMessage", self.base_url);
        let payload = PostMessage {
            channel: &self.options.channel,
            text: message.text(),
        };

        let body = http::post_json(
            self.client.post(&url).bearer_auth(&self.options.token),
            &payload,
            "Slack",
        )
        .await?;

        // Slack answers 200 even for rejected requests
        let response: SlackResponse = http::decode(&body, "Slack")?;
        if !response.ok {
            return Err(NotifyError::Platform(format!(
                "Slack API error: {}",
                response.error
            )));
        }
        Ok(())
    }
}
