use crate::http;
use async_trait::async_trait;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::LarkOptions;
use herald_core::notify::port::Notifier;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// # Summary
/// A notifier for Lark (Feishu) custom bot webhooks.
///
/// # Invariants
/// - `webhook_url` is the full bot hook URL.
pub struct LarkNotifier {
    options: LarkOptions,
    client: Client,
}

/// `{"msg_type": "text", "content": {"text": ...}}`
#[derive(Serialize)]
struct WebhookRequest<'a> {
    msg_type: &'static str,
    content: Text<'a>,
}

#[derive(Serialize)]
struct Text<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct LarkResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
}

impl LarkNotifier {
    pub fn new(options: LarkOptions) -> Result<Self, NotifyError> {
        Ok(Self {
            options,
            client: http::client()?,
        })
    }
}

#[async_trait]
impl Notifier for LarkNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        http::require(message.text(), "message")?;
        http::require(&self.options.webhook_url, "lark webhook")?;

        let request = WebhookRequest {
            msg_type: "text",
            content: Text {
                text: message.text(),
            },
        };

        let body = http::post_json(self.client.post(&self.options.webhook_url), &request, "Lark")
            .await?;
        let response: LarkResponse = http::decode(&body, "Lark")?;
        if response.code != 0 {
            return Err(NotifyError::Platform(format!(
                "Lark API error {}: {}",
                response.code, response.msg
            )));
        }
        Ok(())
    }
}
