use crate::http;
use async_trait::async_trait;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::TelegramOptions;
use herald_core::notify::port::Notifier;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// # Summary
/// A notifier implementation that sends messages via Telegram Bot API.
///
/// # Invariants
/// * `token` must be valid.
/// * The target chat, numeric id or public `@name`, must be accessible by the bot.
pub struct TelegramNotifier {
    /// Bot token plus the resolved chat target.
    options: TelegramOptions,
    /// API host, replaced in tests.
    base_url: String,
    /// The HTTP client used for requests.
    client: Client,
}

/// # Summary
/// Telegram accepts either an integer chat id or a `@channelusername` string.
#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
enum ChatId<'a> {
    Id(i64),
    Name(&'a str),
}

/// # Summary
/// Payload structure for Telegram `sendMessage` API.
#[derive(Serialize)]
struct TelegramMessage<'a> {
    chat_id: ChatId<'a>,
    text: &'a str,
}

#[derive(Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: String,
}

impl TelegramNotifier {
    /// # Summary
    /// Creates a new `TelegramNotifier`.
    ///
    /// # Arguments
    /// * `options` - Bot token, numeric chat id and chat name.
    ///
    /// # Returns
    /// * A new instance, or `NotifyError::Config` if the HTTP client cannot be built.
    pub fn new(options: TelegramOptions) -> Result<Self, NotifyError> {
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

    /// A non-empty chat name wins over the numeric id.
    fn chat_id(&self) -> Result<ChatId<'_>, NotifyError> {
        if !self.options.chat_name.is_empty() {
            Ok(ChatId::Name(&self.options.chat_name))
        } else if self.options.channel != 0 {
            Ok(ChatId::Id(self.options.channel))
        } else {
            Err(NotifyError::Missing("telegram chat"))
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// # Summary
    /// Sends the raw message text to the configured chat.
    ///
    /// # Logic
    /// 1. Validates token, chat target and message.
    /// 2. Posts to `sendMessage`.
    /// 3. Checks both the HTTP status and the `ok` flag of the reply.
    ///
    /// # Returns
    /// * `Ok(())` if the message was sent successfully.
    /// * `Err(NotifyError)` if a network error occurs or the API returns a non-success status.
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        http::require(&self.options.token, "telegram token")?;
        let chat_id = self.chat_id()?;
        http::require(message.text(), "message")?;

        let url = format!("{}/bot{}/sendMessage", self.base_url, self.options.token);
        let payload = TelegramMessage {
            chat_id,
            text: message.text(),
        };

        let body = http::post_json(self.client.post(&url), &payload, "Telegram").await?;
        let response: TelegramResponse = http::decode(&body, "Telegram")?;
        if !response.ok {
            return Err(NotifyError::Platform(format!(
                "Telegram API error: {}",
                response.description
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(channel: i64, chat_name: &str) -> TelegramNotifier {
        TelegramNotifier::new(TelegramOptions {
            token: "T".to_string(),
            channel,
            chat_name: chat_name.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_chat_id_prefers_name() {
        assert_eq!(
            notifier(42, "@mychannel").chat_id().unwrap(),
            ChatId::Name("@mychannel")
        );
        assert_eq!(notifier(-100123, "").chat_id().unwrap(), ChatId::Id(-100123));
        assert_eq!(
            notifier(0, "").chat_id(),
            Err(NotifyError::Missing("telegram chat"))
        );
    }

    #[test]
    fn test_chat_id_serialization() {
        let payload = TelegramMessage {
            chat_id: ChatId::Id(12345),
            text: "hello",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"chat_id": 12345, "text": "hello"})
        );
    }
}
