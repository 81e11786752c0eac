use crate::http;
use async_trait::async_trait;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::DiscordOptions;
use herald_core::notify::port::Notifier;
use reqwest::{Client, header};
use serde::Serialize;

const DEFAULT_BASE_URL: &str = "https://discord.com";

/// A notifier that posts into a Discord channel as a bot.
pub struct DiscordNotifier {
    options: DiscordOptions,
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

impl DiscordNotifier {
    pub fn new(options: DiscordOptions) -> Result<Self, NotifyError> {
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
impl Notifier for DiscordNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        http::require(&self.options.token, "discord token")?;
        http::require(&self.options.channel, "discord channel")?;
        http::require(message.text(), "message")?;

        let url = format!(
            "{}/api/v10/channels/{}/messages",
            self.base_url,
            urlencoding::encode(&self.options.channel)
        );
        let request = self.client.post(&url).header(
            header::AUTHORIZATION,
            format!("Bot {}", self.options.token),
        );

        http::post_json(
            request,
            &CreateMessage {
                content: message.text(),
            },
            "Discord",
        )
        .await?;
        Ok(())
    }
}
