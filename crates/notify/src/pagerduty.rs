use crate::http;
use async_trait::async_trait;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::PagerdutyOptions;
use herald_core::notify::port::Notifier;
use reqwest::Client;
use serde::Serialize;

const DEFAULT_BASE_URL: &str = "https://events.pagerduty.com";
const DEFAULT_SOURCE: &str = "herald";
const DEFAULT_SEVERITY: &str = "error";
const SEVERITIES: [&str; 4] = ["critical", "error", "warning", "info"];

/// # Summary
/// A notifier that triggers PagerDuty incidents through the Events API v2.
///
/// # Invariants
/// - `token` is an integration routing key.
/// - Empty `source`/`severity` fall back to `herald`/`error`.
pub struct PagerdutyNotifier {
    options: PagerdutyOptions,
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct Event<'a> {
    routing_key: &'a str,
    event_action: &'static str,
    payload: EventPayload<'a>,
}

#[derive(Serialize)]
struct EventPayload<'a> {
    summary: &'a str,
    source: &'a str,
    severity: String,
}

impl PagerdutyNotifier {
    pub fn new(options: PagerdutyOptions) -> Result<Self, NotifyError> {
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

    fn severity(&self) -> Result<String, NotifyError> {
        let severity = self.options.severity.trim().to_lowercase();
        if severity.is_empty() {
            return Ok(DEFAULT_SEVERITY.to_string());
        }
        if !SEVERITIES.contains(&severity.as_str()) {
            return Err(NotifyError::Config(format!(
                "Unknown PagerDuty severity: {}",
                self.options.severity
            )));
        }
        Ok(severity)
    }
}

#[async_trait]
impl Notifier for PagerdutyNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        http::require(&self.options.token, "pagerduty routing key")?;
        http::require(message.text(), "message")?;

        let source = match self.options.source.trim() {
            "" => DEFAULT_SOURCE,
            source => source,
        };
        let event = Event {
            routing_key: &self.options.token,
            event_action: "trigger",
            payload: EventPayload {
                summary: message.text(),
                source,
                severity: self.severity()?,
            },
        };

        let url = format!("{}/v2/enqueue", self.base_url);
        http::post_json(self.client.post(&url), &event, "PagerDuty").await?;
        Ok(())
    }
}
