use crate::http;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::DingTalkOptions;
use herald_core::notify::port::Notifier;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// # Summary
/// A notifier for DingTalk custom robots.
///
/// # Invariants
/// - `webhook_url` is the robot URL including its `access_token` query.
/// - When `secret` is set, every request is signed with the current timestamp.
pub struct DingTalkNotifier {
    options: DingTalkOptions,
    client: Client,
}

#[derive(Serialize)]
struct TextMessage<'a> {
    msgtype: &'static str,
    text: Text<'a>,
}

#[derive(Serialize)]
struct Text<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct DingTalkResponse {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

impl DingTalkNotifier {
    pub fn new(options: DingTalkOptions) -> Result<Self, NotifyError> {
        Ok(Self {
            options,
            client: http::client()?,
        })
    }

    /// # Summary
    /// Builds the request URL, appending `timestamp` and `sign` when a secret is configured.
    ///
    /// # Logic
    /// 1. `string_to_sign = "{timestamp}\n{secret}"`.
    /// 2. `sign = urlencode(base64(hmac_sha256(secret, string_to_sign)))`.
    ///
    /// # Arguments
    /// * `timestamp_ms` - Milliseconds since the Unix epoch.
    pub fn signed_url(&self, timestamp_ms: i64) -> Result<String, NotifyError> {
        let webhook = &self.options.webhook_url;
        if self.options.secret.is_empty() {
            return Ok(webhook.clone());
        }

        let string_to_sign = format!("{}\n{}", timestamp_ms, self.options.secret);
        let mut mac = HmacSha256::new_from_slice(self.options.secret.as_bytes())
            .map_err(|e| NotifyError::Config(format!("Invalid DingTalk secret: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let sign = STANDARD.encode(mac.finalize().into_bytes());

        let separator = if webhook.contains('?') { '&' } else { '?' };
        Ok(format!(
            "{}{}timestamp={}&sign={}",
            webhook,
            separator,
            timestamp_ms,
            urlencoding::encode(&sign)
        ))
    }
}

#[async_trait]
impl Notifier for DingTalkNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        http::require(&self.options.webhook_url, "dingtalk webhook")?;
        http::require(message.text(), "message")?;

        let url = self.signed_url(chrono::Utc::now().timestamp_millis())?;
        let payload = TextMessage {
            msgtype: "text",
            text: Text {
                content: message.text(),
            },
        };

        let body = http::post_json(self.client.post(&url), &payload, "DingTalk").await?;
        let response: DingTalkResponse = http::decode(&body, "DingTalk")?;
        if response.errcode != 0 {
            return Err(NotifyError::Platform(format!(
                "DingTalk API error {}: {}",
                response.errcode, response.errmsg
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_url_is_untouched() {
        let notifier = DingTalkNotifier::new(DingTalkOptions {
            webhook_url: "https://oapi.dingtalk.com/robot/send?access_token=abc".to_string(),
            secret: String::new(),
        })
        .unwrap();
        assert_eq!(
            notifier.signed_url(1_700_000_000_000).unwrap(),
            "https://oapi.dingtalk.com/robot/send?access_token=abc"
        );
    }

    #[test]
    fn test_signed_url() {
        let notifier = DingTalkNotifier::new(DingTalkOptions {
            webhook_url: "https://oapi.dingtalk.com/robot/send?access_token=abc".to_string(),
            secret: "SECxyz".to_string(),
        })
        .unwrap();
        let url = notifier.signed_url(1_700_000_000_000).unwrap();
        assert!(url.starts_with(
            "https://oapi.dingtalk.com/robot/send?access_token=abc&timestamp=1700000000000&sign="
        ));

        // 同一时间戳签名稳定
        assert_eq!(url, notifier.signed_url(1_700_000_000_000).unwrap());
        assert_ne!(url, notifier.signed_url(1_700_000_000_001).unwrap());
    }
}
