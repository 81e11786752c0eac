use crate::email::{build_email, check_recipient, deliver};
use crate::http::require;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::SesOptions;
use herald_core::notify::port::Notifier;
use hmac::{Hmac, Mac};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, Message as Email, Tokio1Executor};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Regions that expose an SES SMTP endpoint.
const SMTP_REGIONS: [&str; 23] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "us-gov-west-1",
    "ca-central-1",
    "sa-east-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "eu-south-1",
    "il-central-1",
    "me-south-1",
    "af-south-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
];

// Fixed inputs of the SES SMTP credential derivation.
const SIGNING_DATE: &str = "11111111";
const SIGNING_SERVICE: &str = "ses";
const SIGNING_TERMINAL: &str = "aws4_request";
const SIGNING_MESSAGE: &str = "SendRawEmail";
const SIGNING_VERSION: u8 = 0x04;

/// # Summary
/// A notifier that delivers HTML mail through Amazon SES.
///
/// # Invariants
/// - Talks to the regional SES SMTP endpoint `email-smtp.{area}.amazonaws.com`.
/// - The IAM `key` is the SMTP username; the password is derived from the IAM `secret`.
/// - The consumer-domain deny-list applies when `deny_list` is set.
pub struct SesNotifier {
    options: SesOptions,
    endpoint: Option<String>,
}

impl SesNotifier {
    pub fn new(options: SesOptions) -> Self {
        Self {
            options,
            endpoint: None,
        }
    }

    /// Overrides the SMTP endpoint derived from the region.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// # Summary
    /// Resolves the SMTP endpoint for the configured region.
    ///
    /// # Returns
    /// * The endpoint host, or `NotifyError::Config` for a region without SES SMTP.
    pub fn endpoint(&self) -> Result<String, NotifyError> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        let area = self.options.area.trim();
        require(area, "aws region")?;
        if !SMTP_REGIONS.contains(&area) {
            return Err(NotifyError::Config(format!(
                "unsupported region for SES: {}",
                area
            )));
        }
        Ok(format!("email-smtp.{}.amazonaws.com", area))
    }

    /// # Summary
    /// Builds the outgoing mail without sending it.
    ///
    /// # Logic
    /// 1. Rejects a missing recipient or message.
    /// 2. Rejects blocked recipients when the deny-list is on.
    /// 3. Uses the structured subject/content, or the raw text for both.
    pub fn compose(&self, message: &Message) -> Result<Email, NotifyError> {
        check_recipient(&self.options.to_email, message, self.options.deny_list)?;
        require(&self.options.sender, "email sender")?;
        build_email(&self.options.sender, &self.options.to_email, message)
    }
}

/// # Summary
/// Derives an SES SMTP password from an IAM secret access key.
///
/// # Logic
/// 1. HMAC-SHA256 chain over date, region, service, terminal and message, keyed by `"AWS4" + secret`.
/// 2. Prefixes the version byte and base64 encodes the result.
pub fn smtp_password(secret: &str, region: &str) -> Result<String, NotifyError> {
    let mut signature = format!("AWS4{}", secret).into_bytes();
    for part in [
        SIGNING_DATE,
        region,
        SIGNING_SERVICE,
        SIGNING_TERMINAL,
        SIGNING_MESSAGE,
    ] {
        let mut mac = HmacSha256::new_from_slice(&signature)
            .map_err(|e| NotifyError::Config(format!("Invalid AWS secret: {}", e)))?;
        mac.update(part.as_bytes());
        signature = mac.finalize().into_bytes().to_vec();
    }

    let mut raw = Vec::with_capacity(signature.len() + 1);
    raw.push(SIGNING_VERSION);
    raw.extend_from_slice(&signature);
    Ok(STANDARD.encode(raw))
}

#[async_trait]
impl Notifier for SesNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let email = self.compose(message)?;
        require(&self.options.key, "aws access key")?;
        require(&self.options.secret, "aws secret key")?;
        let endpoint = self.endpoint()?;

        let password = smtp_password(&self.options.secret, self.options.area.trim())?;
        let creds = Credentials::new(self.options.key.clone(), password);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&endpoint)
            .map_err(|e| NotifyError::Config(format!("Invalid SES endpoint: {}", e)))?
            .credentials(creds)
            .build();

        deliver(&mailer, email, "SES").await
    }
}
