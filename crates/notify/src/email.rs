use crate::deny_list;
use crate::http::require;
use async_trait::async_trait;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::SmtpOptions;
use herald_core::notify::port::Notifier;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor};
use tracing::{error, info};

/// # Summary
/// A notifier implementation that sends messages via SMTP (e.g., Gmail, QQ Mail).
///
/// # Invariants
/// - Requires valid SMTP credentials and server configuration.
/// - Subject and body come from the parsed `Message`: structured JSON or the raw text for both.
/// - When `deny_list` is on, blocked recipients are refused before connecting.
pub struct EmailNotifier {
    options: SmtpOptions,
}

impl EmailNotifier {
    /// # Summary
    /// Creates a new `EmailNotifier`.
    ///
    /// # Arguments
    /// * `options` - Recipient, SMTP host and credentials. The sender falls back to `user`.
    pub fn new(options: SmtpOptions) -> Self {
        Self { options }
    }

    fn sender(&self) -> &str {
        if self.options.sender.is_empty() {
            &self.options.user
        } else {
            &self.options.sender
        }
    }

    /// # Summary
    /// Builds the outgoing mail without sending it.
    ///
    /// # Logic
    /// 1. Validates recipient and message, then applies the deny-list.
    /// 2. Builds an HTML mail from the message subject and body.
    pub fn compose(&self, message: &Message) -> Result<Email, NotifyError> {
        check_recipient(&self.options.to_email, message, self.options.deny_list)?;
        build_email(self.sender(), &self.options.to_email, message)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    /// # Summary
    /// Sends a notification email.
    ///
    /// # Logic
    /// 1. Composes the mail, rejecting missing or blocked recipients.
    /// 2. Configures the relay transport with TLS and authentication.
    /// 3. Sends the email.
    ///
    /// # Returns
    /// * `Ok(())` if the email was successfully sent.
    /// * `Err(NotifyError)` if validation, a network or SMTP error occurs.
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let email = self.compose(message)?;
        require(&self.options.host, "smtp host")?;

        let creds = Credentials::new(self.options.user.clone(), self.options.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.options.host)
            .map_err(|e| NotifyError::Config(format!("Invalid SMTP host: {}", e)))?
            .credentials(creds)
            .build();

        deliver(&mailer, email, "SMTP").await
    }
}

/// Missing address, missing message, then the deny-list when enabled.
pub(crate) fn check_recipient(
    to_email: &str,
    message: &Message,
    deny_list: bool,
) -> Result<(), NotifyError> {
    require(to_email, "email address")?;
    require(message.text(), "message")?;
    if deny_list && deny_list::is_blocked(to_email) {
        return Err(NotifyError::Blocked(to_email.to_string()));
    }
    Ok(())
}

pub(crate) fn build_email(from: &str, to: &str, message: &Message) -> Result<Email, NotifyError> {
    Email::builder()
        .from(
            from.parse()
                .map_err(|e| NotifyError::Config(format!("Invalid from address: {}", e)))?,
        )
        .to(to
            .parse()
            .map_err(|e| NotifyError::Config(format!("Invalid to address: {}", e)))?)
        .subject(message.subject())
        .header(ContentType::TEXT_HTML)
        .body(message.body().to_string())
        .map_err(|e| NotifyError::Payload(format!("Failed to build email: {}", e)))
}

pub(crate) async fn deliver(
    mailer: &AsyncSmtpTransport<Tokio1Executor>,
    email: Email,
    provider: &str,
) -> Result<(), NotifyError> {
    match mailer.send(email).await {
        Ok(_) => {
            info!(provider, "Email delivered");
            Ok(())
        }
        Err(e) => {
            error!(provider, error = %e, "Email delivery failed");
            Err(NotifyError::Network(format!("send email error: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(to_email: &str, deny_list: bool) -> SmtpOptions {
        SmtpOptions {
            to_email: to_email.to_string(),
            user: "bot@example.com".to_string(),
            password: "secret".to_string(),
            host: "smtp.example.com".to_string(),
            sender: String::new(),
            deny_list,
        }
    }

    #[test]
    fn test_compose_structured_message() {
        let notifier = EmailNotifier::new(options("a@example.com", false));
        let email = notifier
            .compose(&Message::parse(r#"{"subject":"Hi","content":"Body"}"#))
            .unwrap();
        let formatted = String::from_utf8_lossy(&email.formatted()).to_string();

        assert!(formatted.contains("Subject: Hi"));
        assert!(formatted.contains("From: bot@example.com"));
        assert!(formatted.contains("To: a@example.com"));
        assert!(formatted.contains("Body"));
    }

    #[test]
    fn test_deny_list_is_opt_in() {
        let msg = Message::parse("alert");
        assert!(EmailNotifier::new(options("a@qq.com", false)).compose(&msg).is_ok());
        assert_eq!(
            EmailNotifier::new(options("a@qq.com", true)).compose(&msg).err(),
            Some(NotifyError::Blocked("a@qq.com".to_string()))
        );
    }

    #[test]
    fn test_missing_fields() {
        let msg = Message::parse("alert");
        assert_eq!(
            EmailNotifier::new(options("", false)).compose(&msg).err(),
            Some(NotifyError::Missing("email address"))
        );
        assert_eq!(
            EmailNotifier::new(options("a@example.com", false))
                .compose(&Message::parse(""))
                .err(),
            Some(NotifyError::Missing("message"))
        );
    }

    #[test]
    fn test_whitespace_message_is_sent_as_is() {
        let notifier = EmailNotifier::new(options("a@example.com", false));
        let email = notifier.compose(&Message::parse("   ")).unwrap();
        let formatted = String::from_utf8_lossy(&email.formatted()).to_string();
        assert!(formatted.contains("To: a@example.com"));
    }
}
