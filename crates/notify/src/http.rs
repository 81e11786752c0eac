//! Shared plumbing for the webhook and REST adapters.

use herald_core::notify::error::NotifyError;
use reqwest::{Client, RequestBuilder, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, error};

const TIMEOUT: Duration = Duration::from_secs(10);

static CRYPTO_PROVIDER: Once = Once::new();

/// reqwest is built without a bundled rustls provider, so one is installed once per process.
fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }
    });
}

/// # Summary
/// Builds the HTTP client used for a single notification.
///
/// # Returns
/// * A client with a 10 second timeout, or `NotifyError::Config` if the TLS backend fails to initialize.
pub(crate) fn client() -> Result<Client, NotifyError> {
    install_crypto_provider();
    Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| NotifyError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Rejects an empty required field before anything goes on the wire.
/// Whitespace is a value: only `""` counts as missing.
pub(crate) fn require(value: &str, field: &'static str) -> Result<(), NotifyError> {
    if value.is_empty() {
        return Err(NotifyError::Missing(field));
    }
    Ok(())
}

/// Serializes a request payload. Failures are fatal, nothing is sent.
pub(crate) fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>, NotifyError> {
    serde_json::to_vec(payload).map_err(|e| NotifyError::Payload(e.to_string()))
}

/// # Summary
/// Performs one outbound call and returns the response body.
///
/// # Logic
/// 1. Sends the request; transport failures become `NotifyError::Network`.
/// 2. Non-success statuses become `NotifyError::Platform` carrying the body.
///
/// # Arguments
/// * `request` - The fully prepared request.
/// * `provider` - Provider name used in errors and log fields.
pub(crate) async fn execute(request: RequestBuilder, provider: &str) -> Result<String, NotifyError> {
    let response = request.send().await.map_err(|e| {
        // Telegram carries the bot token in the URL
        let e = e.without_url();
        error!(provider, error = %e, "HTTP request failed");
        NotifyError::Network(e.to_string())
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| NotifyError::Network(e.without_url().to_string()))?;

    if !status.is_success() {
        error!(provider, status = %status, body = %body, "Provider rejected notification");
        return Err(NotifyError::Platform(format!(
            "{} API error: status {}, body: {}",
            provider, status, body
        )));
    }

    debug!(provider, status = %status, "Notification delivered");
    Ok(body)
}

/// Sends a JSON payload built with `encode`.
pub(crate) async fn post_json<T: Serialize>(
    request: RequestBuilder,
    payload: &T,
    provider: &str,
) -> Result<String, NotifyError> {
    let body = encode(payload)?;
    execute(
        request
            .header(header::CONTENT_TYPE, "application/json")
            .body(body),
        provider,
    )
    .await
}

/// Parses a provider response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &str, provider: &str) -> Result<T, NotifyError> {
    serde_json::from_str(body).map_err(|e| {
        NotifyError::Platform(format!("{} returned an unreadable response: {}", provider, e))
    })
}
