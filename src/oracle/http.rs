// Shared HTTP plumbing for oracle providers

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::OracleError;

/// Build a client with a transport-level timeout
pub(crate) fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    use anyhow::Context;

    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Send a prepared request once and decode the JSON body
///
/// Non-success statuses and transport failures are classified into `OracleError`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> Result<T, OracleError> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(provider, error = %e, "Oracle request failed to send");
        OracleError::from_transport(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = OracleError::from_status(status, &body);
        tracing::warn!(provider, status = status.as_u16(), kind = err.kind(), "Oracle request rejected");
        return Err(err);
    }

    let body = response.text().await.map_err(OracleError::from_transport)?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(provider, error = %e, "Oracle response body did not decode");
        OracleError::MalformedResponse(format!("{} response: {}", provider, e))
    })
}
