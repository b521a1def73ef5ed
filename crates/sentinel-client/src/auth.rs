//! OAuth2 client-credentials token acquisition.

use imagery_common::{FetchError, FetchResult};
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Request a bearer token for the configured credentials.
pub(crate) async fn fetch_token(
    http: &reqwest::Client,
    config: &ClientConfig,
) -> FetchResult<String> {
    let url = format!("{}/oauth/token", config.base_url);

    let response = http
        .post(&url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| FetchError::Auth(format!("token request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Auth(format!(
            "token endpoint returned HTTP {}: {}",
            status,
            body.chars().take(300).collect::<String>()
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Auth(format!("parsing token response: {e}")))?;

    debug!("Acquired access token");
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let json = r#"{"access_token": "abc123", "token_type": "Bearer", "expires_in": 3600}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc123");
    }
}
