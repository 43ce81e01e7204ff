//! HTTP client for the Kite Connect v3 API.
//!
//! One client is bound to the API key and secret of one broker account.
//! It covers the two calls needed to list mutual fund holdings: trading a
//! login `request_token` for an access token, and reading `/mf/holdings`.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use mfolio_core::errors::{Error, Result};
use mfolio_core::funds::RawHolding;

use crate::broker::{BrokerApiClient, KiteCredentials, KiteEnvelope, KiteMfHolding, KiteSession};

/// Default base URL of the Kite Connect REST API.
pub const DEFAULT_KITE_API_URL: &str = "https://api.kite.trade";

/// Kite Connect login page.
pub const DEFAULT_KITE_LOGIN_URL: &str = "https://kite.zerodha.com/connect/login";

const KITE_VERSION_HEADER: &str = "x-kite-version";
const KITE_VERSION: &str = "3";

/// `hex(sha256(api_key + request_token + api_secret))`, as required by
/// `/session/token`.
pub fn session_checksum(api_key: &str, request_token: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(request_token.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// HTTP client for one Kite Connect app.
///
/// # Example
///
/// ```ignore
/// let client = KiteApiClient::new(KiteCredentials::new("key", "secret"));
/// let holdings = client.list_holdings("request-token").await?;
/// ```
#[derive(Debug, Clone)]
pub struct KiteApiClient {
    client: reqwest::Client,
    credentials: KiteCredentials,
    base_url: String,
}

impl KiteApiClient {
    pub fn new(credentials: KiteCredentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_KITE_API_URL)
    }

    /// Create a client talking to another API host.
    pub fn with_base_url(credentials: KiteCredentials, base_url: &str) -> Self {
        // Idle connections are not kept between logins.
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.credentials.api_key
    }

    fn version_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(KITE_VERSION_HEADER, HeaderValue::from_static(KITE_VERSION));
        headers
    }

    /// Exchange a login `request_token` for a session.
    pub async fn generate_session(&self, request_token: &str) -> Result<KiteSession> {
        let url = format!("{}/session/token", self.base_url);
        debug!("[Kite] POST {}", url);

        let checksum = session_checksum(
            &self.credentials.api_key,
            request_token,
            &self.credentials.api_secret,
        );
        let form = [
            ("api_key", self.credentials.api_key.as_str()),
            ("request_token", request_token),
            ("checksum", checksum.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .headers(Self::version_headers())
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::AuthRejected(format!("request failed: {}", e)))?;

        let session: KiteSession = parse_response(response).await.map_err(Error::AuthRejected)?;
        info!(
            "[Kite] Session created for user {}",
            session.user_id.as_deref().unwrap_or("<unknown>")
        );
        Ok(session)
    }

    /// List the mutual fund holdings visible to `access_token`.
    pub async fn get_mf_holdings(&self, access_token: &str) -> Result<Vec<KiteMfHolding>> {
        let url = format!("{}/mf/holdings", self.base_url);
        debug!("[Kite] GET {}", url);

        let auth = HeaderValue::from_str(&format!(
            "token {}:{}",
            self.credentials.api_key, access_token
        ))
        .map_err(|e| Error::HoldingsFetchFailed(format!("invalid access token: {}", e)))?;

        let mut headers = Self::version_headers();
        headers.insert(AUTHORIZATION, auth);

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| Error::HoldingsFetchFailed(format!("request failed: {}", e)))?;

        parse_response(response)
            .await
            .map_err(Error::HoldingsFetchFailed)
    }
}

/// Read a Kite response body and unwrap its envelope.
///
/// Any transport, status or envelope failure comes back as a message the
/// caller wraps in the error of its step.
async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> std::result::Result<T, String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read response: {}", e))?;
    decode_envelope(status.as_u16(), &body)
}

fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> std::result::Result<T, String> {
    let envelope: KiteEnvelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => {
            return Err(format!("failed to parse response: {}", e));
        }
        Err(_) => {
            return Err(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }
    };

    if !(200..300).contains(&status) || !envelope.is_success() {
        return Err(format!("HTTP {}: {}", status, envelope.error_message()));
    }

    envelope
        .data
        .ok_or_else(|| "response carried no data".to_string())
}

#[async_trait]
impl BrokerApiClient for KiteApiClient {
    fn login_url(&self) -> String {
        format!(
            "{}?v={}&api_key={}",
            DEFAULT_KITE_LOGIN_URL,
            KITE_VERSION,
            urlencoding::encode(&self.credentials.api_key)
        )
    }

    async fn list_holdings(&self, request_token: &str) -> Result<Vec<RawHolding>> {
        let session = self.generate_session(request_token).await?;
        let holdings = self.get_mf_holdings(&session.access_token).await?;
        debug!("[Kite] {} mutual fund holdings", holdings.len());

        holdings.into_iter().map(RawHolding::try_from).collect()
    }
}
