//! Service-account OAuth2 for the Sheets API
//!
//! A JWT assertion signed with the account's RSA key is exchanged at the
//! account's `token_uri` for a bearer token. Tokens are cached until one
//! minute before they expire.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::SheetError;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account key file that token minting needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parse key JSON. Private keys pasted into env vars often carry literal
    /// `\n` sequences; those are turned back into newlines.
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        let mut key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| SheetError::Config(format!("invalid service account JSON: {e}")))?;
        if key.private_key.contains("\\n") {
            key.private_key = key.private_key.replace("\\n", "\n");
        }
        Ok(key)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SheetError::Config(format!(
                "cannot read service account file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Mints and caches bearer tokens for one service account
pub struct TokenProvider {
    client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(client: reqwest::Client, key: ServiceAccountKey) -> Result<Self, SheetError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetError::Config(format!("invalid service account private key: {e}")))?;
        Ok(Self {
            client,
            key,
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    /// A valid bearer token, fetching a new one when the cached token is
    /// missing or within a minute of expiry
    pub async fn access_token(&self) -> Result<String, SheetError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref()
            && token.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
        {
            return Ok(token.access_token.clone());
        }

        let fresh = self.fetch_token(now).await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, SheetError> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| SheetError::Auth(format!("failed to sign assertion: {e}")))
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> Result<CachedToken, SheetError> {
        let assertion = self.sign_assertion(now)?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                client_email = %self.key.client_email,
                "Token exchange rejected"
            );
            return Err(SheetError::Auth(format!("token endpoint returned {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetError::InvalidResponse(format!("token response: {e}")))?;
        let expires_in = token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        tracing::debug!(expires_in, "Obtained Sheets access token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(expires_in),
        })
    }
}
