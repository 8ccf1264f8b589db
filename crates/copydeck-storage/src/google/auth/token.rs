//! Access-token source with an in-process cache.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::{debug, info};

use copydeck_core::config::drive::DriveConfig;
use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;

use super::claims::AssertionClaims;
use crate::google::error::{classify, transport};
use crate::google::wire::TokenResponse;

/// Refresh this long before the cached token expires.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Clone)]
struct CachedToken {
    value: SecretString,
    expires_at: DateTime<Utc>,
}

/// Mints and caches access tokens for the configured service account.
///
/// Credentials are checked on first use so a server without Drive
/// credentials still starts and reports a configuration error per request.
pub struct TokenSource {
    http: reqwest::Client,
    email: String,
    private_key: SecretString,
    scopes: Vec<String>,
    token_uri: String,
    cached: RwLock<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSource")
            .field("email", &self.email)
            .field("private_key", &"[REDACTED]")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl TokenSource {
    pub fn new(config: &DriveConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            email: config.service_account_email.trim().to_string(),
            private_key: SecretString::from(config.private_key_pem()),
            scopes: config.scopes.clone(),
            token_uri: config.token_uri.clone(),
            cached: RwLock::new(None),
        }
    }

    /// Return a valid access token, minting a new one when needed.
    pub async fn access_token(&self) -> AppResult<SecretString> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                if Utc::now() + chrono::Duration::seconds(EXPIRY_MARGIN_SECONDS) < token.expires_at {
                    return Ok(token.value.clone());
                }
            }
        }

        let mut cached = self.cached.write().await;
        // Another task may have refreshed while we waited for the write lock.
        if let Some(token) = cached.as_ref() {
            if Utc::now() + chrono::Duration::seconds(EXPIRY_MARGIN_SECONDS) < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.mint().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    fn assertion(&self, now: i64) -> AppResult<String> {
        if self.email.is_empty() || self.private_key.expose_secret().trim().is_empty() {
            return Err(AppError::configuration(
                "Google service account credentials not configured",
            ));
        }

        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())
            .map_err(|e| AppError::configuration(format!("Invalid service account key: {e}")))?;
        let claims = AssertionClaims::new(&self.email, &self.scopes, &self.token_uri, now);

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| AppError::internal(format!("Failed to sign token assertion: {e}")))
    }

    async fn mint(&self) -> AppResult<CachedToken> {
        let now = Utc::now();
        let assertion = self.assertion(now.timestamp())?;

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", JWT_BEARER_GRANT)
            .append_pair("assertion", &assertion)
            .finish();

        debug!(token_uri = %self.token_uri, "Requesting service account access token");

        let response = self
            .http
            .post(&self.token_uri)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| transport("token exchange", e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify("token exchange", status, &text));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| transport("token exchange", e))?;

        info!(
            email = %self.email,
            expires_in = token.expires_in,
            "Service account access token issued"
        );

        Ok(CachedToken {
            value: SecretString::from(token.access_token),
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        })
    }
}
