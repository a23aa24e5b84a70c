//! Password-grant authentication with token caching.
//!
//! A run first consults the token cache; only a missing or stale credential
//! triggers the login round trip. The refreshed credential is persisted
//! before it is returned, so the next run within the token's lifetime makes
//! no login call at all.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use suntally_core::{expiry_from_day_start, CachedCredential};
use suntally_store::TokenCache;
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::http::HttpClient;

// ============================================================================
// Constants
// ============================================================================

/// Login endpoint, relative to the API base.
const LOGIN_ENDPOINT: &str = "/oauth/token";

/// OAuth grant type sent on login.
const GRANT_TYPE: &str = "password";

/// Client id the vendor's web dashboard identifies itself with.
const CLIENT_ID: &str = "csp-web";

// ============================================================================
// Wire Types
// ============================================================================

/// Login request body.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    grant_type: &'a str,
    client_id: &'a str,
}

/// Login response envelope.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

/// Token grant inside the login response.
#[derive(Debug, Deserialize)]
struct LoginData {
    access_token: String,
    expires_in: i64,
}

// ============================================================================
// Auth Client
// ============================================================================

/// Obtains a bearer token, via the cache when possible.
#[derive(Debug)]
pub struct AuthClient {
    http: HttpClient,
    base_url: String,
    cache: TokenCache,
}

impl AuthClient {
    /// Creates an auth client against `base_url`, backed by `cache`.
    pub fn new(base_url: impl Into<String>, cache: TokenCache) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            cache,
        }
    }

    /// Returns a usable `Authorization` header value.
    ///
    /// A cached credential whose expiry is strictly in the future is
    /// returned unchanged, with no network call. Anything else triggers a
    /// password-grant login; network or parse failures propagate to the
    /// caller, there is no retry.
    #[instrument(skip(self, password))]
    pub async fn bearer_token(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.bearer_token_at(username, password, Local::now().naive_local())
            .await
    }

    /// [`bearer_token`](Self::bearer_token) with an explicit current time,
    /// so the cache-freshness and expiry arithmetic can be pinned in tests.
    pub async fn bearer_token_at(
        &self,
        username: &str,
        password: &str,
        now: NaiveDateTime,
    ) -> Result<String, ApiError> {
        if let Some(credential) = self.cache.load().await {
            if credential.is_fresh(now) {
                debug!(expiry = %credential.expiry, "Using cached bearer token");
                return Ok(credential.bearer_token);
            }
            debug!(expiry = %credential.expiry, "Cached bearer token is stale");
        }

        let grant = self.login(username, password).await?;

        let bearer = format!("Bearer {}", grant.access_token);
        let expiry = expiry_from_day_start(now, grant.expires_in);
        self.cache
            .save(&CachedCredential::new(&bearer, expiry))
            .await?;

        info!(expiry = %expiry, "Obtained new bearer token");
        Ok(bearer)
    }

    /// Issues the password-grant login request.
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        debug!("Requesting new bearer token");

        let url = format!("{}{}", self.base_url, LOGIN_ENDPOINT);
        let body = LoginRequest {
            username,
            password,
            grant_type: GRANT_TYPE,
            client_id: CLIENT_ID,
        };

        let response = self.http.post_json(&url, &body).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::AuthenticationFailed(format!("HTTP {status}")));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("login body: {e}")))?;

        Ok(login.data)
    }
}

// ============================================================================
// Tests
// ============================================================================
