//! API error types.

use thiserror::Error;

/// Errors from the Sunsynk API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The account has no plants registered.
    #[error("No plants registered under this account")]
    NoPlants,

    /// The refreshed credential could not be persisted.
    #[error("Failed to cache credential: {0}")]
    CredentialStore(#[from] suntally_store::StoreError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err.to_string())
    }
}
