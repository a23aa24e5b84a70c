//! Bearer token cache.
//!
//! Persists the credential between runs so consecutive exports within the
//! token's lifetime skip the login round trip. The record lives in a small
//! JSON file:
//!
//! ```json
//! {
//!   "bearerToken": "Bearer eyJhbGci...",
//!   "expiryDate": "2023-08-14 13:30:00"
//! }
//! ```

use std::path::{Path, PathBuf};

use suntally_core::CachedCredential;
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

/// Default cache location, relative to the working directory.
pub const DEFAULT_CACHE_PATH: &str = ".suntally_token.json";

// ============================================================================
// Token Cache
// ============================================================================

/// The persisted bearer credential.
///
/// `load` never fails: a missing, unreadable, or corrupt record is simply
/// "no cached credential" and forces the caller down the refresh path.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Creates a cache backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a cache at [`DEFAULT_CACHE_PATH`].
    pub fn at_default_path() -> Self {
        Self::new(DEFAULT_CACHE_PATH)
    }

    /// The file backing this cache.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted credential, if a readable one exists.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Option<CachedCredential> {
        match load_json::<CachedCredential>(&self.path).await {
            Ok(credential) => {
                debug!("Loaded cached credential");
                Some(credential)
            }
            Err(e) => {
                debug!(error = %e, "No usable cached credential");
                None
            }
        }
    }

    /// Overwrites the persisted credential.
    #[instrument(skip(self, credential), fields(path = %self.path.display()))]
    pub async fn save(&self, credential: &CachedCredential) -> Result<(), StoreError> {
        save_json(&self.path, credential).await?;
        debug!("Saved credential to cache");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
