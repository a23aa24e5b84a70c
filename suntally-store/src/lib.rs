// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # suntally Store
//!
//! Local persistence for the suntally report exporter.
//!
//! This crate provides:
//!
//! - **TokenCache**: the bearer credential persisted between runs
//! - **Persistence**: file I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use suntally_store::TokenCache;
//!
//! let cache = TokenCache::at_default_path();
//!
//! // None on a missing, unreadable, or corrupt record
//! if let Some(credential) = cache.load().await {
//!     // ...
//! }
//! ```

pub mod error;
pub mod persistence;
pub mod token_cache;

pub use error::StoreError;
pub use persistence::{load_json, save_json};
pub use token_cache::{TokenCache, DEFAULT_CACHE_PATH};
