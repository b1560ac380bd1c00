//! Common utilities and types shared across the drive-index crates.
//!
//! This module provides the foundational types used throughout the codebase:
//! the error taxonomy, validated item identifiers, redacted access tokens and
//! the read-only site configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::SiteConfig;
pub use error::{Error, Result};
pub use types::{AccessToken, ItemId};
