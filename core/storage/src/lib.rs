//! Upstream drive access for drive-index.
//!
//! This module provides a trait-based interface over the upstream storage
//! provider (Microsoft Graph for OneDrive, or an in-memory drive for tests)
//! and the token-provider seam that supplies bearer credentials.
//!
//! # Design Principles
//! - Provider isolation: no boundary or path logic lives here
//! - Async operations: all upstream I/O is async
//! - Unified error semantics: upstream failures keep their status and body

pub mod memory;
pub mod onedrive;
pub mod provider;
pub mod token;

pub use memory::MemoryDrive;
pub use onedrive::GraphClient;
pub use provider::{DriveItem, ItemSource, ParentReference, ITEM_SELECT};
pub use token::{FnTokenProvider, StaticTokenProvider, TokenProvider, ACCESS_TOKEN_ENV};
