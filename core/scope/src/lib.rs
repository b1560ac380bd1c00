//! Scoped access to an upstream drive.
//!
//! Two independent components share only the read-only [`SiteConfig`]:
//! - [`ItemResolver`] looks up an item by ID and hides everything outside the
//!   configured base directory
//! - [`preview`] builds the token-qualified raw-content URL handed to an
//!   embedded document renderer
//!
//! [`SiteConfig`]: driveindex_common::SiteConfig

pub mod preview;
pub mod resolver;

pub use preview::{build_url, ContainerWidth, PreviewEmbed, PreviewRequest};
pub use resolver::{scope_item, ItemResolver, Resolution};
