//! OneDrive item source for drive-index.
//!
//! Talks to the Microsoft Graph drive API with a bearer token supplied per
//! call. Token refresh is left to the [`TokenProvider`](crate::TokenProvider)
//! implementation.

pub mod client;

pub use client::GraphClient;
