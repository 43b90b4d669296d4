//! Core components of the `tadawul-news` client.
//!
//! This module contains the foundational building blocks of the library:
//! - The main [`NewsClient`] and its builder.
//! - The primary [`NewsError`] type.
//! - Retry and cache policy types.

/// The main client (`NewsClient`), builder, and configuration.
pub mod client;
/// The primary error type (`NewsError`) for the crate.
pub mod error;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

pub use client::{Backoff, CacheMode, NewsClient, NewsClientBuilder, RetryConfig};
pub use error::NewsError;
