//! Core components of the `earnings-cal` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`EcClient`] and its builder.
//! - The internal [`EcError`] type.
//! - Credential handling for keyed providers.
//! - Internal networking and cookie/crumb session logic.

/// The main client (`EcClient`), builder, and configuration.
pub mod client;
/// Provider API keys and environment variable names.
pub mod config;
/// The internal error type (`EcError`).
pub mod error;
pub(crate) mod net;
pub(crate) mod wire;

pub use client::{EcClient, EcClientBuilder};
pub use config::ApiKey;
pub use error::EcError;
