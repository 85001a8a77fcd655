//! HTTP backend for the Admina identity API.
//!
//! [`AdminaClient`] implements [`admina_core::IdentityService`] over the
//! organization-scoped REST endpoints, so the engine never sees a request or
//! a status code.

mod client;
mod wire;

pub mod error;

pub use client::{AdminaClient, ClientConfig, DEFAULT_BASE_URL, redact_proxy};
pub use error::{Error, Result};
pub use wire::Organization;
