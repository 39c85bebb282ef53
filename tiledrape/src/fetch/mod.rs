//! Tile resource fetching
//!
//! All network access goes through the [`AsyncHttpClient`] trait so the
//! assembler can be driven by a mock client in tests.

mod error;
mod http;

pub use error::FetchError;
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

#[cfg(test)]
pub use http::tests::MockHttpClient;
