//! HTTP outbound adapters.
//!
//! This module provides a thin reqwest implementation of the `HttpClient`
//! port.

mod reqwest_client;

pub use reqwest_client::{HttpClientIdentity, ReqwestHttpClient};
