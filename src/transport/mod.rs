//! HTTP transport shared by the IP resolver and the DDNS update client.
//!
//! This module provides:
//! - Request and response values ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction ([`HttpClient`])
//! - The production client backed by a pooled reqwest client ([`ReqwestClient`])

mod client;
mod error;
mod request;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
