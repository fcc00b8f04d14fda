//! DDNS provider protocol: the update request and the response vocabulary.
//!
//! This module provides:
//! - The per-host update abstraction ([`UpdateClient`])
//! - The dyndns2-style implementation used by Google Domains ([`DynDnsClient`])
//! - Response classification ([`classify`], [`Outcome`], [`ProviderCode`])

mod classify;
mod client;


pub use classify::{Outcome, ProviderCode, classify};
pub use client::{DynDnsClient, UpdateClient};
