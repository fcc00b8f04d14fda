//! ddns-sync: keeps Dynamic DNS records pointed at the current public IP.
//!
//! On a fixed delay the service asks an IP-echo endpoint for the public
//! address, then sends one dyndns2 update per configured host, all in
//! parallel. Each provider answer is classified as updated, unchanged or
//! failed and reported through an injected [`telemetry::Telemetry`] sink.

pub mod config;
pub mod engine;
pub mod provider;
pub mod resolver;
pub mod scheduler;
pub mod service;
pub mod telemetry;
pub mod transport;

#[cfg(test)]
mod test_support;
