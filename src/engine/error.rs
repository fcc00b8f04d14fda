//! Error types for reconcile passes.

use http::StatusCode;
use thiserror::Error;

use crate::resolver::ResolveError;
use crate::transport::HttpError;

/// Why a reconcile pass did not fully succeed.
#[derive(Debug, Error)]
pub enum TickError {
    /// The public IP could not be determined; no host was updated.
    #[error("Failed to get public IP address: {0}")]
    IpResolution(#[source] ResolveError),

    /// At least one host update failed. Which hosts failed is reported
    /// per host and recorded in the pass's outcomes.
    #[error("{failed} of {total} host update(s) failed")]
    HostUpdates {
        /// Number of failed hosts
        failed: usize,
        /// Number of hosts attempted
        total: usize,
    },
}

/// Failure of a single host update.
#[derive(Debug, Error)]
pub enum HostUpdateError {
    /// No response was received from the provider.
    #[error("Failed to make request to Dynamic DNS service for {hostname}: {source}")]
    Transport {
        /// Host being updated
        hostname: String,
        /// Underlying transport failure
        #[source]
        source: HttpError,
    },

    /// The provider answered, but not with a success code.
    #[error("Dynamic DNS service rejected update for {hostname}: {detail}")]
    Rejected {
        /// Host being updated
        hostname: String,
        /// HTTP status of the response
        status: StatusCode,
        /// Status line or raw response body
        detail: String,
    },

    /// The update task ended without producing a result.
    #[error("Update task for {hostname} did not complete: {reason}")]
    Aborted {
        /// Host being updated
        hostname: String,
        /// Panic or cancellation message
        reason: String,
    },
}

impl HostUpdateError {
    /// Returns the hostname the failure belongs to.
    #[must_use]
    pub fn hostname(&self) -> &str {
        match self {
            Self::Transport { hostname, .. }
            | Self::Rejected { hostname, .. }
            | Self::Aborted { hostname, .. } => hostname,
        }
    }
}
