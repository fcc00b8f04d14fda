//! Application execution logic.
//!
//! Builds the sync service from the validated configuration and runs it
//! until a shutdown signal arrives.

use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use ddns_sync::config::{ConfigError, ValidatedConfig};
use ddns_sync::service::Service;
use ddns_sync::telemetry::Telemetry;
use ddns_sync::transport::HttpClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The service could not be assembled.
    #[error("Failed to start service: {0}")]
    Setup(#[source] ConfigError),
}

/// Executes the main application loop.
///
/// # Errors
///
/// Returns [`RunError::Setup`] if the HTTP client cannot be created.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires real
/// signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let service = Service::from_config(config).map_err(RunError::Setup)?;

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_shutdown(cancel.clone()));

    run_service(&service, &cancel).await;
    Ok(())
}

/// Runs `service` until `cancel` fires, inside the root span.
async fn run_service<H, T>(service: &Service<H, T>, cancel: &CancellationToken)
where
    H: HttpClient + 'static,
    T: Telemetry + 'static,
{
    tracing::info!(
        "Syncing {} host(s) every {}s",
        service.hosts().len(),
        service.interval().as_secs()
    );

    let root = tracing::info_span!("ddns_sync");
    service.run(cancel).instrument(root).await;

    tracing::info!("Shutdown complete");
}

/// Cancels `token` once a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn cancel_on_shutdown(token: CancellationToken) {
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, finishing current pass...");
    token.cancel();
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
