//! Fixed-delay driver for reconcile passes.
//!
//! The first pass runs immediately. After each pass completes the scheduler
//! waits one full interval before starting the next, so passes never overlap
//! and the period is `interval` plus pass duration.

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::Span;

use crate::config::ConfigError;
use crate::engine::{Reconciler, TickResult};
use crate::provider::UpdateClient;
use crate::resolver::IpResolver;
use crate::telemetry::{Fields, Telemetry};

const PING_FAILED: &str = "Failed to ping DNS service";

/// Returned by [`Scheduler::run`] once cancellation has been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("scheduler cancelled")]
pub struct Cancelled;

/// Runs a [`Reconciler`] forever at a fixed delay.
pub struct Scheduler<R, U, T> {
    reconciler: Reconciler<R, U, T>,
    interval: Duration,
}

impl<R, U, T> Scheduler<R, U, T> {
    /// Creates a scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if `interval` is zero.
    pub fn new(reconciler: Reconciler<R, U, T>, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "interval",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            reconciler,
            interval,
        })
    }

    /// Returns the delay between the end of one pass and the start of the next.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the wrapped engine.
    #[must_use]
    pub const fn reconciler(&self) -> &Reconciler<R, U, T> {
        &self.reconciler
    }
}

impl<R, U, T> Scheduler<R, U, T>
where
    R: IpResolver + 'static,
    U: UpdateClient + 'static,
    T: Telemetry + 'static,
{
    /// Runs passes until `cancel` fires.
    ///
    /// Cancellation is only observed between passes: a pass in flight always
    /// completes, then the wait is cut short. A failed pass is reported and
    /// never stops the loop. A token cancelled before the call still gets the
    /// first pass.
    pub async fn run(&self, cancel: &CancellationToken) -> Cancelled {
        let root = Span::current();

        loop {
            self.tick(&root).await;

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    self.reconciler.telemetry().info(
                        &root,
                        "Stopping DNS sync",
                        &Fields::new().with("hosts", self.reconciler.hosts().len()),
                    );
                    return Cancelled;
                }
                () = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// Runs one pass and reports its error, if any.
    pub async fn tick(&self, parent: &Span) -> TickResult {
        let result = self.reconciler.execute(parent).await;

        if let Some(error) = &result.error {
            self.reconciler.telemetry().error(
                parent,
                PING_FAILED,
                &Fields::new().with("error", error),
            );
        }

        result
    }
}
