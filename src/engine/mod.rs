//! Reconcile engine: one pass of resolve-then-update.
//!
//! A pass resolves the public IP exactly once, then launches one task per
//! configured host, all at the same time and with no concurrency cap. A
//! failing host never cancels its siblings; the pass waits for every task
//! and reports an aggregate error if any host failed.

mod error;
mod reconciler;


pub use error::{HostUpdateError, TickError};
pub use reconciler::{HostOutcome, Reconciler, TickResult};
