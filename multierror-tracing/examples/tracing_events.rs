//! Logging every error of a `MultiError` as its own tracing event.
//!
//! Run with `MULTIERROR_TRACING=summary` to only log the summary events.

use multierror::{MultiError, join};
use multierror_tracing::{TraceErrors, TraceResultExt};
use tracing::{Level, instrument};
use tracing_subscriber::{Registry, layer::SubscriberExt};

#[derive(Debug, thiserror::Error)]
#[error("replica {0} did not acknowledge the write")]
struct ReplicaTimeout(u8);

#[derive(Debug, thiserror::Error)]
#[error("checksum mismatch on block {0}")]
struct ChecksumMismatch(u64);

#[instrument]
fn replicate(block: u64) -> Result<(), MultiError> {
    match join!(ReplicaTimeout(2), ChecksumMismatch(block), ReplicaTimeout(5)) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

fn main() {
    let subscriber = Registry::default().with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).expect("failed to set default subscriber");

    let _ = replicate(41).trace_err(Level::WARN);

    let cleanup = join!(None::<ReplicaTimeout>, None::<ReplicaTimeout>);
    // Nothing is logged for None
    cleanup.trace_errors(Level::ERROR);
}
