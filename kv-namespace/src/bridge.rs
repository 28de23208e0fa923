// kv-namespace/src/bridge.rs
// The one place a deferred remote result is awaited.

use shared::{Error, Result};
use tracing::warn;

use crate::ports::Deferred;

/// Wait for a deferred remote result.
///
/// The calling task is parked until the remote side settles, so other tasks
/// on the runtime keep running. A rejection becomes [`Error::Remote`] with the
/// remote message unchanged.
pub async fn resolve<T>(operation: &'static str, deferred: Deferred<T>) -> Result<T> {
    match deferred.await {
        Ok(value) => Ok(value),
        Err(failure) => {
            warn!("Remote {} rejected: {}", operation, failure);
            Err(Error::remote(operation, failure.message))
        }
    }
}
