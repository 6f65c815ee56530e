//! Replication errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplicationError {
    /// The strategy was configured to keep no copies.
    #[error("replica count must be positive")]
    ZeroReplicas,
    /// The underlying ring rejected the lookup.
    #[error(transparent)]
    Ring(#[from] corelib::Error),
}
