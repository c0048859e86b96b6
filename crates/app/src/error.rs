//! Application error types.
//!
//! Only connectivity can fail here. Malformed device *data* never errors:
//! the domain codecs degrade it to absent values.

/// Errors surfaced by the bulb service and transport decorators.
#[derive(Debug, thiserror::Error)]
pub enum BulbError {
    /// The transport failed to reach the device or deliver a payload.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A write was retried up to the policy's limit and never delivered.
    #[error("device unreachable after {attempts} attempts")]
    Unreachable {
        /// How many attempts were made before giving up.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BulbError {
    /// Wrap an adapter-specific failure for propagation across the port
    /// boundary.
    #[must_use]
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}
