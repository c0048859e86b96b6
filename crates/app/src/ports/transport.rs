//! Transport port — the one capability the codec core requires from the
//! outside world.
//!
//! A transport bridges a concrete protocol client (local TCP session, MQTT
//! bridge, a simulated bulb, …) into the system. The core asks it for a raw
//! status vector on read and hands it byte payloads on write; everything
//! else (session handshake, encryption, reconnects) stays behind this trait.

use std::collections::BTreeMap;
use std::future::Future;

use bulbctl_domain::status::RawStatus;

use crate::error::BulbError;

/// A DPS write payload: 1-based string keys mapped to wire values, wrapped
/// and transmitted by the transport as a single write.
pub type DpsWrite = BTreeMap<String, serde_json::Value>;

/// A pluggable device transport.
pub trait BulbTransport: Send + Sync {
    /// Query the device for its raw status.
    ///
    /// An empty [`RawStatus`] is the accepted sentinel for "device did not
    /// answer"; the core projects it to an empty state instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the device cannot be reached.
    fn read_status(&self) -> impl Future<Output = Result<RawStatus, BulbError>> + Send;

    /// Deliver a DPS write to the device.
    ///
    /// # Errors
    ///
    /// Returns [`BulbError::Transport`] when the payload cannot be
    /// delivered.
    fn send(&self, write: DpsWrite) -> impl Future<Output = Result<(), BulbError>> + Send;
}
