//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundary between the codec core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod transport;

pub use transport::{BulbTransport, DpsWrite};
