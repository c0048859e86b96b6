//! Application services — use-case implementations.
//!
//! Each service accepts a port trait implementation via a generic parameter
//! (constructor injection), keeping this layer decoupled from concrete
//! transports.

pub mod bulb_service;

pub use bulb_service::BulbService;
