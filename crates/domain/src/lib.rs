//! # bulbctl-domain
//!
//! Pure domain model for the bulbctl smart-bulb control library.
//!
//! ## Responsibilities
//! - Convert between the percentage domain and the bulb's non-linear byte
//!   encoding (`percent`)
//! - Decode and encode the fixed-width hex "flash scene" records (`flash_scene`)
//! - Normalize the sparse, 1-based DPS map of a raw status reply into a dense
//!   positional vector (`status`)
//! - Bind DPS positions to named schema fields (`schema`)
//! - Project the schema onto the semantic [`state::DeviceState`]
//! - Rebuild and re-encode scene records from partial overrides (`editor`)
//!
//! Every transform is a stateless pure function over an already-materialized
//! input. Malformed device data degrades to absent values, it never errors.
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! It must never import anything from `app` or adapter crates. The network
//! boundary is expressed as a trait in the `app` crate (port).

pub mod colour;
pub mod editor;
pub mod flash_scene;
pub mod percent;
pub mod scene;
pub mod schema;
pub mod state;
pub mod status;
