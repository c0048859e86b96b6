//! # bulbctl-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **transport port** that adapters must implement:
//!   - [`ports::BulbTransport`] — one status read, one DPS write
//! - Provide the **driving surface** as a use-case struct:
//!   - [`services::BulbService`] — read pipeline (status → schema → state)
//!     and the write surface (power, white mode, colour, scene select,
//!     scene edit)
//! - Provide the bounded [`retry::RetryPolicy`] decorator applied around a
//!   transport by whoever owns it
//!
//! ## Dependency rule
//! Depends on `bulbctl-domain` only (plus `tokio::time` for retry delays).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod error;
pub mod ports;
pub mod retry;
pub mod services;
