//! x0xmd - machine-readable discovery surface for the x0x daemon
//!
//! Serves versioned JSON contracts (discovery, capabilities, install,
//! trust, policy, provenance, propagation) derived from a single canonical
//! model, with Accept-header negotiation at the root and a proxied
//! installer script.
//!
//! ## Pipeline
//!
//! Canonical model -> validator (fail-fast at startup) -> artifact builders
//! (pure, re-derived per request) -> router. The installer proxy is the only
//! outbound I/O.

pub mod artifacts;
pub mod config;
pub mod model;
pub mod negotiate;
pub mod ops;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{Result, X0xmdError};
