//! HTTP server module

mod http;

pub use http::{run, AppState};
