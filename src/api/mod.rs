//! VLU Report API server module
//!
//! HTTP REST API over the same views as the CLI.
//! Run with `vlu-report-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig, AppState};
