//! # chat-relay
//!
//! Relays chat messages from a browser front-end to an OpenAI-compatible
//! chat completions API and returns the upstream JSON unchanged.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod proxy;
pub mod state;

pub use api::build_routes;
pub use config::RelayConfig;
pub use error::RelayError;
pub use state::AppState;
