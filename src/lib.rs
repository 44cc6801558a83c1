//! urlmini - A small URL shortener service
//!
//! Maps randomly generated 8-character short IDs to long URLs, redirects
//! visitors and keeps a per-link visit history.
//!
//! # Architecture
//! - `utils`: Short ID generation and URL validation
//! - `storage`: The mapping store trait with in-memory and SQL backends
//! - `services`: Shortening and redirect/analytics business logic
//! - `analytics`: Background visit recording
//! - `api`: HTTP handlers and routing
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and server mode
//! - `system`: Logging setup

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
