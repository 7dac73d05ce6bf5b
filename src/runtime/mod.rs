//! Todayd runtime - configuration and the HTTP server front end.

mod server;
mod config;

pub use server::Server;
pub use config::{Config, ConfigError, UpstreamConfig, DEFAULT_TASK_LIST_URL};
