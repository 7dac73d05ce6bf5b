//! # Todayd - Today's Tasks Proxy
//!
//! Todayd is a single-endpoint HTTP proxy: each inbound `GET /` performs
//! one outbound call to an Asana user-task-list endpoint, filters the
//! returned tasks down to the ones due today, and answers with their
//! names as a JSON array.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Client                              │
//! └──────────────────────────────────────────────────────────────┘
//!                               │  GET /
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Todayd HTTP Server                       │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                     TodayHandler                       │  │
//! │  │   fetch task list ──► filter "today" ──► JSON array    │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │  GET /user_task_lists/{gid}/tasks
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Asana API (upstream)                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todayd::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // Resolve configuration once at startup; a missing PORT is fatal.
//!     let config = Config::from_env()?;
//!
//!     let source = Arc::new(AsanaClient::new(config.upstream.clone())?);
//!     let handler = TodayHandler::new(source);
//!
//!     // Run the server
//!     Server::new(config, handler).run().await
//! }
//! ```
//!
//! ## Request pipeline
//!
//! 1. Build the outbound request (`completed_since=now`,
//!    `opt_fields=name,assignee_status`, bearer credential)
//! 2. Execute it and require an upstream 200
//! 3. Decode the `{"data": [...]}` envelope with checked decoding
//! 4. Keep records with `assignee_status == "today"`, in upstream order
//! 5. Respond with the names as a JSON array
//!
//! Every failure along the pipeline is request-scoped: it maps to a 400
//! or 422 response with a `{"message": ...}` body and never takes the
//! process down. The upstream credential is configuration, read once at
//! startup, and never appears in logs or response bodies.

pub mod http;
pub mod runtime;
pub mod tasks;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::http::{ApiResponse, StatusCode};
    pub use crate::runtime::{Config, Server, UpstreamConfig};
    pub use crate::tasks::{AsanaClient, HandlerError, Task, TaskList, TaskSource, TodayHandler};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use http::{ApiResponse, StatusCode};
pub use runtime::{Config, Server, UpstreamConfig};
pub use tasks::{AsanaClient, HandlerError, TaskSource, TodayHandler};
