//! Task fetching and filtering.

pub mod client;
pub mod handler;
pub mod model;

pub use client::{AsanaClient, TaskSource};
pub use handler::{HandlerError, TodayHandler};
pub use model::{due_today_names, Task, TaskList};
