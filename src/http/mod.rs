//! HTTP types for the todayd response surface.

mod response;

pub use response::{ApiResponse, StatusCode};
