//! # Clausewise HTTP API
//!
//! Axum server exposing the contract analysis pipeline:
//!
//! - `GET /health` - liveness and build information
//! - `POST /api/analyze` - multipart upload (field `file`)
//! - `POST /api/analyze/text` - JSON `{ "filename"?, "text" }`
//!
//! Errors are returned as JSON `{ "error": "..." }`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod shutdown;
pub mod upload;

pub use config::HttpConfig;
pub use error::{HttpError, HttpResult};
pub use router::{AppState, router, serve};
pub use shutdown::shutdown_signal;
