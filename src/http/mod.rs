//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → request.rs (request ID)
//!     → health handler (aggregate probes)
//!     → JSON body, always 200 OK
//! ```

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
