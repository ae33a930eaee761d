//! HTTP API: the interactive prediction surface.
//!
//! One submit → one encode→predict→classify cycle. Per-request failures are
//! reported with the offending input echoed back; the surface stays up for
//! a retry. The process never starts serving without loaded artifacts.

pub mod handlers;
pub mod routes;
pub mod state;
pub mod types;

pub use routes::create_router;
pub use state::AppState;
