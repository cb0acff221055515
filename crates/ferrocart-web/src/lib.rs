//! # Ferrocart Web
//!
//! HTTP API over the assembled platform.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/` | service info and command paths |
//! | GET | `/api/v1/commands` | command documentation |
//! | GET | `/api/v1/providers` | provider documentation |
//! | GET | `/api/v1{path}?provider=..&k=v` | response envelope |
//!
//! Unknown command paths answer 404; other command failures answer 500 with
//! the error code and message in a JSON body.

pub mod error;
pub mod routes;
pub mod server;

pub use error::{ApiError, WebError};
pub use routes::{app, API_PREFIX};
pub use server::{serve, Server};
