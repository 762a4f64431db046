//! herodex: HTTP API for heroes, powers, and hero-power links
//!
//! Exposes a small relational data API over HTTP: heroes and powers are
//! read-only (except a power's description, which is patchable), and
//! hero-power links are created through a validated write endpoint.

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use db::Database;
pub use error::{ServerError, ServerResult};
pub use server::{create_router, run_server, ServerArgs};
