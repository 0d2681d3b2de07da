//! `db` crate — pure persistence layer.
//!
//! Provides connection and migration helpers, typed row structs, and
//! repository functions for the Person / Customer / Employee schema.
//! No transaction policy lives here beyond keeping composite inserts atomic.

pub mod connection;
pub mod error;
pub mod models;
pub mod repository;
pub mod update;

pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use update::PersonUpdate;
