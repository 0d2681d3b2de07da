//! Repository functions, one function per database operation.
//!
//! Every function takes a `&mut PgConnection` and returns a
//! `Result<T, DbError>`. Lookups report absence as `None` / `false` /
//! an empty `Vec`, never as an error.

pub mod algebra;
pub mod customers;
pub mod employees;
pub mod persons;
