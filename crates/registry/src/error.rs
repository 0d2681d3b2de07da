//! Registry-level error type.

use thiserror::Error;

use crate::ConfigError;

/// Errors from building a registry: bad configuration or a store failure.
///
/// Operations on an open registry return [`db::DbError`] directly.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}
