//! Typed error type for the db crate.
//!
//! Constraint violations reported by Postgres are split out into their own
//! variants so callers can tell a duplicate email from a dangling reference
//! without inspecting SQLSTATE codes.

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A `UNIQUE` constraint rejected the statement (e.g. duplicate email).
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A `FOREIGN KEY` constraint rejected the statement.
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// A required column was given NULL.
    #[error("not-null constraint violated: {constraint}")]
    NotNullViolation { constraint: String },

    /// A `CHECK` constraint rejected the statement (e.g. unknown tier).
    #[error("check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    /// Field name outside the updatable whitelist.
    #[error("unknown or non-updatable field: '{0}'")]
    UnknownField(String),

    /// Value not acceptable for the named field.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("sqlx error: {0}")]
    Sqlx(sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let Some(db_err) = err.as_database_error() else {
            return Self::Sqlx(err);
        };

        let constraint = db_err.constraint().unwrap_or("unnamed").to_string();
        match db_err.kind() {
            ErrorKind::UniqueViolation => Self::UniqueViolation { constraint },
            ErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation { constraint },
            ErrorKind::NotNullViolation => Self::NotNullViolation { constraint },
            ErrorKind::CheckViolation => Self::CheckViolation { constraint },
            _ => Self::Sqlx(err),
        }
    }
}

impl DbError {
    /// `true` for any of the store-reported constraint violations.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueViolation { .. }
                | Self::ForeignKeyViolation { .. }
                | Self::NotNullViolation { .. }
                | Self::CheckViolation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_generic() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn constraint_variants_are_flagged() {
        let err = DbError::UniqueViolation { constraint: "person_email_key".into() };
        assert!(err.is_constraint_violation());
        assert_eq!(err.to_string(), "unique constraint violated: person_email_key");

        let err = DbError::UnknownField("salary".into());
        assert!(!err.is_constraint_violation());
    }
}
