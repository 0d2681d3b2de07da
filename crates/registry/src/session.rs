//! Scoped transaction over the registry's connection.

use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{info, instrument};

use db::DbError;

use crate::PersonStore;

/// A unit of work: every [`PersonStore`] operation issued through a session
/// joins the same transaction.
///
/// Call [`Session::commit`] to make the work durable. Dropping the session
/// without committing, including leaving a scope early through `?`, rolls
/// everything back. Composite creates run under a savepoint here, so a
/// failed `create_customer` / `create_employee` undoes only its own inserts
/// and the session stays usable.
pub struct Session<'c> {
    tx: Transaction<'c, Postgres>,
}

impl<'c> Session<'c> {
    pub(crate) fn new(tx: Transaction<'c, Postgres>) -> Self {
        Self { tx }
    }

    /// Commit everything done through this session.
    #[instrument(skip(self))]
    pub async fn commit(self) -> Result<(), DbError> {
        self.tx.commit().await?;
        info!("session committed");
        Ok(())
    }

    /// Discard everything done through this session.
    #[instrument(skip(self))]
    pub async fn rollback(self) -> Result<(), DbError> {
        self.tx.rollback().await?;
        info!("session rolled back");
        Ok(())
    }
}

impl PersonStore for Session<'_> {
    fn connection(&mut self) -> &mut PgConnection {
        &mut self.tx
    }
}
