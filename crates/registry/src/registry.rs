//! `PersonRegistry`, owner of the store connection.

use futures::future::BoxFuture;
use sqlx::{Connection, PgConnection};
use tracing::{info, instrument, warn};

use db::DbError;

use crate::{PersonStore, RegistryConfig, RegistryError, Session};

/// Façade over the Person / Customer / Employee store.
///
/// Holds exactly one connection and no cached state; every read goes to the
/// store. Operations called directly on the registry (through
/// [`PersonStore`]) are each their own transaction: single statements commit
/// as they run, composite creates commit both inserts or neither. Use
/// [`PersonRegistry::transaction`] or [`PersonRegistry::session`] to make
/// several operations one transaction.
///
/// One registry per caller: concurrent use would serialize on the single
/// connection, which `&mut self` already enforces.
pub struct PersonRegistry {
    conn: PgConnection,
}

impl PersonRegistry {
    /// Connect using `config`.
    #[instrument(skip(config), fields(host = %config.host, dbname = %config.dbname))]
    pub async fn connect(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let conn = db::connect(&config.connect_options()).await?;
        info!("registry connected");
        Ok(Self { conn })
    }

    /// Connect using `DB_*` environment variables (and `.env`).
    pub async fn connect_from_env() -> Result<Self, RegistryError> {
        let config = RegistryConfig::from_env()?;
        Self::connect(&config).await
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Bring the schema up to date.
    #[instrument(skip(self))]
    pub async fn migrate(&mut self) -> Result<(), DbError> {
        db::run_migrations(&mut self.conn).await
    }

    /// Check the connection is still alive.
    pub async fn ping(&mut self) -> Result<(), DbError> {
        db::connection::ping(&mut self.conn).await
    }

    /// Start a transaction spanning every operation issued through the
    /// returned session, until it is committed or dropped.
    #[instrument(skip(self))]
    pub async fn session(&mut self) -> Result<Session<'_>, DbError> {
        let tx = self.conn.begin().await?;
        info!("session started");
        Ok(Session::new(tx))
    }

    /// Run `work` inside one transaction.
    ///
    /// Commits when `work` returns `Ok` and rolls back when it returns `Err`,
    /// so a scope that exits with an error leaves no partial writes. The
    /// closure may borrow nothing from the caller; move owned values in.
    ///
    /// ```ignore
    /// let customer_id = registry
    ///     .transaction(move |session| Box::pin(async move {
    ///         let (_, id) = session.create_customer(&person, &customer).await?;
    ///         session.update_loyalty_points(id, 50).await?;
    ///         Ok::<_, DbError>(id)
    ///     }))
    ///     .await?;
    /// ```
    #[instrument(skip_all)]
    pub async fn transaction<F, R, E>(&mut self, work: F) -> Result<R, E>
    where
        F: for<'s, 'c> FnOnce(&'s mut Session<'c>) -> BoxFuture<'s, Result<R, E>>,
        E: From<DbError>,
    {
        let mut session = self.session().await?;
        match work(&mut session).await {
            Ok(value) => {
                session.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = session.rollback().await {
                    warn!(error = %rollback_err, "rollback after failed transaction scope failed");
                }
                Err(err)
            }
        }
    }

    /// Close the connection gracefully.
    #[instrument(skip(self))]
    pub async fn close(self) -> Result<(), DbError> {
        self.conn.close().await?;
        info!("registry closed");
        Ok(())
    }
}

impl PersonStore for PersonRegistry {
    fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
