//! Single Postgres connection and schema migrations.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, ConnectOptions};
use tracing::info;

use crate::DbError;

/// Open one connection to the store.
pub async fn connect(options: &PgConnectOptions) -> Result<PgConnection, DbError> {
    info!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or_default(),
        "Connecting to database"
    );
    let conn = options.connect().await?;
    Ok(conn)
}

/// Run the embedded SQLx migrations located in `./migrations` (relative to
/// the workspace root at build time).
pub async fn run_migrations(conn: &mut PgConnection) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(conn).await?;
    Ok(())
}

/// Cheap liveness probe.
pub async fn ping(conn: &mut PgConnection) -> Result<(), DbError> {
    conn.ping().await?;
    Ok(())
}
