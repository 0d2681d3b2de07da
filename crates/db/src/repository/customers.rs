//! Customer (subtype) operations.

use sqlx::{Connection, PgConnection};
use tracing::{debug, warn};

use crate::{
    DbError,
    models::{CustomerRecord, CustomerTier, NewCustomer, NewPerson},
    repository::persons,
};

const CUSTOMER_COLUMNS: &str = "person_id, name, address, phone, email, person_type, \
    created_date, last_modified, customer_id, loyalty_points, registration_date, customer_tier";

/// Insert a person and the customer row that references it as one unit.
///
/// Runs inside its own transaction (a savepoint when the connection is
/// already in one): if the customer insert fails, the person insert is
/// rolled back before the error is returned.
///
/// Returns `(person_id, customer_id)`.
pub async fn create_customer(
    conn: &mut PgConnection,
    person: &NewPerson,
    customer: &NewCustomer,
) -> Result<(i32, i32), DbError> {
    let mut tx = conn.begin().await?;

    match insert_pair(&mut tx, person, customer).await {
        Ok(ids) => {
            tx.commit().await?;
            debug!(person_id = ids.0, customer_id = ids.1, "customer created");
            Ok(ids)
        }
        Err(err) => {
            warn!(error = %err, "customer creation failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "rollback after failed customer creation failed");
            }
            Err(err)
        }
    }
}

async fn insert_pair(
    conn: &mut PgConnection,
    person: &NewPerson,
    customer: &NewCustomer,
) -> Result<(i32, i32), DbError> {
    let person_id = persons::create_person(&mut *conn, person).await?;
    let customer_id = add_customer_role(&mut *conn, person_id, customer).await?;
    Ok((person_id, customer_id))
}

/// Give an existing person the customer role; returns the new `customer_id`.
///
/// Fails with `DbError::ForeignKeyViolation` if the person does not exist and
/// `DbError::UniqueViolation` if it already is a customer.
pub async fn add_customer_role(
    conn: &mut PgConnection,
    person_id: i32,
    customer: &NewCustomer,
) -> Result<i32, DbError> {
    let customer_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO customer (person_id, loyalty_points, customer_tier, registration_date)
        VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE))
        RETURNING customer_id
        "#,
    )
    .bind(person_id)
    .bind(customer.loyalty_points)
    .bind(customer.customer_tier)
    .bind(customer.registration_date)
    .fetch_one(conn)
    .await?;

    debug!(person_id, customer_id, "customer role added");
    Ok(customer_id)
}

/// Fetch the joined person + customer record for one customer.
pub async fn get_customer_complete(
    conn: &mut PgConnection,
    customer_id: i32,
) -> Result<Option<CustomerRecord>, DbError> {
    let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM v_customer_complete WHERE customer_id = $1");
    let row = sqlx::query_as::<_, CustomerRecord>(&sql)
        .bind(customer_id)
        .fetch_optional(conn)
        .await?;

    Ok(row)
}

/// Return every customer, ordered by name.
pub async fn get_all_customers(conn: &mut PgConnection) -> Result<Vec<CustomerRecord>, DbError> {
    let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM v_customer_complete ORDER BY name, customer_id");
    let rows = sqlx::query_as::<_, CustomerRecord>(&sql)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Return the customers of one tier, highest loyalty balance first.
pub async fn get_customers_by_tier(
    conn: &mut PgConnection,
    tier: CustomerTier,
) -> Result<Vec<CustomerRecord>, DbError> {
    let sql = format!(
        "SELECT {CUSTOMER_COLUMNS} FROM v_customer_complete \
         WHERE customer_tier = $1 \
         ORDER BY loyalty_points DESC, customer_id"
    );
    let rows = sqlx::query_as::<_, CustomerRecord>(&sql)
        .bind(tier)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Add `delta` (possibly negative) to a customer's loyalty balance in a
/// single statement. Returns `false` if the customer does not exist.
pub async fn update_loyalty_points(
    conn: &mut PgConnection,
    customer_id: i32,
    delta: i32,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        r#"
        UPDATE customer
        SET loyalty_points = loyalty_points + $1
        WHERE customer_id = $2
        "#,
    )
    .bind(delta)
    .bind(customer_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Move a customer to another tier. Returns `false` if the customer does
/// not exist.
pub async fn update_customer_tier(
    conn: &mut PgConnection,
    customer_id: i32,
    tier: CustomerTier,
) -> Result<bool, DbError> {
    let result = sqlx::query("UPDATE customer SET customer_tier = $1 WHERE customer_id = $2")
        .bind(tier)
        .bind(customer_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove the customer role only; the owning person row stays.
pub async fn delete_customer(conn: &mut PgConnection, customer_id: i32) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM customer WHERE customer_id = $1")
        .bind(customer_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
