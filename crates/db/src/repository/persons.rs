//! Person (supertype) CRUD operations.

use sqlx::PgConnection;
use tracing::debug;

use crate::{
    DbError,
    models::{NewPerson, Person},
    update::PersonUpdate,
};

/// Insert a new person and return the store-assigned `person_id`.
///
/// Fails with `DbError::UniqueViolation` when the email is already taken.
pub async fn create_person(conn: &mut PgConnection, person: &NewPerson) -> Result<i32, DbError> {
    let person_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO person (name, address, phone, email, person_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING person_id
        "#,
    )
    .bind(&person.name)
    .bind(&person.address)
    .bind(&person.phone)
    .bind(&person.email)
    .bind(person.person_type)
    .fetch_one(conn)
    .await?;

    debug!(person_id, "person inserted");
    Ok(person_id)
}

/// Fetch a single person by primary key.
pub async fn get_person(conn: &mut PgConnection, person_id: i32) -> Result<Option<Person>, DbError> {
    let row = sqlx::query_as::<_, Person>(
        r#"
        SELECT person_id, name, address, phone, email, person_type, created_date, last_modified
        FROM person
        WHERE person_id = $1
        "#,
    )
    .bind(person_id)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

/// Return all persons ordered by name.
pub async fn get_all_persons(conn: &mut PgConnection) -> Result<Vec<Person>, DbError> {
    let rows = sqlx::query_as::<_, Person>(
        r#"
        SELECT person_id, name, address, phone, email, person_type, created_date, last_modified
        FROM person
        ORDER BY name, person_id
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Apply a partial update in one statement.
///
/// Returns `false` without touching the store when the patch is empty, and
/// `false` when no row has the given id.
pub async fn update_person(
    conn: &mut PgConnection,
    person_id: i32,
    update: &PersonUpdate,
) -> Result<bool, DbError> {
    let Some(mut qb) = update.to_query(person_id) else {
        debug!(person_id, "empty person update ignored");
        return Ok(false);
    };

    let result = qb.build().execute(conn).await?;
    debug!(person_id, fields = ?update.fields(), rows = result.rows_affected(), "person updated");
    Ok(result.rows_affected() > 0)
}

/// Delete a person. The store cascades the delete to any customer and
/// employee rows owned by it.
pub async fn delete_person(conn: &mut PgConnection, person_id: i32) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM person WHERE person_id = $1")
        .bind(person_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
