//! Read-only relational algebra queries over the ISA hierarchy.
//!
//! Union, intersection, difference, projection and selection, each written
//! as plain SQL against the current store state.

use sqlx::PgConnection;

use crate::{
    DbError,
    models::{Contact, CustomerOnly, DualRolePerson, EmployeeOnly, HighValueCustomer, RoleDifference},
};

/// Loyalty threshold used by the selection query when the caller has no
/// better number.
pub const DEFAULT_MIN_LOYALTY: i32 = 1000;

/// π[name, phone, email](Person ⋈ Customer) ∪ π[name, phone, email](Person ⋈ Employee)
///
/// Each row is tagged with the role it was reached through. `UNION` drops
/// duplicate rows, so a dual-role person shows up once per role.
pub async fn contact_union(conn: &mut PgConnection) -> Result<Vec<Contact>, DbError> {
    let rows = sqlx::query_as::<_, Contact>(
        r#"
        SELECT p.name, p.phone, p.email, 'Customer' AS role
        FROM person p
        INNER JOIN customer c ON p.person_id = c.person_id
        UNION
        SELECT p.name, p.phone, p.email, 'Employee' AS role
        FROM person p
        INNER JOIN employee e ON p.person_id = e.person_id
        ORDER BY name, role
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// π[person_id](Customer) ∩ π[person_id](Employee), joined back to the
/// person row.
pub async fn dual_role_persons(conn: &mut PgConnection) -> Result<Vec<DualRolePerson>, DbError> {
    let rows = sqlx::query_as::<_, DualRolePerson>(
        r#"
        SELECT
            p.person_id, p.name, p.address, p.phone, p.email, p.person_type,
            p.created_date, p.last_modified,
            c.loyalty_points, e.department
        FROM person p
        INNER JOIN customer c ON p.person_id = c.person_id
        INNER JOIN employee e ON p.person_id = e.person_id
        ORDER BY p.name, p.person_id
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Customer − Employee and Employee − Customer on `person_id`.
///
/// The two sequences never share a person.
pub async fn role_difference(conn: &mut PgConnection) -> Result<RoleDifference, DbError> {
    let customers_only = sqlx::query_as::<_, CustomerOnly>(
        r#"
        SELECT
            p.person_id, p.name, p.address, p.phone, p.email, p.person_type,
            p.created_date, p.last_modified,
            c.loyalty_points
        FROM person p
        INNER JOIN customer c ON p.person_id = c.person_id
        WHERE NOT EXISTS (SELECT 1 FROM employee e WHERE e.person_id = p.person_id)
        ORDER BY p.name, p.person_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let employees_only = sqlx::query_as::<_, EmployeeOnly>(
        r#"
        SELECT
            p.person_id, p.name, p.address, p.phone, p.email, p.person_type,
            p.created_date, p.last_modified,
            e.department, e.salary
        FROM person p
        INNER JOIN employee e ON p.person_id = e.person_id
        WHERE NOT EXISTS (SELECT 1 FROM customer c WHERE c.person_id = p.person_id)
        ORDER BY p.name, p.person_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(RoleDifference { customers_only, employees_only })
}

/// π[department](Employee), sorted.
pub async fn department_projection(conn: &mut PgConnection) -> Result<Vec<String>, DbError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT department FROM employee ORDER BY department",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// σ[loyalty_points ≥ min_loyalty](Person ⋈ Customer), highest balance first.
pub async fn high_value_customers(
    conn: &mut PgConnection,
    min_loyalty: i32,
) -> Result<Vec<HighValueCustomer>, DbError> {
    let rows = sqlx::query_as::<_, HighValueCustomer>(
        r#"
        SELECT p.name, p.email, c.loyalty_points, c.customer_tier
        FROM person p
        INNER JOIN customer c ON p.person_id = c.person_id
        WHERE c.loyalty_points >= $1
        ORDER BY c.loyalty_points DESC, p.name
        "#,
    )
    .bind(min_loyalty)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}
