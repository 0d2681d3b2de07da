//! Employee (subtype) operations and salary aggregation.

use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection};
use tracing::{debug, warn};

use crate::{
    DbError,
    models::{DepartmentStats, EmployeeRecord, NewEmployee, NewPerson},
    repository::persons,
};

const EMPLOYEE_COLUMNS: &str = "person_id, name, address, phone, email, person_type, \
    created_date, last_modified, employee_id, salary, department, hire_date, position, manager_id";

/// Insert a person and the employee row that references it as one unit.
///
/// Same contract as [`crate::repository::customers::create_customer`]: a
/// failed employee insert (e.g. unknown `manager_id`) leaves no person row
/// behind. Returns `(person_id, employee_id)`.
pub async fn create_employee(
    conn: &mut PgConnection,
    person: &NewPerson,
    employee: &NewEmployee,
) -> Result<(i32, i32), DbError> {
    let mut tx = conn.begin().await?;

    match insert_pair(&mut tx, person, employee).await {
        Ok(ids) => {
            tx.commit().await?;
            debug!(person_id = ids.0, employee_id = ids.1, "employee created");
            Ok(ids)
        }
        Err(err) => {
            warn!(error = %err, "employee creation failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "rollback after failed employee creation failed");
            }
            Err(err)
        }
    }
}

async fn insert_pair(
    conn: &mut PgConnection,
    person: &NewPerson,
    employee: &NewEmployee,
) -> Result<(i32, i32), DbError> {
    let person_id = persons::create_person(&mut *conn, person).await?;
    let employee_id = add_employee_role(&mut *conn, person_id, employee).await?;
    Ok((person_id, employee_id))
}

/// Give an existing person the employee role; returns the new `employee_id`.
///
/// Fails with `DbError::ForeignKeyViolation` if the person (or the manager)
/// does not exist and `DbError::UniqueViolation` if it already is an employee.
pub async fn add_employee_role(
    conn: &mut PgConnection,
    person_id: i32,
    employee: &NewEmployee,
) -> Result<i32, DbError> {
    let employee_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO employee (person_id, salary, department, hire_date, position, manager_id)
        VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), $5, $6)
        RETURNING employee_id
        "#,
    )
    .bind(person_id)
    .bind(employee.salary)
    .bind(&employee.department)
    .bind(employee.hire_date)
    .bind(&employee.position)
    .bind(employee.manager_id)
    .fetch_one(conn)
    .await?;

    debug!(person_id, employee_id, "employee role added");
    Ok(employee_id)
}

/// Fetch the joined person + employee record for one employee.
pub async fn get_employee_complete(
    conn: &mut PgConnection,
    employee_id: i32,
) -> Result<Option<EmployeeRecord>, DbError> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM v_employee_complete WHERE employee_id = $1");
    let row = sqlx::query_as::<_, EmployeeRecord>(&sql)
        .bind(employee_id)
        .fetch_optional(conn)
        .await?;

    Ok(row)
}

/// Return every employee, ordered by name.
pub async fn get_all_employees(conn: &mut PgConnection) -> Result<Vec<EmployeeRecord>, DbError> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM v_employee_complete ORDER BY name, employee_id");
    let rows = sqlx::query_as::<_, EmployeeRecord>(&sql)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Return the employees of one department, ordered by name.
pub async fn get_employees_by_department(
    conn: &mut PgConnection,
    department: &str,
) -> Result<Vec<EmployeeRecord>, DbError> {
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM v_employee_complete \
         WHERE department = $1 \
         ORDER BY name, employee_id"
    );
    let rows = sqlx::query_as::<_, EmployeeRecord>(&sql)
        .bind(department)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Salary count / avg / min / max / sum per department, highest average
/// first.
pub async fn get_department_statistics(
    conn: &mut PgConnection,
) -> Result<Vec<DepartmentStats>, DbError> {
    let rows = sqlx::query_as::<_, DepartmentStats>(
        r#"
        SELECT
            department,
            COUNT(*)              AS employee_count,
            ROUND(AVG(salary), 2) AS avg_salary,
            MIN(salary)           AS min_salary,
            MAX(salary)           AS max_salary,
            SUM(salary)           AS total_salary
        FROM employee
        GROUP BY department
        ORDER BY avg_salary DESC, department
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Set a new salary. Returns `false` if the employee does not exist.
pub async fn update_salary(
    conn: &mut PgConnection,
    employee_id: i32,
    salary: Decimal,
) -> Result<bool, DbError> {
    let result = sqlx::query("UPDATE employee SET salary = $1 WHERE employee_id = $2")
        .bind(salary)
        .bind(employee_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove the employee role only; the owning person row stays.
pub async fn delete_employee(conn: &mut PgConnection, employee_id: i32) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM employee WHERE employee_id = $1")
        .bind(employee_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
