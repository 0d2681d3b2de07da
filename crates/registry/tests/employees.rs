//! Employee subtype operations against a live Postgres.

mod common;

use person_registry::{DbError, PersonStore, PersonType};
use rust_decimal::Decimal;
use sqlx::PgPool;

use common::{employee, person, registry};

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires database"]
async fn complete_employee_joins_person(pool: PgPool) -> anyhow::Result<()> {
    let mut reg = registry(&pool).await;

    let (boss_person, boss_id) = reg
        .create_employee(
            &person("Boss", "boss@x.com", PersonType::Employee),
            &employee(120_000, "Engineering").with_position("Director"),
        )
        .await?;
    let (_, report_id) = reg
        .create_employee(
            &person("Report", "report@x.com", PersonType::Employee),
            &employee(80_000, "Engineering").with_manager(boss_id),
        )
        .await?;

    let boss = reg.get_employee_complete(boss_id).await?.expect("employee exists");
    assert_eq!(boss.person.person_id, boss_person);
    assert_eq!(boss.salary, Decimal::new(120_000, 0));
    assert_eq!(boss.position.as_deref(), Some("Director"));
    assert_eq!(boss.manager_id, None);

    let report = reg.get_employee_complete(report_id).await?.expect("employee exists");
    assert_eq!(report.manager_id, Some(boss_id));
    assert_eq!(report.department, "Engineering");

    reg.close().await?;
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires database"]
async fn unknown_manager_rolls_back_person_insert(pool: PgPool) -> anyhow::Result<()> {
    let mut reg = registry(&pool).await;

    let err = reg
        .create_employee(
            &person("Orphan", "orphan@x.com", PersonType::Employee),
            &employee(50_000, "Sales").with_manager(31337),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ForeignKeyViolation { ref constraint } if constraint == "employee_manager_fkey"));
    assert!(reg.get_all_persons().await?.is_empty());

    // The email is free again because nothing was committed.
    reg.create_employee(&person("Orphan", "orphan@x.com", PersonType::Employee), &employee(50_000, "Sales"))
        .await?;
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires database"]
async fn department_filter_orders_by_name(pool: PgPool) -> anyhow::Result<()> {
    let mut reg = registry(&pool).await;

    for (name, email, dept) in [
        ("Yusuf", "y@x.com", "Sales"),
        ("Ines", "i@x.com", "Sales"),
        ("Kai", "k@x.com", "Support"),
    ] {
        reg.create_employee(&person(name, email, PersonType::Employee), &employee(40_000, dept))
            .await?;
    }

    let sales: Vec<String> = reg
        .get_employees_by_department("Sales")
        .await?
        .into_iter()
        .map(|e| e.person.name)
        .collect();
    assert_eq!(sales, ["Ines", "Yusuf"]);
    assert!(reg.get_employees_by_department("Legal").await?.is_empty());
    assert_eq!(reg.get_all_employees().await?.len(), 3);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires database"]
async fn department_statistics_aggregate_salaries(pool: PgPool) -> anyhow::Result<()> {
    let mut reg = registry(&pool).await;

    for (name, email, salary, dept) in [
        ("E1", "e1@x.com", 80_000, "Engineering"),
        ("E2", "e2@x.com", 100_000, "Engineering"),
        ("S1", "s1@x.com", 50_000, "Sales"),
    ] {
        reg.create_employee(&person(name, email, PersonType::Employee), &employee(salary, dept))
            .await?;
    }

    let stats = reg.get_department_statistics().await?;
    assert_eq!(stats.len(), 2);

    let eng = &stats[0];
    assert_eq!(eng.department, "Engineering");
    assert_eq!(eng.employee_count, 2);
    assert_eq!(eng.avg_salary, Decimal::new(90_000, 0));
    assert_eq!(eng.min_salary, Decimal::new(80_000, 0));
    assert_eq!(eng.max_salary, Decimal::new(100_000, 0));
    assert_eq!(eng.total_salary, Decimal::new(180_000, 0));

    assert_eq!(stats[1].department, "Sales");
    assert_eq!(stats[1].employee_count, 1);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires database"]
async fn salary_update_and_role_removal(pool: PgPool) -> anyhow::Result<()> {
    let mut reg = registry(&pool).await;

    let (person_id, employee_id) = reg
        .create_employee(&person("Raise", "raise@x.com", PersonType::Employee), &employee(60_000, "Ops"))
        .await?;

    assert!(reg.update_salary(employee_id, Decimal::new(6_550_050, 2)).await?);
    let record = reg.get_employee_complete(employee_id).await?.expect("employee exists");
    assert_eq!(record.salary, Decimal::new(6_550_050, 2));

    assert!(reg.delete_employee(employee_id).await?);
    assert!(reg.get_employee_complete(employee_id).await?.is_none());
    assert!(reg.get_person(person_id).await?.is_some());
    assert!(!reg.update_salary(employee_id, Decimal::ONE).await?);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires database"]
async fn deleting_person_cascades_to_employee(pool: PgPool) -> anyhow::Result<()> {
    let mut reg = registry(&pool).await;

    let (person_id, employee_id) = reg
        .create_employee(&person("Leaver", "leaver@x.com", PersonType::Employee), &employee(45_000, "Ops"))
        .await?;

    assert!(reg.delete_person(person_id).await?);
    assert!(reg.get_employee_complete(employee_id).await?.is_none());
    assert!(reg.demonstrate_projection().await?.is_empty());
    Ok(())
}
