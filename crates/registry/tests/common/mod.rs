//! Shared fixtures for the store-backed tests.
//!
//! Each test gets a fresh, migrated database from `#[sqlx::test]`; the
//! registry takes one connection out of the test pool.

#![allow(dead_code)]

use person_registry::{NewCustomer, NewEmployee, NewPerson, PersonRegistry, PersonType};
use rust_decimal::Decimal;
use sqlx::PgPool;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn registry(pool: &PgPool) -> PersonRegistry {
    init_tracing();
    let conn = pool.acquire().await.expect("acquire connection").detach();
    PersonRegistry::from_connection(conn)
}

pub fn person(name: &str, email: &str, person_type: PersonType) -> NewPerson {
    NewPerson::new(name, email, person_type)
        .with_address("1 Test Street")
        .with_phone("555-0100")
}

pub fn customer(points: i32) -> NewCustomer {
    NewCustomer { loyalty_points: points, ..NewCustomer::default() }
}

pub fn employee(salary: i64, department: &str) -> NewEmployee {
    NewEmployee::new(Decimal::new(salary, 0), department)
}
