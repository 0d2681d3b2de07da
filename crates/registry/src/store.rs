//! The `PersonStore` trait: the full operation set, shared by the
//! registry and its sessions.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use db::{
    DbError, PersonUpdate,
    models::{
        Contact, CustomerRecord, CustomerTier, DepartmentStats, DualRolePerson, EmployeeRecord,
        HighValueCustomer, NewCustomer, NewEmployee, NewPerson, Person, RoleDifference,
    },
    repository::{algebra, customers, employees, persons},
};

/// Every read and write the registry offers.
///
/// Implementors only supply the connection the statements run on; which
/// transaction they land in is decided by the implementor (see
/// [`crate::PersonRegistry`] and [`crate::Session`]).
#[async_trait]
pub trait PersonStore: Send {
    /// Connection the next statement runs on.
    fn connection(&mut self) -> &mut PgConnection;

    // ------ persons ------

    /// Insert a person; returns the new `person_id`.
    async fn create_person(&mut self, person: &NewPerson) -> Result<i32, DbError> {
        persons::create_person(self.connection(), person).await
    }

    async fn get_person(&mut self, person_id: i32) -> Result<Option<Person>, DbError> {
        persons::get_person(self.connection(), person_id).await
    }

    /// All persons, ordered by name.
    async fn get_all_persons(&mut self) -> Result<Vec<Person>, DbError> {
        persons::get_all_persons(self.connection()).await
    }

    /// Apply a partial update. An empty patch is a no-op returning `false`.
    async fn update_person(&mut self, person_id: i32, update: &PersonUpdate) -> Result<bool, DbError> {
        persons::update_person(self.connection(), person_id, update).await
    }

    /// Delete a person together with its customer / employee rows.
    async fn delete_person(&mut self, person_id: i32) -> Result<bool, DbError> {
        persons::delete_person(self.connection(), person_id).await
    }

    // ------ customers ------

    /// Insert person + customer atomically; returns `(person_id, customer_id)`.
    async fn create_customer(
        &mut self,
        person: &NewPerson,
        customer: &NewCustomer,
    ) -> Result<(i32, i32), DbError> {
        customers::create_customer(self.connection(), person, customer).await
    }

    /// Attach the customer role to an existing person.
    async fn add_customer_role(&mut self, person_id: i32, customer: &NewCustomer) -> Result<i32, DbError> {
        customers::add_customer_role(self.connection(), person_id, customer).await
    }

    async fn get_customer_complete(&mut self, customer_id: i32) -> Result<Option<CustomerRecord>, DbError> {
        customers::get_customer_complete(self.connection(), customer_id).await
    }

    async fn get_all_customers(&mut self) -> Result<Vec<CustomerRecord>, DbError> {
        customers::get_all_customers(self.connection()).await
    }

    async fn get_customers_by_tier(&mut self, tier: CustomerTier) -> Result<Vec<CustomerRecord>, DbError> {
        customers::get_customers_by_tier(self.connection(), tier).await
    }

    /// Add `delta` to the loyalty balance; `false` if no such customer.
    async fn update_loyalty_points(&mut self, customer_id: i32, delta: i32) -> Result<bool, DbError> {
        customers::update_loyalty_points(self.connection(), customer_id, delta).await
    }

    async fn update_customer_tier(&mut self, customer_id: i32, tier: CustomerTier) -> Result<bool, DbError> {
        customers::update_customer_tier(self.connection(), customer_id, tier).await
    }

    async fn delete_customer(&mut self, customer_id: i32) -> Result<bool, DbError> {
        customers::delete_customer(self.connection(), customer_id).await
    }

    // ------ employees ------

    /// Insert person + employee atomically; returns `(person_id, employee_id)`.
    async fn create_employee(
        &mut self,
        person: &NewPerson,
        employee: &NewEmployee,
    ) -> Result<(i32, i32), DbError> {
        employees::create_employee(self.connection(), person, employee).await
    }

    /// Attach the employee role to an existing person.
    async fn add_employee_role(&mut self, person_id: i32, employee: &NewEmployee) -> Result<i32, DbError> {
        employees::add_employee_role(self.connection(), person_id, employee).await
    }

    async fn get_employee_complete(&mut self, employee_id: i32) -> Result<Option<EmployeeRecord>, DbError> {
        employees::get_employee_complete(self.connection(), employee_id).await
    }

    async fn get_all_employees(&mut self) -> Result<Vec<EmployeeRecord>, DbError> {
        employees::get_all_employees(self.connection()).await
    }

    async fn get_employees_by_department(&mut self, department: &str) -> Result<Vec<EmployeeRecord>, DbError> {
        employees::get_employees_by_department(self.connection(), department).await
    }

    async fn get_department_statistics(&mut self) -> Result<Vec<DepartmentStats>, DbError> {
        employees::get_department_statistics(self.connection()).await
    }

    async fn update_salary(&mut self, employee_id: i32, salary: Decimal) -> Result<bool, DbError> {
        employees::update_salary(self.connection(), employee_id, salary).await
    }

    async fn delete_employee(&mut self, employee_id: i32) -> Result<bool, DbError> {
        employees::delete_employee(self.connection(), employee_id).await
    }

    // ------ relational algebra ------

    async fn demonstrate_union(&mut self) -> Result<Vec<Contact>, DbError> {
        algebra::contact_union(self.connection()).await
    }

    async fn demonstrate_intersection(&mut self) -> Result<Vec<DualRolePerson>, DbError> {
        algebra::dual_role_persons(self.connection()).await
    }

    async fn demonstrate_difference(&mut self) -> Result<RoleDifference, DbError> {
        algebra::role_difference(self.connection()).await
    }

    async fn demonstrate_projection(&mut self) -> Result<Vec<String>, DbError> {
        algebra::department_projection(self.connection()).await
    }

    /// Customers with at least `min_loyalty` points
    /// (see [`db::repository::algebra::DEFAULT_MIN_LOYALTY`]).
    async fn demonstrate_selection(&mut self, min_loyalty: i32) -> Result<Vec<HighValueCustomer>, DbError> {
        algebra::high_value_customers(self.connection(), min_loyalty).await
    }
}
