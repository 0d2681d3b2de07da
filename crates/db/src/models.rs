//! Row structs that map onto the `person`, `customer` and `employee` tables
//! and onto the joined result sets read from them.
//!
//! These are *persistence* models. They carry no behaviour beyond
//! converting the enumerated text columns.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Text in an enumerated column that matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

// ---------------------------------------------------------------------------
// enumerated columns
// ---------------------------------------------------------------------------

/// Role tag stored on the supertype row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum PersonType {
    Customer,
    Employee,
    Both,
}

impl PersonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Employee => "Employee",
            Self::Both => "Both",
        }
    }
}

impl std::fmt::Display for PersonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PersonType {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(Self::Customer),
            "Employee" => Ok(Self::Employee),
            "Both"     => Ok(Self::Both),
            other      => Err(ParseEnumError { kind: "person type", value: other.to_string() }),
        }
    }
}

/// Customer loyalty tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "text")]
pub enum CustomerTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl CustomerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze   => "Bronze",
            Self::Silver   => "Silver",
            Self::Gold     => "Gold",
            Self::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CustomerTier {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bronze"   => Ok(Self::Bronze),
            "Silver"   => Ok(Self::Silver),
            "Gold"     => Ok(Self::Gold),
            "Platinum" => Ok(Self::Platinum),
            other      => Err(ParseEnumError { kind: "customer tier", value: other.to_string() }),
        }
    }
}

// ---------------------------------------------------------------------------
// person
// ---------------------------------------------------------------------------

/// A persisted person row (the supertype).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub person_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub person_type: PersonType,
    pub created_date: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Insert payload for a person. Identity and timestamps are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub person_type: PersonType,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, email: impl Into<String>, person_type: PersonType) -> Self {
        Self {
            name: name.into(),
            address: None,
            phone: None,
            email: email.into(),
            person_type,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

// ---------------------------------------------------------------------------
// customer
// ---------------------------------------------------------------------------

/// Insert payload for the customer subtype.
///
/// The owning `person_id` is not part of the payload: it always comes from
/// the person row inserted alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub loyalty_points: i32,
    pub customer_tier: CustomerTier,
    /// `None` lets the store default to the current date.
    pub registration_date: Option<NaiveDate>,
}

impl NewCustomer {
    pub fn new(loyalty_points: i32, customer_tier: CustomerTier) -> Self {
        Self { loyalty_points, customer_tier, registration_date: None }
    }
}

/// Person ⋈ Customer, as exposed by `v_customer_complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CustomerRecord {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub customer_id: i32,
    pub loyalty_points: i32,
    pub registration_date: NaiveDate,
    pub customer_tier: CustomerTier,
}

// ---------------------------------------------------------------------------
// employee
// ---------------------------------------------------------------------------

/// Insert payload for the employee subtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub salary: Decimal,
    pub department: String,
    /// `None` lets the store default to the current date.
    pub hire_date: Option<NaiveDate>,
    pub position: Option<String>,
    /// Must reference an existing employee.
    pub manager_id: Option<i32>,
}

impl NewEmployee {
    pub fn new(salary: Decimal, department: impl Into<String>) -> Self {
        Self {
            salary,
            department: department.into(),
            hire_date: None,
            position: None,
            manager_id: None,
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_manager(mut self, manager_id: i32) -> Self {
        self.manager_id = Some(manager_id);
        self
    }
}

/// Person ⋈ Employee, as exposed by `v_employee_complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmployeeRecord {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub employee_id: i32,
    pub salary: Decimal,
    pub department: String,
    pub hire_date: NaiveDate,
    pub position: Option<String>,
    pub manager_id: Option<i32>,
}

/// Salary aggregates for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DepartmentStats {
    pub department: String,
    pub employee_count: i64,
    /// Rounded to cents by the store.
    pub avg_salary: Decimal,
    pub min_salary: Decimal,
    pub max_salary: Decimal,
    pub total_salary: Decimal,
}

// ---------------------------------------------------------------------------
// relational algebra result sets
// ---------------------------------------------------------------------------

/// One row of the contact union, tagged with the role it was reached through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    /// `"Customer"` or `"Employee"`.
    pub role: String,
}

/// A person holding both a customer and an employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DualRolePerson {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub loyalty_points: i32,
    pub department: String,
}

/// A customer with no employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CustomerOnly {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub loyalty_points: i32,
}

/// An employee with no customer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmployeeOnly {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub department: String,
    pub salary: Decimal,
}

/// Both directions of the customer/employee set difference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleDifference {
    pub customers_only: Vec<CustomerOnly>,
    pub employees_only: Vec<EmployeeOnly>,
}

/// A customer at or above a loyalty threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct HighValueCustomer {
    pub name: String,
    pub email: String,
    pub loyalty_points: i32,
    pub customer_tier: CustomerTier,
}
