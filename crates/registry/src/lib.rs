//! `person-registry` — data access over the Person / Customer / Employee
//! supertype/subtype schema.
//!
//! [`PersonRegistry`] owns a single store connection. Every operation of
//! [`PersonStore`] called on the registry is its own transaction; use
//! [`PersonRegistry::transaction`] or a [`Session`] to group several
//! operations into one.

pub mod config;
pub mod error;
pub mod registry;
pub mod session;
pub mod store;

pub use config::{ConfigError, RegistryConfig};
pub use error::RegistryError;
pub use registry::PersonRegistry;
pub use session::Session;
pub use store::PersonStore;

pub use db::models::{
    Contact, CustomerOnly, CustomerRecord, CustomerTier, DepartmentStats, DualRolePerson,
    EmployeeOnly, EmployeeRecord, HighValueCustomer, NewCustomer, NewEmployee, NewPerson, Person,
    PersonType, RoleDifference,
};
pub use db::repository::algebra::DEFAULT_MIN_LOYALTY;
pub use db::{DbError, PersonUpdate};
