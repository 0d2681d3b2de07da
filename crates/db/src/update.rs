//! Partial updates of the `person` row.
//!
//! Only whitelisted columns can be named; each one is assigned at most once
//! and every value is bound, never interpolated.

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

use crate::{DbError, models::{ParseEnumError, PersonType}};

/// Columns of `person` that callers may change.
pub const UPDATABLE_FIELDS: &[&str] = &["name", "address", "phone", "email", "person_type"];

/// A patch against one person row.
///
/// `None` leaves a column untouched. For the nullable columns the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<String>,
    pub person_type: Option<PersonType>,
}

impl PersonUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: Option<String>) -> Self {
        self.address = Some(address);
        self
    }

    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn person_type(mut self, person_type: PersonType) -> Self {
        self.person_type = Some(person_type);
        self
    }

    /// Set a field by column name, as when the patch comes from a
    /// name → value mapping. A later call for the same field wins.
    pub fn set(&mut self, field: &str, value: Option<String>) -> Result<(), DbError> {
        match field {
            "name" => self.name = Some(required("name", value)?),
            "email" => self.email = Some(required("email", value)?),
            "address" => self.address = Some(value),
            "phone" => self.phone = Some(value),
            "person_type" => {
                let raw = required("person_type", value)?;
                let parsed = raw.parse().map_err(|e: ParseEnumError| {
                    DbError::InvalidValue { field: "person_type", reason: e.to_string() }
                })?;
                self.person_type = Some(parsed);
            }
            other => return Err(DbError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Build a patch from `(field, value)` pairs, rejecting the whole batch
    /// on the first unknown field or invalid value.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, DbError>
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: AsRef<str>,
    {
        let mut update = Self::default();
        for (field, value) in pairs {
            update.set(field.as_ref(), value)?;
        }
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.person_type.is_none()
    }

    /// Names of the columns this patch assigns, in statement order.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() { fields.push("name"); }
        if self.address.is_some() { fields.push("address"); }
        if self.phone.is_some() { fields.push("phone"); }
        if self.email.is_some() { fields.push("email"); }
        if self.person_type.is_some() { fields.push("person_type"); }
        fields
    }

    /// Build the `UPDATE person SET … WHERE person_id = $n` statement.
    ///
    /// Returns `None` for an empty patch.
    pub fn to_query(&self, person_id: i32) -> Option<QueryBuilder<'static, Postgres>> {
        if self.is_empty() {
            return None;
        }

        let mut qb = QueryBuilder::new("UPDATE person SET ");
        {
            let mut assignments = qb.separated(", ");
            if let Some(name) = &self.name {
                assignments.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(address) = &self.address {
                assignments.push("address = ").push_bind_unseparated(address.clone());
            }
            if let Some(phone) = &self.phone {
                assignments.push("phone = ").push_bind_unseparated(phone.clone());
            }
            if let Some(email) = &self.email {
                assignments.push("email = ").push_bind_unseparated(email.clone());
            }
            if let Some(person_type) = &self.person_type {
                assignments
                    .push("person_type = ")
                    .push_bind_unseparated(*person_type);
            }
        }
        qb.push(" WHERE person_id = ").push_bind(person_id);
        Some(qb)
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, DbError> {
    value.ok_or(DbError::InvalidValue { field, reason: "column is not nullable".into() })
}
