//! Customer domain type.
//!
//! Customers are read-only in this panel; there is no writable projection.

use chrono::NaiveDate;

use sakila_admin_core::{CustomerId, Email, StoreId};

/// A rental customer (read-only listing row).
#[derive(Debug, Clone)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Store the customer is registered at.
    pub store_id: StoreId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address, if recorded.
    pub email: Option<Email>,
    /// Whether the customer account is active.
    pub active: bool,
    /// Date the customer record was created.
    pub create_date: NaiveDate,
}

impl Customer {
    /// Display name: first and last name joined, surrounding whitespace trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}
