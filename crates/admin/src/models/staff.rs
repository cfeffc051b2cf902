//! Staff domain types.
//!
//! Two projections of the same table exist on purpose: [`Staff`] is the
//! public row used by the management screens and never carries the password
//! field, while [`StaffIdentity`] is the auth-only fetch that does.

use chrono::{DateTime, Utc};

use sakila_admin_core::{AddressId, Email, StaffId, StoreId};

use super::session::CurrentStaff;

/// A staff member (public projection, no password field).
#[derive(Debug, Clone)]
pub struct Staff {
    /// Unique staff ID.
    pub id: StaffId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address, if recorded.
    pub email: Option<Email>,
    /// Address reference.
    pub address_id: AddressId,
    /// Store the staff member works at.
    pub store_id: StoreId,
    /// Whether the account can log in.
    pub active: bool,
    /// Login username.
    pub username: String,
    /// When the row was last updated.
    pub last_update: DateTime<Utc>,
}

impl Staff {
    /// Display name: first and last name joined, surrounding whitespace trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// Auth-only staff fetch, including the stored password field.
///
/// Never exposed to clients or templates; the Authentication Service strips
/// it down to a [`CurrentStaff`] on successful login.
#[derive(Debug, Clone)]
pub struct StaffIdentity {
    /// Unique staff ID.
    pub id: StaffId,
    /// Login username.
    pub username: String,
    /// Stored password field: a salted Argon2 hash, or legacy plaintext
    /// carried over from the original Sakila dump. May be NULL.
    pub password: Option<String>,
    /// Whether the account can log in.
    pub active: bool,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Store the staff member works at.
    pub store_id: StoreId,
    /// Email address, if recorded.
    pub email: Option<Email>,
}

impl From<&StaffIdentity> for CurrentStaff {
    fn from(identity: &StaffIdentity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            name: format!("{} {}", identity.first_name, identity.last_name)
                .trim()
                .to_owned(),
            store_id: identity.store_id,
            email: identity.email.clone(),
        }
    }
}

/// Writable fields for creating a staff row.
///
/// This struct is the column whitelist: nothing outside it can reach the
/// database through the create path. `password` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<Email>,
    pub address_id: AddressId,
    pub store_id: StoreId,
    pub active: bool,
    pub username: String,
    /// Pre-hashed password value, if one was supplied.
    pub password: Option<String>,
}

/// Writable fields for updating a staff row.
///
/// Same whitelist as [`NewStaff`]; a `None` password leaves the stored
/// field untouched.
#[derive(Debug, Clone)]
pub struct StaffUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<Email>,
    pub address_id: AddressId,
    pub store_id: StoreId,
    pub active: bool,
    pub username: String,
    /// Pre-hashed replacement password, or `None` to keep the current one.
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(first: &str, last: &str) -> StaffIdentity {
        StaffIdentity {
            id: StaffId::new(1),
            username: "mike".to_owned(),
            password: None,
            active: true,
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            store_id: StoreId::new(1),
            email: None,
        }
    }

    #[test]
    fn test_current_staff_name_concatenation() {
        let current = CurrentStaff::from(&identity("Mike", "Hillyer"));
        assert_eq!(current.name, "Mike Hillyer");
    }

    #[test]
    fn test_current_staff_name_trims_missing_last_name() {
        let current = CurrentStaff::from(&identity("Mike", ""));
        assert_eq!(current.name, "Mike");
    }

    #[test]
    fn test_current_staff_carries_no_password() {
        let mut id = identity("Mike", "Hillyer");
        id.password = Some("hunter2".to_owned());
        let current = CurrentStaff::from(&id);
        let json = serde_json::to_string(&current).expect("serializable");
        assert!(!json.contains("hunter2"));
    }
}
