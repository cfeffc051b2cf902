//! Session-related types for staff authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use sakila_admin_core::{Email, StaffId, StoreId};

/// Session-stored staff identity.
///
/// Minimal, password-free data stored in the session to identify the
/// logged-in staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    /// Staff member's database ID.
    pub id: StaffId,
    /// Staff member's login username.
    pub username: String,
    /// Display name (first and last name).
    pub name: String,
    /// Store the staff member is affiliated with.
    pub store_id: StoreId,
    /// Staff member's email address, if recorded.
    pub email: Option<Email>,
}

/// Session keys for staff authentication data.
pub mod keys {
    /// Key for storing the current logged-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";

    /// Key for the one-shot post-login redirect target.
    pub const LOGIN_RETURN_TO: &str = "login_return_to";
}
