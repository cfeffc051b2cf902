//! Staff repository for database operations.
//!
//! Two query families live here: the public CRUD projection used by the
//! management screens (never selects the password column), and the auth-only
//! lookup that does. Writable columns are fixed by the [`NewStaff`] and
//! [`StaffUpdate`] whitelists.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sakila_admin_core::{AddressId, Email, StaffId, StoreId};

use super::RepositoryError;
use crate::models::staff::{NewStaff, Staff, StaffIdentity, StaffUpdate};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for public staff queries (no password column).
#[derive(Debug, sqlx::FromRow)]
struct StaffRow {
    staff_id: i32,
    first_name: String,
    last_name: String,
    email: Option<String>,
    address_id: i32,
    store_id: i32,
    active: bool,
    username: String,
    last_update: DateTime<Utc>,
}

impl TryFrom<StaffRow> for Staff {
    type Error = RepositoryError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        let email = parse_optional_email(row.email)?;

        Ok(Self {
            id: StaffId::new(row.staff_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            address_id: AddressId::new(row.address_id),
            store_id: StoreId::new(row.store_id),
            active: row.active,
            username: row.username,
            last_update: row.last_update,
        })
    }
}

/// Internal row type for the auth-only lookup (includes the password field).
#[derive(Debug, sqlx::FromRow)]
struct StaffAuthRow {
    staff_id: i32,
    username: String,
    password: Option<String>,
    active: bool,
    first_name: String,
    last_name: String,
    store_id: i32,
    email: Option<String>,
}

impl TryFrom<StaffAuthRow> for StaffIdentity {
    type Error = RepositoryError;

    fn try_from(row: StaffAuthRow) -> Result<Self, Self::Error> {
        let email = parse_optional_email(row.email)?;

        Ok(Self {
            id: StaffId::new(row.staff_id),
            username: row.username,
            password: row.password,
            active: row.active,
            first_name: row.first_name,
            last_name: row.last_name,
            store_id: StoreId::new(row.store_id),
            email,
        })
    }
}

fn parse_optional_email(value: Option<String>) -> Result<Option<Email>, RepositoryError> {
    value
        .map(|s| {
            Email::parse(&s).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })
        })
        .transpose()
}

/// Columns returned by every public staff query.
const STAFF_PUBLIC_COLUMNS: &str = "staff_id, first_name, last_name, email, \
     address_id, store_id, active, username, last_update";

// =============================================================================
// Repository
// =============================================================================

/// Repository for staff database operations.
pub struct StaffRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new staff repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List staff rows (public fields only), ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Staff>, RepositoryError> {
        let rows = sqlx::query_as::<_, StaffRow>(&format!(
            "SELECT {STAFF_PUBLIC_COLUMNS} FROM staff ORDER BY staff_id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get one staff member by id (public fields only).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: StaffId) -> Result<Option<Staff>, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            "SELECT {STAFF_PUBLIC_COLUMNS} FROM staff WHERE staff_id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Auth-only fetch by username (includes the stored password field).
    ///
    /// Do NOT expose the result to clients; it exists solely for the
    /// Authentication Service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StaffIdentity>, RepositoryError> {
        let row = sqlx::query_as::<_, StaffAuthRow>(
            "SELECT staff_id, username, password, active, first_name, last_name, \
                    store_id, email \
             FROM staff WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Replace the stored password field with a new (hashed) value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the staff member doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: StaffId,
        new_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE staff SET password = $1 WHERE staff_id = $2")
            .bind(new_hash)
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Create a staff row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, staff: &NewStaff) -> Result<Staff, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            "INSERT INTO staff \
                 (first_name, last_name, email, address_id, store_id, active, username, password) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {STAFF_PUBLIC_COLUMNS}"
        ))
        .bind(&staff.first_name)
        .bind(&staff.last_name)
        .bind(staff.email.as_ref().map(Email::as_str))
        .bind(staff.address_id.as_i32())
        .bind(staff.store_id.as_i32())
        .bind(staff.active)
        .bind(&staff.username)
        .bind(staff.password.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Update a staff row by id.
    ///
    /// A `None` password leaves the stored field untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the staff member doesn't exist.
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: StaffId,
        update: &StaffUpdate,
    ) -> Result<Staff, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            "UPDATE staff SET \
                 first_name = $1, last_name = $2, email = $3, address_id = $4, \
                 store_id = $5, active = $6, username = $7, \
                 password = COALESCE($8, password), \
                 last_update = now() \
             WHERE staff_id = $9 \
             RETURNING {STAFF_PUBLIC_COLUMNS}"
        ))
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.email.as_ref().map(Email::as_str))
        .bind(update.address_id.as_i32())
        .bind(update.store_id.as_i32())
        .bind(update.active)
        .bind(&update.username)
        .bind(update.password.as_deref())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a staff row by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the staff member doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: StaffId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM staff WHERE staff_id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
