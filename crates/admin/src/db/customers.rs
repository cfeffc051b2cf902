//! Customer repository for database operations.
//!
//! The panel only reads customers; there are no write paths here.

use chrono::NaiveDate;
use sqlx::PgPool;

use sakila_admin_core::{CustomerId, Email, StoreId};

use super::RepositoryError;
use crate::models::customer::Customer;

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_id: i32,
    store_id: i32,
    first_name: String,
    last_name: String,
    email: Option<String>,
    active: bool,
    create_date: NaiveDate,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = row
            .email
            .map(|s| {
                Email::parse(&s).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            id: CustomerId::new(row.customer_id),
            store_id: StoreId::new(row.store_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            active: row.active,
            create_date: row.create_date,
        })
    }
}

/// Columns returned by every customer query.
///
/// `activebool` is the boolean flag in the Sakila `PostgreSQL` port; the
/// legacy integer `active` column is ignored.
const CUSTOMER_COLUMNS: &str =
    "customer_id, store_id, first_name, last_name, email, activebool AS active, create_date";

/// Repository for read-only customer queries.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customers, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer ORDER BY customer_id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get one customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE customer_id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
