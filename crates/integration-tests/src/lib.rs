//! Integration tests for the Sakila staff admin panel.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database with a seeded Sakila schema
//! docker compose up -d db
//!
//! # Start the panel
//! cargo run -p sakila-admin
//!
//! # Run integration tests
//! cargo test -p sakila-admin-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_session` - Login/logout, session fixation, return-to, remember-me
//! - `staff_crud` - Staff management screens
//! - `customer_listing` - Read-only customer listing
//!
//! Tests that talk to a running server are `#[ignore]`d so that
//! `cargo test` stays green without one.

/// Base URL for the admin panel (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Credentials of a seeded staff account with a known password.
///
/// Defaults match the seeded Sakila dump (`Mike` with a legacy-plaintext
/// password) but can be overridden for other fixtures.
#[must_use]
pub fn seeded_staff_credentials() -> (String, String) {
    let username = std::env::var("TEST_STAFF_USERNAME").unwrap_or_else(|_| "Mike".to_string());
    let password =
        std::env::var("TEST_STAFF_PASSWORD").unwrap_or_else(|_| "sakila_rules".to_string());
    (username, password)
}

/// Create an HTTP client with a cookie store and no automatic redirects,
/// so that tests can assert on 303 responses and `Location` headers.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn panel_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
