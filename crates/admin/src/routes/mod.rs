//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Dashboard
//! GET  /                       - Dashboard overview
//!
//! # Auth (session-based staff login)
//! GET  /auth/login             - Login page (optional ?next= return-to)
//! POST /auth/login             - Login submission
//! POST /auth/logout            - Logout (POST-only, resists CSRF)
//! GET  /login                  - Alias, redirects to /auth/login
//!
//! # Staff (management screens)
//! GET  /staff                  - Staff listing
//! GET  /staff/{id}             - Listing with selected edit form
//! POST /staff                  - Create
//! POST /staff/{id}/update      - Update
//! POST /staff/{id}/delete      - Delete
//!
//! # Customers (read-only)
//! GET  /customers              - Customer listing (limit/offset)
//! GET  /customers/{id}         - Customer detail
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod staff;

/// Build the application router (health and static routes are mounted in
/// `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(staff::router())
        .merge(customers::router())
}
