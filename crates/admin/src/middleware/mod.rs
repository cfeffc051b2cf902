//! HTTP middleware stack for the admin panel.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod session;

pub use auth::{OptionalStaffAuth, RequireStaffAuth, clear_current_staff, set_current_staff};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
