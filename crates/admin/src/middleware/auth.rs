//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring staff authentication in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentStaff, session_keys};

/// Extractor that requires staff authentication.
///
/// If the staff member is not logged in, returns a redirect to the login
/// page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireStaffAuth(staff): RequireStaffAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", staff.name)
/// }
/// ```
pub struct RequireStaffAuth(pub CurrentStaff);

/// Error returned when staff authentication is required but absent.
pub enum StaffAuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// The session layer is missing entirely.
    Unauthorized,
}

impl IntoResponse for StaffAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireStaffAuth
where
    S: Send + Sync,
{
    type Rejection = StaffAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(StaffAuthRejection::Unauthorized)?;

        // Get the current staff member from the session
        let staff: CurrentStaff = session
            .get(session_keys::CURRENT_STAFF)
            .await
            .ok()
            .flatten()
            .ok_or(StaffAuthRejection::RedirectToLogin)?;

        Ok(Self(staff))
    }
}

/// Extractor that optionally gets the current staff member.
///
/// Unlike `RequireStaffAuth`, this never rejects: anonymous requests get
/// `None`. This is the passive identity injection used by templates to show
/// who is signed in.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     OptionalStaffAuth(staff): OptionalStaffAuth,
/// ) -> impl IntoResponse {
///     match staff {
///         Some(s) => format!("Hello, {}!", s.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalStaffAuth(pub Option<CurrentStaff>);

impl<S> FromRequestParts<S> for OptionalStaffAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentStaff>(session_keys::CURRENT_STAFF)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(staff))
    }
}

/// Helper to set the current staff member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Helper to clear the current staff member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await?;
    Ok(())
}
