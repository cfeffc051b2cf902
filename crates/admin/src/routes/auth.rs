//! Authentication route handlers.
//!
//! Drives the session lifecycle around login and logout: the session id is
//! cycled at the moment of successful login (fixation mitigation), the
//! "remember me" flag sets the cookie lifetime, and the one-shot return-to
//! target stashed by the login page is consumed here. Everything mounts
//! under `/auth`; logout redirects back to `/auth/login`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::{
    Expiry, Session,
    cookie::time::{Duration, OffsetDateTime},
};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{OptionalStaffAuth, set_current_staff};
use crate::models::session_keys;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// "Remember me" cookie lifetime in seconds (30 days).
const REMEMBER_ME_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Where a login lands when no return-to target was stashed, and where an
/// unsafe one is discarded to.
const DEFAULT_REDIRECT: &str = "/";

/// Page title shared by every render of the login form.
const LOGIN_TITLE: &str = "Staff login";

/// One generic message for every credential failure; wrong password,
/// unknown username and inactive account must be indistinguishable.
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

// =============================================================================
// Form / Query Types
// =============================================================================

/// Login form data. Missing fields deserialize to empty strings so that
/// validation can report each one by name.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub remember: Option<String>,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Return-to target, stashed in the session until the next login.
    pub next: Option<String>,
}

/// Field-level and form-level messages for the login template.
#[derive(Debug, Clone, Default)]
pub struct LoginErrors {
    pub username: Option<String>,
    pub password: Option<String>,
    pub form: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template. Redisplays the submitted username on failure;
/// never the password.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub title: &'static str,
    pub errors: LoginErrors,
    pub username: String,
}

// =============================================================================
// Router
// =============================================================================

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
        .route("/login", get(login_alias))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the login page.
///
/// GET /auth/login?next=/some/path
///
/// A `next` target from an unauthenticated requester is stashed in the
/// session; the login submission consumes it. The guard never sets this
/// itself - only this handler reads its own query parameter.
async fn login_page(
    OptionalStaffAuth(staff): OptionalStaffAuth,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Response {
    if staff.is_none()
        && let Some(next) = query.next
    {
        if let Err(e) = session.insert(session_keys::LOGIN_RETURN_TO, &next).await {
            tracing::warn!("failed to stash return-to target: {e}");
        }
    }

    LoginTemplate {
        title: LOGIN_TITLE,
        errors: LoginErrors::default(),
        username: String::new(),
    }
    .into_response()
}

/// Convenience alias kept from the original mount layout.
///
/// GET /login
async fn login_alias() -> Redirect {
    Redirect::to("/auth/login")
}

/// Handle the login form submission.
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    let staff = match auth.login(&form.username, &form.password).await {
        Ok(staff) => staff,
        Err(AuthError::Validation(errors)) => {
            return login_failure(
                form.username,
                LoginErrors {
                    username: errors.username,
                    password: errors.password,
                    form: None,
                },
            );
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("login rejected");
            return login_failure(
                form.username,
                LoginErrors {
                    form: Some(INVALID_CREDENTIALS_MESSAGE.to_owned()),
                    ..LoginErrors::default()
                },
            );
        }
        Err(e) => {
            tracing::error!("login lookup failed: {e}");
            return AppError::Internal("login failed".to_owned()).into_response();
        }
    };

    // A fresh session id must exist before any authenticated state is
    // written. A cycling failure is fatal for this request: no half-open
    // fixation window.
    if let Err(e) = session.cycle_id().await {
        tracing::error!("session id cycling failed: {e}");
        return AppError::Internal("session error".to_owned()).into_response();
    }

    // Cookie lifetime policy: persistent for "remember me", otherwise
    // scoped to the user agent.
    if remember_requested(form.remember.as_deref()) {
        session.set_expiry(Some(Expiry::AtDateTime(
            OffsetDateTime::now_utc() + Duration::seconds(REMEMBER_ME_EXPIRY_SECONDS),
        )));
    } else {
        session.set_expiry(Some(Expiry::OnSessionEnd));
    }

    if let Err(e) = set_current_staff(&session, &staff).await {
        tracing::error!("failed to write authenticated session: {e}");
        return AppError::Internal("session error".to_owned()).into_response();
    }

    // One-shot: taking the target deletes it, so it cannot leak into a
    // later, unrelated login.
    let stashed = match session
        .remove::<String>(session_keys::LOGIN_RETURN_TO)
        .await
    {
        Ok(target) => target,
        Err(e) => {
            tracing::warn!("failed to take return-to target: {e}");
            None
        }
    };
    let target = resolve_return_to(stashed.as_deref());

    // The session must be durably saved before the redirect goes out.
    if let Err(e) = session.save().await {
        tracing::error!("failed to save session: {e}");
        return AppError::Internal("session error".to_owned()).into_response();
    }

    tracing::info!(staff_id = %staff.id, "staff login");
    Redirect::to(&target).into_response()
}

/// Logout and destroy the session.
///
/// POST /auth/logout (POST-only so a plain link cannot trigger it)
async fn logout(session: Session) -> Response {
    // Flush drops every session key and clears the cookie by its
    // configured name.
    if let Err(e) = session.flush().await {
        tracing::error!("failed to destroy session: {e}");
    }

    Redirect::to("/auth/login").into_response()
}

// =============================================================================
// Helpers
// =============================================================================

/// Re-render the login form with a 400 and the submitted username.
fn login_failure(username: String, errors: LoginErrors) -> Response {
    let template = LoginTemplate {
        title: LOGIN_TITLE,
        errors,
        username,
    };

    (StatusCode::BAD_REQUEST, template).into_response()
}

/// Accepted truthy values for the "remember me" checkbox.
fn remember_requested(remember: Option<&str>) -> bool {
    matches!(remember, Some("1" | "on"))
}

/// Resolve the stashed return-to target, discarding anything that is not an
/// application-local path.
fn resolve_return_to(target: Option<&str>) -> String {
    match target {
        Some(path) if is_local_path(path) => path.to_owned(),
        _ => DEFAULT_REDIRECT.to_owned(),
    }
}

/// An application-local path starts with a single `/`. Protocol-relative
/// (`//`) and backslash-smuggled (`/\`) prefixes are rejected, and a scheme
/// like `http:` can never satisfy the leading-slash rule, which closes the
/// open-redirect hole.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_return_to_accepts_local_path() {
        assert_eq!(resolve_return_to(Some("/staff/42")), "/staff/42");
        assert_eq!(
            resolve_return_to(Some("/customers?limit=5")),
            "/customers?limit=5"
        );
    }

    #[test]
    fn test_resolve_return_to_rejects_absolute_url() {
        assert_eq!(resolve_return_to(Some("http://evil.example/x")), "/");
        assert_eq!(resolve_return_to(Some("https://evil.example")), "/");
    }

    #[test]
    fn test_resolve_return_to_rejects_protocol_relative() {
        assert_eq!(resolve_return_to(Some("//evil.example/x")), "/");
        assert_eq!(resolve_return_to(Some("/\\evil.example")), "/");
    }

    #[test]
    fn test_resolve_return_to_defaults_to_root() {
        assert_eq!(resolve_return_to(None), "/");
        assert_eq!(resolve_return_to(Some("")), "/");
        assert_eq!(resolve_return_to(Some("staff/42")), "/");
    }

    #[test]
    fn test_remember_requested_accepted_values() {
        assert!(remember_requested(Some("1")));
        assert!(remember_requested(Some("on")));
        assert!(!remember_requested(Some("true")));
        assert!(!remember_requested(Some("")));
        assert!(!remember_requested(None));
    }
}
