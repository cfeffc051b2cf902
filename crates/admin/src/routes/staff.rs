//! Staff management route handlers.
//!
//! Everything renders through one screen: the staff listing with an
//! optional selected member in the edit form. Writes go through the typed
//! form below, which is the field whitelist - nothing else reaches the
//! repository.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use sakila_admin_core::{AddressId, Email, StaffId, StoreId};

use crate::db::{RepositoryError, StaffRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::models::CurrentStaff;
use crate::models::staff::{NewStaff, Staff, StaffUpdate};
use crate::services::auth::password;
use crate::state::AppState;

use super::dashboard::StaffUserView;

/// Rows shown on the management screen.
const LIST_LIMIT: i64 = 100;

// =============================================================================
// Form Types
// =============================================================================

/// Staff create/update form data.
///
/// This struct is the whitelist of writable fields; anything else in the
/// request body is dropped by deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    /// Blank means "do not touch the stored password".
    #[serde(default)]
    pub password: String,
    /// Checkbox; present means active.
    pub active: Option<String>,
    #[serde(default)]
    pub store_id: String,
    #[serde(default)]
    pub address_id: String,
}

/// Whitelisted fields after coercion, before hashing.
struct CoercedStaff {
    first_name: String,
    last_name: String,
    email: Option<Email>,
    username: String,
    password: Option<String>,
    active: bool,
    store_id: StoreId,
    address_id: AddressId,
}

/// Coerce and validate the raw form: trim names, treat blank optionals as
/// absent, parse numeric references. Mirrors the checkbox-to-flag and
/// empty-number handling of the HTML form.
fn coerce_form(form: &StaffForm) -> Result<CoercedStaff, String> {
    let first_name = form.first_name.trim().to_owned();
    let last_name = form.last_name.trim().to_owned();
    let username = form.username.trim().to_owned();

    let mut missing = Vec::new();
    if first_name.is_empty() {
        missing.push("first_name");
    }
    if last_name.is_empty() {
        missing.push("last_name");
    }
    if username.is_empty() {
        missing.push("username");
    }
    if !missing.is_empty() {
        return Err(format!("Missing fields: {}", missing.join(", ")));
    }

    let email = match form.email.trim() {
        "" => None,
        value => Some(Email::parse(value).map_err(|e| format!("Invalid email: {e}"))?),
    };

    let store_id = parse_reference("store_id", &form.store_id)?;
    let address_id = parse_reference("address_id", &form.address_id)?;

    let password = match form.password.as_str() {
        "" => None,
        value => Some(value.to_owned()),
    };

    Ok(CoercedStaff {
        first_name,
        last_name,
        email,
        username,
        password,
        active: checkbox_checked(form.active.as_deref()),
        store_id: StoreId::new(store_id),
        address_id: AddressId::new(address_id),
    })
}

/// Parse a positive numeric reference field.
fn parse_reference(field: &str, value: &str) -> Result<i32, String> {
    let id = value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("Invalid {field}"))?;
    if id <= 0 {
        return Err(format!("Invalid {field}"));
    }
    Ok(id)
}

/// Checkbox coercion: browsers submit "on" when checked, nothing otherwise.
fn checkbox_checked(value: Option<&str>) -> bool {
    matches!(value, Some("on" | "1" | "true"))
}

// =============================================================================
// Templates
// =============================================================================

/// Staff row for the listing table.
#[derive(Debug, Clone)]
pub struct StaffView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub store_id: String,
    pub active: bool,
    pub last_update: String,
}

impl From<&Staff> for StaffView {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id.to_string(),
            full_name: staff.full_name(),
            email: staff
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            username: staff.username.clone(),
            store_id: staff.store_id.to_string(),
            active: staff.active,
            last_update: staff.last_update.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Values shown in the edit/create form, either from a selected row or from
/// a rejected submission.
#[derive(Debug, Clone, Default)]
pub struct StaffFormView {
    /// Empty for the create form.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub store_id: String,
    pub address_id: String,
    pub active: bool,
}

impl From<&Staff> for StaffFormView {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id.to_string(),
            first_name: staff.first_name.clone(),
            last_name: staff.last_name.clone(),
            email: staff
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            username: staff.username.clone(),
            store_id: staff.store_id.to_string(),
            address_id: staff.address_id.to_string(),
            active: staff.active,
        }
    }
}

impl From<&StaffForm> for StaffFormView {
    /// Rebuild the form from a rejected submission. The password is
    /// deliberately not carried over.
    fn from(form: &StaffForm) -> Self {
        Self {
            id: String::new(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            username: form.username.clone(),
            store_id: form.store_id.clone(),
            address_id: form.address_id.clone(),
            active: checkbox_checked(form.active.as_deref()),
        }
    }
}

/// Staff management page template.
#[derive(Template)]
#[template(path = "staff/index.html")]
pub struct StaffIndexTemplate {
    pub staff_user: StaffUserView,
    pub current_path: String,
    pub staff: Vec<StaffView>,
    pub selected: Option<StaffFormView>,
    pub error: Option<String>,
}

// =============================================================================
// Router
// =============================================================================

/// Build the staff router. Every route requires authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/staff", get(index).post(create))
        .route("/staff/{id}", get(show))
        .route("/staff/{id}/update", post(update))
        .route("/staff/{id}/delete", post(remove))
}

// =============================================================================
// Handlers
// =============================================================================

/// Staff listing page handler.
///
/// GET /staff
#[instrument(skip(staff, state))]
async fn index(
    RequireStaffAuth(staff): RequireStaffAuth,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    render_index(&state, &staff, None, None, StatusCode::OK)
        .await
        .map(|response| response.1)
}

/// Listing with the selected member loaded into the edit form.
///
/// GET /staff/{id}
#[instrument(skip(staff, state))]
async fn show(
    RequireStaffAuth(staff): RequireStaffAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let repo = StaffRepository::new(state.pool());
    let selected = repo
        .get_by_id(StaffId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("staff {id}")))?;

    render_index(
        &state,
        &staff,
        Some(StaffFormView::from(&selected)),
        None,
        StatusCode::OK,
    )
    .await
    .map(|response| response.1)
}

/// Create a staff member.
///
/// POST /staff
#[instrument(skip(staff, state, form))]
async fn create(
    RequireStaffAuth(staff): RequireStaffAuth,
    State(state): State<AppState>,
    Form(form): Form<StaffForm>,
) -> Result<Response, AppError> {
    let coerced = match coerce_form(&form) {
        Ok(coerced) => coerced,
        Err(message) => return rerender_with_error(&state, &staff, &form, message).await,
    };

    let password = hash_optional_password(coerced.password.as_deref())?;
    let new_staff = NewStaff {
        first_name: coerced.first_name,
        last_name: coerced.last_name,
        email: coerced.email,
        address_id: coerced.address_id,
        store_id: coerced.store_id,
        active: coerced.active,
        username: coerced.username,
        password,
    };

    match StaffRepository::new(state.pool()).create(&new_staff).await {
        Ok(created) => Ok(Redirect::to(&format!("/staff/{}", created.id)).into_response()),
        Err(RepositoryError::Conflict(message)) => {
            rerender_with_error(&state, &staff, &form, message).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Update a staff member.
///
/// POST /staff/{id}/update
#[instrument(skip(staff, state, form))]
async fn update(
    RequireStaffAuth(staff): RequireStaffAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<StaffForm>,
) -> Result<Response, AppError> {
    let coerced = match coerce_form(&form) {
        Ok(coerced) => coerced,
        Err(message) => return rerender_with_error(&state, &staff, &form, message).await,
    };

    let password = hash_optional_password(coerced.password.as_deref())?;
    let staff_update = StaffUpdate {
        first_name: coerced.first_name,
        last_name: coerced.last_name,
        email: coerced.email,
        address_id: coerced.address_id,
        store_id: coerced.store_id,
        active: coerced.active,
        username: coerced.username,
        password,
    };

    match StaffRepository::new(state.pool())
        .update(StaffId::new(id), &staff_update)
        .await
    {
        Ok(updated) => Ok(Redirect::to(&format!("/staff/{}", updated.id)).into_response()),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("staff {id}"))),
        Err(RepositoryError::Conflict(message)) => {
            rerender_with_error(&state, &staff, &form, message).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a staff member.
///
/// POST /staff/{id}/delete
#[instrument(skip(_staff, state))]
async fn remove(
    RequireStaffAuth(_staff): RequireStaffAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    match StaffRepository::new(state.pool())
        .delete(StaffId::new(id))
        .await
    {
        Ok(()) => Ok(Redirect::to("/staff").into_response()),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("staff {id}"))),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Hash a submitted password, if one was supplied.
fn hash_optional_password(password: Option<&str>) -> Result<Option<String>, AppError> {
    password
        .map(|plain| {
            password::hash_password(plain)
                .map_err(|_| AppError::Internal("password hashing failed".to_owned()))
        })
        .transpose()
}

/// Render the management screen with the current listing.
async fn render_index(
    state: &AppState,
    staff: &CurrentStaff,
    selected: Option<StaffFormView>,
    error: Option<String>,
    status: StatusCode,
) -> Result<(StatusCode, Html<String>), AppError> {
    let rows = StaffRepository::new(state.pool())
        .list_all(LIST_LIMIT, 0)
        .await?;

    let template = StaffIndexTemplate {
        staff_user: StaffUserView::from(staff),
        current_path: "/staff".to_string(),
        staff: rows.iter().map(StaffView::from).collect(),
        selected,
        error,
    };

    let html = Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }));

    Ok((status, html))
}

/// Re-render the screen with a 400, the error message, and the submitted
/// values (minus the password).
async fn rerender_with_error(
    state: &AppState,
    staff: &CurrentStaff,
    form: &StaffForm,
    message: String,
) -> Result<Response, AppError> {
    let (status, html) = render_index(
        state,
        staff,
        Some(StaffFormView::from(form)),
        Some(message),
        StatusCode::BAD_REQUEST,
    )
    .await?;

    Ok((status, html).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> StaffForm {
        StaffForm {
            first_name: "Mike".to_owned(),
            last_name: "Hillyer".to_owned(),
            email: "mike.hillyer@sakilastaff.com".to_owned(),
            username: "mike".to_owned(),
            password: String::new(),
            active: Some("on".to_owned()),
            store_id: "1".to_owned(),
            address_id: "3".to_owned(),
        }
    }

    #[test]
    fn test_coerce_form_valid() {
        let coerced = coerce_form(&base_form()).expect("valid form");
        assert_eq!(coerced.first_name, "Mike");
        assert_eq!(coerced.store_id, StoreId::new(1));
        assert_eq!(coerced.address_id, AddressId::new(3));
        assert!(coerced.active);
        assert!(coerced.password.is_none());
    }

    #[test]
    fn test_coerce_form_reports_missing_fields() {
        let mut form = base_form();
        form.first_name = "  ".to_owned();
        form.username = String::new();

        let err = coerce_form(&form).expect_err("missing fields");
        assert!(err.contains("first_name"));
        assert!(err.contains("username"));
        assert!(!err.contains("last_name"));
    }

    #[test]
    fn test_coerce_form_blank_email_is_absent() {
        let mut form = base_form();
        form.email = String::new();

        let coerced = coerce_form(&form).expect("valid form");
        assert!(coerced.email.is_none());
    }

    #[test]
    fn test_coerce_form_rejects_bad_references() {
        let mut form = base_form();
        form.store_id = "zero".to_owned();
        assert!(coerce_form(&form).is_err());

        let mut form = base_form();
        form.address_id = "-2".to_owned();
        assert!(coerce_form(&form).is_err());
    }

    #[test]
    fn test_checkbox_coercion() {
        assert!(checkbox_checked(Some("on")));
        assert!(checkbox_checked(Some("1")));
        assert!(!checkbox_checked(Some("off")));
        assert!(!checkbox_checked(None));
    }

    #[test]
    fn test_rejected_submission_never_echoes_password() {
        let mut form = base_form();
        form.password = "hunter2".to_owned();

        let view = StaffFormView::from(&form);
        assert_eq!(view.username, "mike");
        // StaffFormView has no password field at all; nothing to echo.
    }
}
