//! Dashboard route handler.

use askama::Template;
use axum::{Router, response::Html, routing::get};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Staff view for templates.
#[derive(Debug, Clone)]
pub struct StaffUserView {
    pub name: String,
    pub username: String,
    pub store_id: String,
}

impl From<&CurrentStaff> for StaffUserView {
    fn from(staff: &CurrentStaff) -> Self {
        Self {
            name: staff.name.clone(),
            username: staff.username.clone(),
            store_id: staff.store_id.to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub staff_user: StaffUserView,
    pub current_path: String,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip(staff))]
async fn index(RequireStaffAuth(staff): RequireStaffAuth) -> Html<String> {
    let template = DashboardTemplate {
        staff_user: StaffUserView::from(&staff),
        current_path: "/".to_string(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
