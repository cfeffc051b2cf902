//! Customers list route handlers (read-only).

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use sakila_admin_core::CustomerId;

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::models::Customer;
use crate::state::AppState;

use super::dashboard::StaffUserView;

/// Default page size for the customer listing.
const DEFAULT_LIMIT: i64 = 10;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Customer view for templates.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub store_id: String,
    pub active: bool,
    pub create_date: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.full_name(),
            email: customer
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            store_id: customer.store_id.to_string(),
            active: customer.active,
            create_date: customer.create_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Customers list page template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub staff_user: StaffUserView,
    pub current_path: String,
    pub customers: Vec<CustomerView>,
    pub limit: i64,
    pub offset: i64,
    pub prev_offset: i64,
    pub next_offset: i64,
    pub has_next_page: bool,
}

/// Customer detail page template.
#[derive(Template)]
#[template(path = "customers/show.html")]
pub struct CustomerShowTemplate {
    pub staff_user: StaffUserView,
    pub current_path: String,
    pub customer: CustomerView,
}

/// Build the customers router. Read-only, but still behind authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index))
        .route("/customers/{id}", get(show))
}

/// Customers list page handler.
///
/// GET /customers?limit=10&offset=0
#[instrument(skip(staff, state))]
async fn index(
    RequireStaffAuth(staff): RequireStaffAuth,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Html<String>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let customers = CustomerRepository::new(state.pool())
        .list(limit, offset)
        .await?;

    // A full page suggests there is more to fetch.
    let has_next_page = customers.len() as i64 == limit;

    let template = CustomersIndexTemplate {
        staff_user: StaffUserView::from(&staff),
        current_path: "/customers".to_string(),
        customers: customers.iter().map(CustomerView::from).collect(),
        limit,
        offset,
        prev_offset: (offset - limit).max(0),
        next_offset: offset + limit,
        has_next_page,
    };

    Ok(render(&template))
}

/// Customer detail page handler.
///
/// GET /customers/{id}
#[instrument(skip(staff, state))]
async fn show(
    RequireStaffAuth(staff): RequireStaffAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let customer = CustomerRepository::new(state.pool())
        .get_by_id(CustomerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

    let template = CustomerShowTemplate {
        staff_user: StaffUserView::from(&staff),
        current_path: "/customers".to_string(),
        customer: CustomerView::from(&customer),
    };

    Ok(render(&template))
}

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
