//! Integration tests for the staff management screens.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the seeded Sakila schema
//! - The panel running (cargo run -p sakila-admin)
//!
//! Run with: cargo test -p sakila-admin-integration-tests -- --ignored

use reqwest::{Client, StatusCode};

use sakila_admin_integration_tests::{admin_base_url, panel_client, seeded_staff_credentials};

/// Log the shared client in so protected routes are reachable.
async fn login(client: &Client) {
    let base_url = admin_base_url();
    let (username, password) = seeded_staff_credentials();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[
            ("username", username.as_str()),
            ("password", password.as_str()),
        ])
        .send()
        .await
        .expect("Failed to post login");
    assert!(resp.status().is_redirection(), "login must succeed first");
}

/// Extract "/staff/{id}" from a create/update redirect.
fn staff_id_from_location(resp: &reqwest::Response) -> String {
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    location
        .strip_prefix("/staff/")
        .expect("Expected /staff/{id} redirect")
        .to_string()
}

#[tokio::test]
#[ignore = "Requires running panel and seeded database"]
async fn test_staff_listing_requires_auth() {
    let client = panel_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/staff"))
        .send()
        .await
        .expect("Failed to get staff page");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert_eq!(location, "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running panel and seeded database"]
async fn test_staff_listing_renders_table() {
    let client = panel_client();
    login(&client).await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/staff"))
        .send()
        .await
        .expect("Failed to get staff page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("data-table"));
    assert!(body.contains("New staff member"));
}

#[tokio::test]
#[ignore = "Requires running panel and seeded database"]
async fn test_staff_create_update_delete_roundtrip() {
    let client = panel_client();
    login(&client).await;
    let base_url = admin_base_url();

    // Create
    let resp = client
        .post(format!("{base_url}/staff"))
        .form(&[
            ("first_name", "Test"),
            ("last_name", "Clerk"),
            ("email", "test.clerk@sakilastaff.com"),
            ("username", "test_clerk"),
            ("password", "initial-pass"),
            ("active", "on"),
            ("store_id", "1"),
            ("address_id", "1"),
        ])
        .send()
        .await
        .expect("Failed to create staff");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let id = staff_id_from_location(&resp);

    // The edit screen shows the created member
    let resp = client
        .get(format!("{base_url}/staff/{id}"))
        .send()
        .await
        .expect("Failed to get staff detail");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("test_clerk"));

    // Update
    let resp = client
        .post(format!("{base_url}/staff/{id}/update"))
        .form(&[
            ("first_name", "Renamed"),
            ("last_name", "Clerk"),
            ("email", "test.clerk@sakilastaff.com"),
            ("username", "test_clerk"),
            ("password", ""),
            ("store_id", "1"),
            ("address_id", "1"),
        ])
        .send()
        .await
        .expect("Failed to update staff");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = client
        .get(format!("{base_url}/staff/{id}"))
        .send()
        .await
        .expect("Failed to get staff detail");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Renamed"));

    // Delete
    let resp = client
        .post(format!("{base_url}/staff/{id}/delete"))
        .send()
        .await
        .expect("Failed to delete staff");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = client
        .get(format!("{base_url}/staff/{id}"))
        .send()
        .await
        .expect("Failed to get staff detail");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running panel and seeded database"]
async fn test_staff_create_missing_fields_rerenders() {
    let client = panel_client();
    login(&client).await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/staff"))
        .form(&[
            ("first_name", ""),
            ("last_name", "Clerk"),
            ("email", ""),
            ("username", ""),
            ("password", ""),
            ("store_id", "1"),
            ("address_id", "1"),
        ])
        .send()
        .await
        .expect("Failed to post staff form");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Missing fields"));
    assert!(body.contains("first_name"));
    assert!(body.contains("username"));
    // The submitted values survive the re-render
    assert!(body.contains("Clerk"));
}

#[tokio::test]
#[ignore = "Requires running panel and seeded database"]
async fn test_staff_unknown_id_is_404() {
    let client = panel_client();
    login(&client).await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/staff/999999"))
        .send()
        .await
        .expect("Failed to get staff detail");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
