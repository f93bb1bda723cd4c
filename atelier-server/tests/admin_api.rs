//! Admin back-office endpoints: user management, inventory, banners.

mod common;

use atelier_server::db::{carts, orders, users};
use common::{admin_token, customer, send, test_app};
use http::StatusCode;
use serde_json::json;
use shared::models::{NewUser, Role};

#[tokio::test]
async fn admin_accounts_cannot_be_removed() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let admin = admin_token(&state).await;

    // A second admin, created out of band
    let second = users::create(
        &state.db,
        NewUser {
            name: "Second Admin".into(),
            email: "second@atelier.test".into(),
            password_hash: String::new(),
            role: Role::Admin,
            verified: true,
            phone: String::new(),
            address_line: String::new(),
            barangay: String::new(),
            city: String::new(),
            province: String::new(),
            zip: String::new(),
            country: String::new(),
        },
    )
    .await
    .unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/admin/users/{}", second.id.unwrap()),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown target
    let (status, _) = send(
        &app,
        "DELETE",
        "/api/admin/users/does-not-exist",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_deletion_cascades_to_cart_and_orders() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let admin = admin_token(&state).await;
    let (user, token) = customer(&state, "maria@example.com").await;
    let user_id = user.id.clone().unwrap();

    // Give the user a cart and an order
    let (_, products) = send(&app, "GET", "/api/products", None, None).await;
    let product = &products.as_array().unwrap()[0];
    let product_id = product["id"].as_str().unwrap();

    // The cart is created on first read, then written
    let (status, _) = send(&app, "GET", "/api/cart", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "PUT",
        "/api/cart",
        Some(&token),
        Some(json!({ "items": [{ "product_id": product_id, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "items": [{ "product_id": product_id, "quantity": 1, "price": 300.0 }],
            "address": "12 Example St, Makati",
            "contact_name": "Maria",
            "phone": "09170000000",
            "email": "maria@example.com",
            "payment_method": "COD"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/admin/users/{user_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);

    assert!(users::find_by_id(&state.db, &user_id).await.unwrap().is_none());
    assert!(carts::find_by_user(&state.db, &user_id).await.unwrap().is_none());
    assert!(orders::find_by_user(&state.db, &user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn user_listing_is_reduced_to_directory_fields() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let admin = admin_token(&state).await;
    customer(&state, "maria@example.com").await;

    let (status, listing) = send(&app, "GET", "/api/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = listing.as_array().unwrap();
    assert_eq!(rows.len(), 2); // bootstrap admin + customer
    for row in rows {
        assert!(row.get("password_hash").is_none());
        assert!(row.get("address").is_none());
        assert!(row["email"].as_str().is_some());
    }
}

#[tokio::test]
async fn inventory_mirrors_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let admin = admin_token(&state).await;

    let (status, inventory) = send(&app, "GET", "/api/admin/inventory", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inventory.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn banner_and_popup_configuration_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let admin = admin_token(&state).await;

    // Defaults are installed at startup and publicly readable
    let (status, banners) = send(&app, "GET", "/api/public/banners", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(banners.as_array().unwrap().len(), 5);

    let (status, popup) = send(&app, "GET", "/api/public/login-popup", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(popup["image"], "");

    // Admin replaces the carousel
    let (status, updated) = send(
        &app,
        "PUT",
        "/api/admin/banners",
        Some(&admin),
        Some(json!({ "images": ["https://cdn.example/one.png"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.as_array().unwrap().len(), 1);

    let (_, banners) = send(&app, "GET", "/api/public/banners", None, None).await;
    assert_eq!(banners.as_array().unwrap().len(), 1);

    // Empty image list is rejected
    let (status, _) = send(
        &app,
        "PUT",
        "/api/admin/banners",
        Some(&admin),
        Some(json!({ "images": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Popup image
    let (status, popup) = send(
        &app,
        "PUT",
        "/api/admin/login-popup",
        Some(&admin),
        Some(json!({ "image": "https://cdn.example/popup.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(popup["image"], "https://cdn.example/popup.png");

    let (_, popup) = send(&app, "GET", "/api/public/login-popup", None, None).await;
    assert_eq!(popup["image"], "https://cdn.example/popup.png");
}
