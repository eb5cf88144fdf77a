//! Status-code and denormalization behavior of the product endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use api_adapters::web::{router, AppState};
use domains::models::{Product, Seller, SellerType};
use domains::ports::{MockForumStore, MockProductStore, MockSellerDirectory};
use services::{ForumService, ProductService};

fn app(store: MockProductStore, sellers: MockSellerDirectory) -> Router {
    let state = AppState {
        forum: Arc::new(ForumService::new(Arc::new(MockForumStore::new()), 10)),
        products: Arc::new(ProductService::new(Arc::new(store), Arc::new(sellers))),
    };
    router(state)
}

fn draft_json(seller_id: Uuid) -> Value {
    json!({
        "name": "Turmeric powder",
        "description": "Single origin, 1kg pouches",
        "price": "240.00",
        "quantity": 80,
        "category": "spices",
        "seller_id": seller_id,
        "seller_name": "Sangli Spice Co",
        "seller_type": "vendor"
    })
}

fn stored_product(id: Uuid) -> Product {
    let now = Utc::now();
    Product {
        id,
        name: "Turmeric powder".into(),
        description: "Single origin, 1kg pouches".into(),
        price: "240.00".parse().unwrap(),
        quantity: 80,
        images: vec![],
        category: "spices".into(),
        seller_id: Uuid::now_v7(),
        seller_name: "Sangli Spice Co".into(),
        seller_type: SellerType::Vendor,
        certification: None,
        minimum_order: 1,
        bulk_discounts: vec![],
        city: Some("Sangli".into()),
        view_count: 3,
        order_count: 0,
        last_order_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_returns_201_with_the_sellers_city_copied() {
    let seller_id = Uuid::now_v7();
    let mut sellers = MockSellerDirectory::new();
    sellers.expect_seller().returning(move |id| {
        Ok(Some(Seller {
            id,
            display_name: "Sangli Spice Co".into(),
            city: Some("Springfield".into()),
            created_at: Utc::now(),
        }))
    });
    let mut store = MockProductStore::new();
    store.expect_insert_product().times(1).returning(|_| Ok(()));

    let response = app(store, sellers)
        .oneshot(post_json("/api/products", draft_json(seller_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["city"], "Springfield");
    assert_eq!(body["minimum_order"], 1);
    assert_eq!(body["view_count"], 0);
}

#[tokio::test]
async fn create_with_unknown_seller_leaves_city_null() {
    let mut sellers = MockSellerDirectory::new();
    sellers.expect_seller().returning(|_| Ok(None));
    let mut store = MockProductStore::new();
    store.expect_insert_product().times(1).returning(|_| Ok(()));

    let response = app(store, sellers)
        .oneshot(post_json("/api/products", draft_json(Uuid::now_v7())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["city"].is_null());
}

#[tokio::test]
async fn negative_price_is_422_before_any_store_call() {
    // Bare mocks: any persistence or directory call panics.
    let app = app(MockProductStore::new(), MockSellerDirectory::new());

    let mut draft = draft_json(Uuid::now_v7());
    draft["price"] = json!("-1");
    let response = app.oneshot(post_json("/api/products", draft)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Price cannot be negative"));
}

#[tokio::test]
async fn get_product_counts_the_view() {
    let id = Uuid::now_v7();
    let mut store = MockProductStore::new();
    store.expect_record_view().times(1).returning(|_| Ok(()));
    store
        .expect_product()
        .returning(move |id| Ok(Some(stored_product(id))));

    let response = app(store, MockSellerDirectory::new())
        .oneshot(
            Request::get(format!("/api/products/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Turmeric powder");
    assert_eq!(body["price"], "240.00");
}

#[tokio::test]
async fn unknown_product_is_404() {
    let mut store = MockProductStore::new();
    store.expect_record_view().returning(|_| Ok(()));
    store.expect_product().returning(|_| Ok(None));

    let response = app(store, MockSellerDirectory::new())
        .oneshot(
            Request::get(format!("/api/products/{}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recording_an_order_returns_204() {
    let id = Uuid::now_v7();
    let mut store = MockProductStore::new();
    store
        .expect_product()
        .returning(move |id| Ok(Some(stored_product(id))));
    store
        .expect_record_order()
        .times(1)
        .returning(|_, _| Ok(()));

    let response = app(store, MockSellerDirectory::new())
        .oneshot(post_json(&format!("/api/products/{id}/orders"), json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn update_merges_changes_over_the_stored_record() {
    let id = Uuid::now_v7();
    let mut store = MockProductStore::new();
    store
        .expect_product()
        .returning(move |id| Ok(Some(stored_product(id))));
    store
        .expect_update_product()
        .withf(|p| p.quantity == 50 && p.name == "Turmeric powder")
        .times(1)
        .returning(|_| Ok(()));

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/products/{id}"))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "quantity": 50 }).to_string()))
        .unwrap();
    let response = app(store, MockSellerDirectory::new())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["quantity"], 50);
    assert_eq!(body["city"], "Sangli");
}
