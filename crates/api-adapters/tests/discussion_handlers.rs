//! Routing, status-code and identity-header behavior of the discussion
//! endpoints, driven through the router with mocked persistence.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use api_adapters::web::{router, AppState};
use domains::models::{Discussion, DiscussionCategory};
use domains::ports::{MockForumStore, MockProductStore, MockSellerDirectory};
use services::{ForumService, ProductService};

fn app(store: MockForumStore) -> Router {
    let state = AppState {
        forum: Arc::new(ForumService::new(Arc::new(store), 10)),
        products: Arc::new(ProductService::new(
            Arc::new(MockProductStore::new()),
            Arc::new(MockSellerDirectory::new()),
        )),
    };
    router(state)
}

fn stored_discussion(id: Uuid, author_id: Uuid) -> Discussion {
    let now = Utc::now();
    Discussion {
        id,
        title: "Seed sourcing".into(),
        description: "Where is everyone buying hybrid seed?".into(),
        category: DiscussionCategory::Farming,
        tags: vec!["seed".into()],
        author_id,
        created_at: now,
        updated_at: now,
    }
}

fn post_json(uri: &str, actor: Option<Uuid>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(actor) = actor {
        builder = builder.header("x-user-id", actor.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let app = app(MockForumStore::new());
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn mutations_without_identity_are_401() {
    // The request must be rejected before persistence is touched; the
    // bare mock panics on any call.
    let app = app(MockForumStore::new());

    let request = post_json(
        "/api/discussions",
        None,
        json!({
            "title": "t", "description": "d", "category": "general", "tags": []
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("x-user-id"));
}

#[tokio::test]
async fn create_discussion_returns_201_with_the_record() {
    let author = Uuid::now_v7();
    let mut store = MockForumStore::new();
    store
        .expect_insert_discussion()
        .withf(move |d| d.author_id == author)
        .times(1)
        .returning(|_| Ok(()));

    let request = post_json(
        "/api/discussions",
        Some(author),
        json!({
            "title": "Mandi prices today",
            "description": "Tomato went up again",
            "category": "pricing",
            "tags": ["tomato"]
        }),
    );
    let response = app(store).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Mandi prices today");
    assert_eq!(body["author_id"], json!(author.to_string()));
    assert_eq!(body["category"], "pricing");
}

#[tokio::test]
async fn blank_title_is_422() {
    let app = app(MockForumStore::new());
    let request = post_json(
        "/api/discussions",
        Some(Uuid::now_v7()),
        json!({
            "title": "  ", "description": "d", "category": "general", "tags": []
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Title is required"));
}

#[tokio::test]
async fn unknown_discussion_is_404() {
    let id = Uuid::now_v7();
    let mut store = MockForumStore::new();
    store.expect_discussion().returning(|_| Ok(None));

    let response = app(store)
        .oneshot(
            Request::get(format!("/api/discussions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn strangers_cannot_delete_a_discussion() {
    let id = Uuid::now_v7();
    let author = Uuid::now_v7();
    let stranger = Uuid::now_v7();
    let mut store = MockForumStore::new();
    store
        .expect_discussion()
        .returning(move |id| Ok(Some(stored_discussion(id, author))));

    let response = app(store)
        .oneshot(
            Request::delete(format!("/api/discussions/{id}"))
                .header("x-user-id", stranger.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn author_delete_returns_204() {
    let id = Uuid::now_v7();
    let author = Uuid::now_v7();
    let mut store = MockForumStore::new();
    store
        .expect_discussion()
        .returning(move |id| Ok(Some(stored_discussion(id, author))));
    store
        .expect_delete_discussion()
        .times(1)
        .returning(|_| Ok(()));

    let response = app(store)
        .oneshot(
            Request::delete(format!("/api/discussions/{id}"))
                .header("x-user-id", author.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn posts_page_carries_pagination_metadata() {
    let id = Uuid::now_v7();
    let mut store = MockForumStore::new();
    store
        .expect_posts_page()
        .withf(|_, page, size| *page == 2 && *size == 10)
        .returning(|_, _, _| Ok((vec![], 11)));

    let response = app(store)
        .oneshot(
            Request::get(format!("/api/discussions/{id}/posts?page=2"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total_items"], 11);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["current_page"], 2);
}

#[tokio::test]
async fn comment_on_a_foreign_posts_parent_is_422() {
    let discussion_id = Uuid::now_v7();
    let post_id = Uuid::now_v7();
    let foreign_parent = Uuid::now_v7();
    let author = Uuid::now_v7();

    let mut store = MockForumStore::new();
    store.expect_post().returning(move |id| {
        Ok(Some(domains::models::Post {
            id,
            discussion_id,
            author_id: author,
            content: "anchor".into(),
            created_at: Utc::now(),
        }))
    });
    store.expect_comment().returning(move |id| {
        Ok(Some(domains::models::Comment {
            id,
            post_id: Uuid::now_v7(), // some other post
            parent_id: None,
            author_id: author,
            content: "elsewhere".into(),
            created_at: Utc::now(),
        }))
    });

    let request = post_json(
        &format!("/api/posts/{post_id}/comments"),
        Some(author),
        json!({
            "discussion_id": discussion_id,
            "content": "reply",
            "parent_comment_id": foreign_parent
        }),
    );
    let response = app(store).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Parent comment does not belong to this post"));
}
