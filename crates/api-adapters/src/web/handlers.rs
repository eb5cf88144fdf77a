//! Request handlers. Identity arrives as an `x-user-id` header set by the
//! fronting auth layer; everything else is plain JSON in, JSON out.

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use domains::models::{
    Comment, Discussion, DiscussionListing, NewDiscussion, NewProduct, Post, PostPage, Product,
    ProductChanges,
};

use super::error::ApiError;
use super::AppState;

/// Acting user, taken from the `x-user-id` header. Authentication happens
/// upstream; by the time a request lands here the header is trusted.
pub struct ActorId(pub Uuid);

impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated("missing x-user-id header"))?;
        let id = Uuid::parse_str(raw)
            .map_err(|_| ApiError::Unauthenticated("malformed x-user-id header"))?;
        Ok(ActorId(id))
    }
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct NewPostBody {
    pub content: String,
}

#[derive(Deserialize)]
pub struct NewCommentBody {
    pub discussion_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub parent_comment_id: Option<Uuid>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_discussions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<DiscussionListing>, ApiError> {
    Ok(Json(state.forum.list_discussions(query.page).await?))
}

pub async fn create_discussion(
    State(state): State<AppState>,
    actor: ActorId,
    Json(fields): Json<NewDiscussion>,
) -> Result<(StatusCode, Json<Discussion>), ApiError> {
    let discussion = state.forum.create_discussion(actor.0, fields).await?;
    Ok((StatusCode::CREATED, Json(discussion)))
}

pub async fn get_discussion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Discussion>, ApiError> {
    Ok(Json(state.forum.discussion(id).await?))
}

pub async fn update_discussion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorId,
    Json(fields): Json<NewDiscussion>,
) -> Result<Json<Discussion>, ApiError> {
    Ok(Json(state.forum.update_discussion(actor.0, id, fields).await?))
}

pub async fn delete_discussion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorId,
) -> Result<StatusCode, ApiError> {
    state.forum.delete_discussion(actor.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_posts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostPage>, ApiError> {
    Ok(Json(state.forum.discussion_posts(id, query.page).await?))
}

pub async fn create_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorId,
    Json(body): Json<NewPostBody>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.forum.create_post(actor.0, id, body.content).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.forum.post_comments(post_id).await?))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    actor: ActorId,
    Json(body): Json<NewCommentBody>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state
        .forum
        .create_comment(
            actor.0,
            post_id,
            body.discussion_id,
            body.content,
            body.parent_comment_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(draft): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Fetching a product counts as one catalog view.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.product_detail(id).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<ProductChanges>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.update_product(id, changes).await?))
}

pub async fn record_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.products.record_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
