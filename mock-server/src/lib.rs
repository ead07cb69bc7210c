//! In-memory stand-in for the blog backend.
//!
//! Serves `/api/auth` and `/api/posts` with the same status codes and
//! `{"error": ...}` bodies as the real service so clients can be tested over
//! real HTTP.

mod store;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub use store::{Store, StoreError};

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

pub type Db = Arc<RwLock<Store>>;

/// An error response: `{"error": message}` with `status`.
#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    message: String,
}

impl ErrorResponse {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<StoreError> for ErrorResponse {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
            StoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        };
        warn!(%status, error = %err, "request rejected");
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(_: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid JSON")
    }
}

impl From<PathRejection> for ErrorResponse {
    fn from(_: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid ID")
    }
}

/// The user asserted by the `X-User-ID` header.
///
/// Missing header is 401, anything but an integer is 400.
#[derive(Debug, Clone, Copy)]
pub struct ActingUser(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ErrorResponse::new(StatusCode::UNAUTHORIZED, "user not authenticated"))?;
        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .map(ActingUser)
            .ok_or_else(|| ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid user ID"))
    }
}

type ApiResult<T> = Result<T, ErrorResponse>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", get(get_post).delete(delete_post))
        .route("/api/posts/{id}/comments", get(list_comments).post(create_comment))
        .route("/api/posts/{id}/comments/{comment_id}", delete(delete_comment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn register(
    State(db): State<Db>,
    input: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(input) = input?;
    let user = db.write().await.register(input)?;
    info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(db): State<Db>,
    input: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(creds) = input?;
    let user = db.read().await.login(&creds)?;
    Ok(Json(user))
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let posts = db.read().await.posts();
    Json(posts)
}

async fn get_post(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Post>> {
    let Path(id) = id?;
    let post = db.read().await.post(id);
    post.map(Json)
        .ok_or_else(|| ErrorResponse::new(StatusCode::NOT_FOUND, "post not found"))
}

async fn create_post(
    State(db): State<Db>,
    ActingUser(user_id): ActingUser,
    input: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(input) = input?;
    let post = db.write().await.create_post(input, user_id)?;
    info!(post_id = post.id, user_id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn delete_post(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<Json<serde_json::Value>> {
    let Path(id) = id?;
    db.write().await.delete_post(id, user_id)?;
    info!(post_id = id, user_id, "post deleted");
    Ok(Json(json!({ "message": "post deleted" })))
}

async fn list_comments(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Comment>>> {
    let Path(post_id) = id?;
    let comments = db.read().await.comments(post_id);
    Ok(Json(comments))
}

async fn create_comment(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
    ActingUser(user_id): ActingUser,
    input: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let Path(post_id) = id?;
    let Json(input) = input?;
    let comment = db.write().await.create_comment(post_id, input, user_id)?;
    info!(comment_id = comment.id, post_id, user_id, "comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn delete_comment(
    State(db): State<Db>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<Json<serde_json::Value>> {
    let Path((post_id, comment_id)) = ids?;
    db.write().await.delete_comment(post_id, comment_id, user_id)?;
    info!(comment_id, post_id, user_id, "comment deleted");
    Ok(Json(json!({ "message": "comment deleted" })))
}
