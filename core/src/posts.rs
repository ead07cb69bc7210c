//! Posts and their nested comments under `/api/posts`.
//!
//! # Design
//! Mutating operations carry the acting user in the `X-User-ID` header;
//! reads are anonymous. Delete responses carry a message body the client
//! ignores once the status is known to be 2xx.

use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::http::{check_status, decode, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Comment, CreateCommentRequest, CreatePostRequest, Post};

/// Synchronous, stateless request builder and response parser for the post
/// endpoints.
#[derive(Debug, Clone)]
pub struct PostApi {
    posts_url: String,
}

impl PostApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            posts_url: format!("{}/api/posts", base_url.trim_end_matches('/')),
        }
    }

    pub fn build_get_all_posts(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.posts_url.clone())
    }

    pub fn build_get_post_by_id(&self, id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/{id}", self.posts_url))
    }

    pub fn build_create_post(
        &self,
        data: &CreatePostRequest,
        user_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Post, self.posts_url.clone())
            .json(data)?
            .acting_user(user_id))
    }

    pub fn build_delete_post(&self, id: i64, user_id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, format!("{}/{id}", self.posts_url)).acting_user(user_id)
    }

    pub fn build_get_comments(&self, post_id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/{post_id}/comments", self.posts_url))
    }

    pub fn build_create_comment(
        &self,
        post_id: i64,
        data: &CreateCommentRequest,
        user_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        Ok(
            HttpRequest::new(HttpMethod::Post, format!("{}/{post_id}/comments", self.posts_url))
                .json(data)?
                .acting_user(user_id),
        )
    }

    pub fn build_delete_comment(&self, post_id: i64, comment_id: i64, user_id: i64) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Delete,
            format!("{}/{post_id}/comments/{comment_id}", self.posts_url),
        )
        .acting_user(user_id)
    }

    pub fn parse_get_all_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        decode(response)
    }

    pub fn parse_get_post_by_id(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode(response)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode(response)
    }

    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_get_comments(&self, response: HttpResponse) -> Result<Vec<Comment>, ApiError> {
        decode(response)
    }

    pub fn parse_create_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        decode(response)
    }

    pub fn parse_delete_comment(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Async post client: one request per call, errors returned as the
/// transport produced them.
#[derive(Debug, Clone)]
pub struct PostClient<T> {
    api: PostApi,
    transport: T,
}

impl<T: Transport> PostClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            api: PostApi::new(base_url),
            transport,
        }
    }

    pub fn api(&self) -> &PostApi {
        &self.api
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[instrument(skip(self))]
    pub async fn get_all_posts(&self) -> Result<Vec<Post>, T::Error> {
        debug!("Sending request");
        let response = self.transport.execute(self.api.build_get_all_posts()).await?;
        Ok(self.api.parse_get_all_posts(response)?)
    }

    #[instrument(skip(self))]
    pub async fn get_post_by_id(&self, id: i64) -> Result<Post, T::Error> {
        debug!("Sending request");
        let response = self.transport.execute(self.api.build_get_post_by_id(id)).await?;
        Ok(self.api.parse_get_post_by_id(response)?)
    }

    #[instrument(skip(self, data))]
    pub async fn create_post(&self, data: &CreatePostRequest, user_id: i64) -> Result<Post, T::Error> {
        debug!("Sending request");
        let request = self.api.build_create_post(data, user_id)?;
        let response = self.transport.execute(request).await?;
        Ok(self.api.parse_create_post(response)?)
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: i64, user_id: i64) -> Result<(), T::Error> {
        debug!("Sending request");
        let response = self
            .transport
            .execute(self.api.build_delete_post(id, user_id))
            .await?;
        Ok(self.api.parse_delete_post(response)?)
    }

    #[instrument(skip(self))]
    pub async fn get_comments(&self, post_id: i64) -> Result<Vec<Comment>, T::Error> {
        debug!("Sending request");
        let response = self.transport.execute(self.api.build_get_comments(post_id)).await?;
        Ok(self.api.parse_get_comments(response)?)
    }

    #[instrument(skip(self, data))]
    pub async fn create_comment(
        &self,
        post_id: i64,
        data: &CreateCommentRequest,
        user_id: i64,
    ) -> Result<Comment, T::Error> {
        debug!("Sending request");
        let request = self.api.build_create_comment(post_id, data, user_id)?;
        let response = self.transport.execute(request).await?;
        Ok(self.api.parse_create_comment(response)?)
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        user_id: i64,
    ) -> Result<(), T::Error> {
        debug!("Sending request");
        let request = self.api.build_delete_comment(post_id, comment_id, user_id);
        let response = self.transport.execute(request).await?;
        Ok(self.api.parse_delete_comment(response)?)
    }
}
