//! In-memory users, posts and comments.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use crate::{Comment, CreateCommentRequest, CreatePostRequest, Credentials, Post, RegisterRequest, User};

const MIN_PASSWORD_LEN: usize = 6;

/// Failures of store operations. The variant decides the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
}

struct Account {
    user: User,
    password: String,
}

/// Ids are assigned sequentially per table, so ascending id order is
/// creation order.
#[derive(Default)]
pub struct Store {
    accounts: BTreeMap<i64, Account>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_user_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn invalid(msg: &str) -> StoreError {
    StoreError::Invalid(msg.to_string())
}

impl Store {
    pub fn register(&mut self, req: RegisterRequest) -> Result<User, StoreError> {
        if req.email.trim().is_empty() {
            return Err(invalid("email is required"));
        }
        if req.username.trim().is_empty() {
            return Err(invalid("username is required"));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(invalid("password must be at least 6 characters"));
        }
        if self.accounts.values().any(|a| a.user.email == req.email) {
            return Err(invalid("email already registered"));
        }

        self.last_user_id += 1;
        let user = User {
            id: self.last_user_id,
            email: req.email,
            username: req.username,
            created_at: now(),
        };
        self.accounts.insert(
            user.id,
            Account {
                user: user.clone(),
                password: req.password,
            },
        );
        Ok(user)
    }

    pub fn login(&self, creds: &Credentials) -> Result<User, StoreError> {
        self.accounts
            .values()
            .find(|a| a.user.email == creds.email && a.password == creds.password)
            .map(|a| a.user.clone())
            .ok_or_else(|| StoreError::Unauthorized("invalid credentials".to_string()))
    }

    fn user(&self, id: i64) -> Result<&User, StoreError> {
        self.accounts
            .get(&id)
            .map(|a| &a.user)
            .ok_or_else(|| invalid("user not found"))
    }

    /// Newest first.
    pub fn posts(&self) -> Vec<Post> {
        self.posts.values().rev().cloned().collect()
    }

    pub fn post(&self, id: i64) -> Option<Post> {
        self.posts.get(&id).cloned()
    }

    pub fn create_post(&mut self, req: CreatePostRequest, user_id: i64) -> Result<Post, StoreError> {
        if req.title.trim().is_empty() {
            return Err(invalid("title is required"));
        }
        if req.content.trim().is_empty() {
            return Err(invalid("content is required"));
        }
        let username = self.user(user_id)?.username.clone();

        self.last_post_id += 1;
        let post = Post {
            id: self.last_post_id,
            title: req.title,
            content: req.content,
            user_id,
            username,
            created_at: now(),
        };
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    /// Removes the post and every comment on it.
    pub fn delete_post(&mut self, id: i64, user_id: i64) -> Result<(), StoreError> {
        let post = self
            .posts
            .get(&id)
            .ok_or_else(|| StoreError::Forbidden("post not found".to_string()))?;
        if post.user_id != user_id {
            return Err(StoreError::Forbidden(
                "not allowed to delete this post".to_string(),
            ));
        }
        self.posts.remove(&id);
        self.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }

    /// Oldest first. Unknown posts have no comments.
    pub fn comments(&self, post_id: i64) -> Vec<Comment> {
        self.comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn create_comment(
        &mut self,
        post_id: i64,
        req: CreateCommentRequest,
        user_id: i64,
    ) -> Result<Comment, StoreError> {
        if req.content.trim().is_empty() {
            return Err(invalid("content is required"));
        }
        if !self.posts.contains_key(&post_id) {
            return Err(invalid("post not found"));
        }
        let username = self.user(user_id)?.username.clone();

        self.last_comment_id += 1;
        let comment = Comment {
            id: self.last_comment_id,
            post_id,
            user_id,
            username,
            content: req.content,
            created_at: now(),
        };
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    /// Only the author may delete, and only through the post it belongs to.
    pub fn delete_comment(&mut self, post_id: i64, comment_id: i64, user_id: i64) -> Result<(), StoreError> {
        if !self.posts.contains_key(&post_id) {
            return Err(StoreError::Forbidden("post not found".to_string()));
        }
        match self.comments.get(&comment_id) {
            Some(c) if c.post_id == post_id && c.user_id == user_id => {
                self.comments.remove(&comment_id);
                Ok(())
            }
            _ => Err(StoreError::Forbidden(
                "not allowed to delete this comment or it does not exist".to_string(),
            )),
        }
    }
}
