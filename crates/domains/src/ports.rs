//! # Core Ports
//!
//! Any adapter must implement these traits to be used by the binaries.
//! Storage-facing ports report `anyhow` errors (the adapter decides what
//! they mean); the service-facing `ForumGateway` speaks `DomainError`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Comment, Discussion, NewDiscussion, Post, PostPage, Product, Seller,
};

/// Data persistence contract for the discussion containment tree.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ForumStore: Send + Sync {
    // Discussion operations
    async fn insert_discussion(&self, discussion: Discussion) -> anyhow::Result<()>;
    async fn discussion(&self, id: Uuid) -> anyhow::Result<Option<Discussion>>;
    async fn update_discussion(&self, discussion: Discussion) -> anyhow::Result<()>;
    /// Removes the discussion together with its posts and their comments.
    async fn delete_discussion(&self, id: Uuid) -> anyhow::Result<()>;
    /// Newest-first page of the forum index plus the total discussion count.
    async fn discussions_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> anyhow::Result<(Vec<Discussion>, u64)>;

    // Post operations
    async fn insert_post(&self, post: Post) -> anyhow::Result<()>;
    async fn post(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    /// Oldest-first page of a discussion's posts plus the total post count.
    async fn posts_page(
        &self,
        discussion_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> anyhow::Result<(Vec<Post>, u64)>;

    // Comment operations
    async fn insert_comment(&self, comment: Comment) -> anyhow::Result<()>;
    async fn comment(&self, id: Uuid) -> anyhow::Result<Option<Comment>>;
    async fn comments_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>>;
}

/// Data persistence contract for the marketplace catalog.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> anyhow::Result<()>;
    async fn product(&self, id: Uuid) -> anyhow::Result<Option<Product>>;
    async fn update_product(&self, product: Product) -> anyhow::Result<()>;
    /// Demand counter: one more catalog view.
    async fn record_view(&self, id: Uuid) -> anyhow::Result<()>;
    /// Demand counter: one more order, stamped with its time.
    async fn record_order(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()>;
}

/// Lookup of the user a product's seller reference points at.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SellerDirectory: Send + Sync {
    async fn seller(&self, id: Uuid) -> anyhow::Result<Option<Seller>>;
}

/// The collaborator surface the discussion page controller consumes,
/// already bound to the acting user's identity.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ForumGateway: Send + Sync {
    async fn discussion(&self, id: Uuid) -> Result<Discussion>;
    async fn discussion_posts(&self, id: Uuid, page: u32) -> Result<PostPage>;
    async fn post_comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;
    async fn create_post(&self, discussion_id: Uuid, content: String) -> Result<Post>;
    async fn create_comment(
        &self,
        post_id: Uuid,
        discussion_id: Uuid,
        content: String,
        parent_comment_id: Option<Uuid>,
    ) -> Result<Comment>;
    async fn create_discussion(&self, fields: NewDiscussion) -> Result<Discussion>;
    async fn update_discussion(&self, id: Uuid, fields: NewDiscussion) -> Result<Discussion>;
    async fn delete_discussion(&self, id: Uuid) -> Result<()>;
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible notification. The toast plumbing that renders these is an
/// external collaborator behind the [`Notifier`] port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Delivery contract for user-visible notifications.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
