//! Identity-bound façade over [`ForumService`].

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use domains::error::Result;
use domains::models::{Comment, Discussion, NewDiscussion, Post, PostPage};
use domains::ports::ForumGateway;

use crate::ForumService;

/// A [`ForumGateway`] bound to one acting user. Built per request from the
/// authenticated identity; authentication itself happens upstream.
pub struct Session {
    service: Arc<ForumService>,
    user_id: Uuid,
}

impl Session {
    pub fn new(service: Arc<ForumService>, user_id: Uuid) -> Self {
        Self { service, user_id }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

#[async_trait]
impl ForumGateway for Session {
    async fn discussion(&self, id: Uuid) -> Result<Discussion> {
        self.service.discussion(id).await
    }

    async fn discussion_posts(&self, id: Uuid, page: u32) -> Result<PostPage> {
        self.service.discussion_posts(id, page).await
    }

    async fn post_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        self.service.post_comments(post_id).await
    }

    async fn create_post(&self, discussion_id: Uuid, content: String) -> Result<Post> {
        self.service
            .create_post(self.user_id, discussion_id, content)
            .await
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        discussion_id: Uuid,
        content: String,
        parent_comment_id: Option<Uuid>,
    ) -> Result<Comment> {
        self.service
            .create_comment(self.user_id, post_id, discussion_id, content, parent_comment_id)
            .await
    }

    async fn create_discussion(&self, fields: NewDiscussion) -> Result<Discussion> {
        self.service.create_discussion(self.user_id, fields).await
    }

    async fn update_discussion(&self, id: Uuid, fields: NewDiscussion) -> Result<Discussion> {
        self.service
            .update_discussion(self.user_id, id, fields)
            .await
    }

    async fn delete_discussion(&self, id: Uuid) -> Result<()> {
        self.service.delete_discussion(self.user_id, id).await
    }
}
