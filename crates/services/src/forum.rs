//! # ForumService
//!
//! Backend of the discussion API surface. Owns the containment-tree rules:
//! who may touch a discussion, which post a comment may hang off, and how
//! pagination metadata is derived from the store's counts.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{
    Comment, Discussion, DiscussionListing, NewDiscussion, Post, PostPage,
};
use domains::pagination::PaginationData;
use domains::ports::ForumStore;

/// Actor-aware service over a [`ForumStore`]. Methods that create or mutate
/// records take the acting user explicitly; wrap it in a
/// [`crate::Session`] to get the identity-bound gateway surface.
pub struct ForumService {
    store: Arc<dyn ForumStore>,
    posts_per_page: u32,
}

impl ForumService {
    pub fn new(store: Arc<dyn ForumStore>, posts_per_page: u32) -> Self {
        Self {
            store,
            posts_per_page,
        }
    }

    pub async fn create_discussion(
        &self,
        author: Uuid,
        fields: NewDiscussion,
    ) -> Result<Discussion> {
        validate_discussion_fields(&fields)?;

        let now = Utc::now();
        let discussion = Discussion {
            id: Uuid::now_v7(),
            title: fields.title.trim().to_string(),
            description: fields.description.trim().to_string(),
            category: fields.category,
            tags: fields.tags,
            author_id: author,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_discussion(discussion.clone()).await?;
        info!(discussion_id = %discussion.id, %author, "discussion created");
        Ok(discussion)
    }

    /// Replaces title, description, category and tags. Everything else,
    /// `created_at` included, is preserved. Author-only.
    pub async fn update_discussion(
        &self,
        actor: Uuid,
        id: Uuid,
        fields: NewDiscussion,
    ) -> Result<Discussion> {
        validate_discussion_fields(&fields)?;

        let mut discussion = self.require_discussion(id).await?;
        if discussion.author_id != actor {
            return Err(DomainError::Unauthorized(
                "only the author can edit this discussion".into(),
            ));
        }

        discussion.title = fields.title.trim().to_string();
        discussion.description = fields.description.trim().to_string();
        discussion.category = fields.category;
        discussion.tags = fields.tags;
        discussion.updated_at = Utc::now();

        self.store.update_discussion(discussion.clone()).await?;
        info!(discussion_id = %id, "discussion updated");
        Ok(discussion)
    }

    pub async fn delete_discussion(&self, actor: Uuid, id: Uuid) -> Result<()> {
        let discussion = self.require_discussion(id).await?;
        if discussion.author_id != actor {
            return Err(DomainError::Unauthorized(
                "only the author can delete this discussion".into(),
            ));
        }

        self.store.delete_discussion(id).await?;
        info!(discussion_id = %id, "discussion deleted");
        Ok(())
    }

    pub async fn discussion(&self, id: Uuid) -> Result<Discussion> {
        self.require_discussion(id).await
    }

    /// Newest-first page of the forum index.
    pub async fn list_discussions(&self, page: u32) -> Result<DiscussionListing> {
        let page = page.max(1);
        let (discussions, total) = self
            .store
            .discussions_page(page, self.posts_per_page)
            .await?;
        Ok(DiscussionListing {
            discussions,
            pagination: PaginationData::derive(total, page, self.posts_per_page),
        })
    }

    /// One page of a discussion's posts, oldest first, with pagination
    /// derived from the live count. An unknown discussion id yields an
    /// empty page rather than an error; post fetching is deliberately
    /// independent of the discussion fetch.
    pub async fn discussion_posts(&self, discussion_id: Uuid, page: u32) -> Result<PostPage> {
        let page = page.max(1);
        let (posts, total) = self
            .store
            .posts_page(discussion_id, page, self.posts_per_page)
            .await?;
        debug!(%discussion_id, page, total, "posts page fetched");
        Ok(PostPage {
            posts,
            pagination: PaginationData::derive(total, page, self.posts_per_page),
        })
    }

    pub async fn create_post(
        &self,
        author: Uuid,
        discussion_id: Uuid,
        content: String,
    ) -> Result<Post> {
        if content.trim().is_empty() {
            return Err(DomainError::validation("Post content cannot be empty"));
        }
        // The anchor must exist; comments will hang off this record.
        self.require_discussion(discussion_id).await?;

        let post = Post {
            id: Uuid::now_v7(),
            discussion_id,
            author_id: author,
            content,
            created_at: Utc::now(),
        };
        self.store.insert_post(post.clone()).await?;
        info!(post_id = %post.id, %discussion_id, "post created");
        Ok(post)
    }

    /// A post's full comment list, oldest first.
    pub async fn post_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        Ok(self.store.comments_for_post(post_id).await?)
    }

    pub async fn create_comment(
        &self,
        author: Uuid,
        post_id: Uuid,
        discussion_id: Uuid,
        content: String,
        parent_comment_id: Option<Uuid>,
    ) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(DomainError::validation("Reply content cannot be empty"));
        }

        let post = self
            .store
            .post(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;
        if post.discussion_id != discussion_id {
            return Err(DomainError::validation(
                "Post does not belong to this discussion",
            ));
        }

        // A reply's parent must live on the same post.
        if let Some(parent_id) = parent_comment_id {
            let parent = self
                .store
                .comment(parent_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Comment", parent_id))?;
            if parent.post_id != post_id {
                return Err(DomainError::validation(
                    "Parent comment does not belong to this post",
                ));
            }
        }

        let comment = Comment {
            id: Uuid::now_v7(),
            post_id,
            parent_id: parent_comment_id,
            author_id: author,
            content,
            created_at: Utc::now(),
        };
        self.store.insert_comment(comment.clone()).await?;
        info!(comment_id = %comment.id, %post_id, "comment created");
        Ok(comment)
    }

    async fn require_discussion(&self, id: Uuid) -> Result<Discussion> {
        self.store
            .discussion(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Discussion", id))
    }
}

fn validate_discussion_fields(fields: &NewDiscussion) -> Result<()> {
    if fields.title.trim().is_empty() {
        return Err(DomainError::validation("Title is required"));
    }
    if fields.description.trim().is_empty() {
        return Err(DomainError::validation("Description is required"));
    }
    Ok(())
}
