//! SQLite mapping for the discussion containment tree.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use domains::models::{Comment, Discussion, Post};
use domains::pagination::page_offset;
use domains::ports::ForumStore;

use super::rows::{CommentRow, DiscussionRow, PostRow};

pub struct SqliteForumStore {
    pool: SqlitePool,
}

impl SqliteForumStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumStore for SqliteForumStore {
    async fn insert_discussion(&self, discussion: Discussion) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO discussions (id, title, description, category, tags, author_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(discussion.id.to_string())
        .bind(discussion.title)
        .bind(discussion.description)
        .bind(discussion.category.as_str())
        .bind(serde_json::to_string(&discussion.tags)?)
        .bind(discussion.author_id.to_string())
        .bind(discussion.created_at)
        .bind(discussion.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn discussion(&self, id: Uuid) -> anyhow::Result<Option<Discussion>> {
        let row = sqlx::query_as::<_, DiscussionRow>("SELECT * FROM discussions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Discussion::try_from).transpose()
    }

    async fn update_discussion(&self, discussion: Discussion) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE discussions SET title = ?, description = ?, category = ?, tags = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(discussion.title)
        .bind(discussion.description)
        .bind(discussion.category.as_str())
        .bind(serde_json::to_string(&discussion.tags)?)
        .bind(discussion.updated_at)
        .bind(discussion.id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// One transaction, children first, so a failure partway can't leave
    /// orphaned posts or comments behind.
    async fn delete_discussion(&self, id: Uuid) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        let id = id.to_string();

        let comments = sqlx::query(
            "DELETE FROM comments WHERE post_id IN (SELECT id FROM posts WHERE discussion_id = ?)",
        )
        .bind(&id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        let posts = sqlx::query("DELETE FROM posts WHERE discussion_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM discussions WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(%id, posts, comments, "discussion tree removed");
        Ok(())
    }

    async fn discussions_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> anyhow::Result<(Vec<Discussion>, u64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM discussions")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, DiscussionRow>(
            "SELECT * FROM discussions ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(page_size))
        .bind(page_offset(page, page_size) as i64)
        .fetch_all(&self.pool)
        .await?;

        let discussions = rows
            .into_iter()
            .map(Discussion::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok((discussions, total as u64))
    }

    async fn insert_post(&self, post: Post) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO posts (id, discussion_id, author_id, content, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(post.id.to_string())
        .bind(post.discussion_id.to_string())
        .bind(post.author_id.to_string())
        .bind(post.content)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn post(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>("SELECT * FROM posts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Post::try_from).transpose()
    }

    async fn posts_page(
        &self,
        discussion_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> anyhow::Result<(Vec<Post>, u64)> {
        let discussion_id = discussion_id.to_string();
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE discussion_id = ?")
            .bind(&discussion_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT * FROM posts WHERE discussion_id = ? ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?",
        )
        .bind(&discussion_id)
        .bind(i64::from(page_size))
        .bind(page_offset(page, page_size) as i64)
        .fetch_all(&self.pool)
        .await?;

        let posts = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok((posts, total as u64))
    }

    async fn insert_comment(&self, comment: Comment) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, post_id, parent_id, author_id, content, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(comment.id.to_string())
        .bind(comment.post_id.to_string())
        .bind(comment.parent_id.map(|id| id.to_string()))
        .bind(comment.author_id.to_string())
        .bind(comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn comment(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>("SELECT * FROM comments WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Comment::try_from).transpose()
    }

    async fn comments_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT * FROM comments WHERE post_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Comment::try_from)
            .collect::<anyhow::Result<Vec<_>>>()
    }
}
