//! # Discussion Page Controller
//!
//! View-model for a single discussion: the discussion record, one page of
//! posts, and every visible post's comment list. All mutations go through
//! a re-fetch-after-write cycle so the view never drifts from what the
//! backend holds. State moves only through [`PageState::apply`]; failures
//! surface as [`Notice`]s through the [`Notifier`] port and are never
//! propagated to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::warn;
use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{
    parse_tag_list, Comment, Discussion, DiscussionCategory, NewDiscussion, Post,
};
use domains::pagination::PaginationData;
use domains::ports::{ForumGateway, Notice, Notifier};

/// What the page is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageMode {
    #[default]
    View,
    Edit,
    Create,
}

/// Route target the page is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    /// Show an existing discussion.
    Existing(Uuid),
    /// Blank create form; nothing is fetched.
    Create,
}

/// Navigation the caller must perform after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    ToForum,
}

/// Everything the page renders from. Mutated exclusively via [`apply`],
/// so every transition is visible in one place.
///
/// [`apply`]: PageState::apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub discussion: Option<Discussion>,
    pub posts: Vec<Post>,
    pub pagination: Option<PaginationData>,
    /// Comment lists keyed by post id, covering the visible posts.
    pub comments: HashMap<Uuid, Vec<Comment>>,
    pub mode: PageMode,
    /// True while the page content is being fetched.
    pub loading: bool,
    /// True while a mutation is in flight; the UI disables its triggering
    /// control off this flag, which is all the re-submission protection
    /// there is.
    pub submitting: bool,
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    LoadingStarted,
    LoadingFinished,
    SubmitStarted,
    SubmitFinished,
    DiscussionLoaded(Discussion),
    PostsLoaded {
        posts: Vec<Post>,
        pagination: PaginationData,
    },
    CommentsLoaded {
        post_id: Uuid,
        comments: Vec<Comment>,
    },
    ModeChanged(PageMode),
}

impl PageState {
    pub fn apply(&mut self, change: StateChange) {
        match change {
            StateChange::LoadingStarted => self.loading = true,
            StateChange::LoadingFinished => self.loading = false,
            StateChange::SubmitStarted => self.submitting = true,
            StateChange::SubmitFinished => self.submitting = false,
            StateChange::DiscussionLoaded(discussion) => self.discussion = Some(discussion),
            StateChange::PostsLoaded { posts, pagination } => {
                // Comments fetched for a previous page are no longer visible.
                self.comments
                    .retain(|post_id, _| posts.iter().any(|post| post.id == *post_id));
                self.posts = posts;
                self.pagination = Some(pagination);
            }
            StateChange::CommentsLoaded { post_id, comments } => {
                self.comments.insert(post_id, comments);
            }
            StateChange::ModeChanged(mode) => self.mode = mode,
        }
    }
}

/// Raw form input for creating or editing a discussion. Tags arrive as one
/// comma-separated string and are split before transmission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscussionForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: String,
}

impl DiscussionForm {
    /// Local validation; nothing goes over the wire when this fails.
    pub fn validate(&self) -> Result<NewDiscussion> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("Title is required"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("Description is required"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("Category is required"));
        }
        let category = self.category.parse::<DiscussionCategory>()?;
        Ok(NewDiscussion {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            tags: parse_tag_list(&self.tags),
        })
    }
}

impl From<&Discussion> for DiscussionForm {
    fn from(discussion: &Discussion) -> Self {
        Self {
            title: discussion.title.clone(),
            description: discussion.description.clone(),
            category: discussion.category.to_string(),
            tags: discussion.tags.join(", "),
        }
    }
}

/// The controller. `&mut self` on every operation gives the single-flight
/// behavior for free; the `submitting` flag additionally mirrors the
/// disabled submit control. In-flight requests are never cancelled: when
/// the page goes away the controller is simply dropped and late responses
/// have nowhere to land.
pub struct DiscussionPage {
    gateway: Arc<dyn ForumGateway>,
    notices: Arc<dyn Notifier>,
    /// The route's discussion id; kept outside [`PageState`] so posts can
    /// still be fetched when the discussion fetch itself failed.
    discussion_ref: Option<Uuid>,
    state: PageState,
}

impl DiscussionPage {
    pub fn new(gateway: Arc<dyn ForumGateway>, notices: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notices,
            discussion_ref: None,
            state: PageState::default(),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Entry point. For an existing discussion this fetches the record,
    /// the first page of posts and their comments; for the create form
    /// nothing is fetched at all.
    pub async fn open(&mut self, target: PageTarget) {
        match target {
            PageTarget::Create => {
                self.discussion_ref = None;
                self.state.apply(StateChange::ModeChanged(PageMode::Create));
            }
            PageTarget::Existing(id) => {
                self.discussion_ref = Some(id);
                self.state.apply(StateChange::LoadingStarted);
                self.load_discussion().await;
                self.load_posts_page(1).await;
                self.state.apply(StateChange::LoadingFinished);
            }
        }
    }

    /// Flips to another page of posts; the discussion record itself is not
    /// re-fetched.
    pub async fn change_page(&mut self, page: u32) {
        self.state.apply(StateChange::LoadingStarted);
        self.load_posts_page(page).await;
        self.state.apply(StateChange::LoadingFinished);
    }

    /// Adds a top-level post. Blank content is rejected locally; on
    /// success the whole current page is re-fetched rather than appending
    /// in place, so server-side ordering and pagination stay authoritative.
    pub async fn submit_post(&mut self, content: String) {
        let Some(discussion_id) = self.discussion_ref else {
            return;
        };
        if content.trim().is_empty() {
            self.notices
                .notify(Notice::error("Post content cannot be empty"));
            return;
        }
        if self.state.submitting {
            return;
        }

        self.state.apply(StateChange::SubmitStarted);
        let result = self.gateway.create_post(discussion_id, content).await;
        self.state.apply(StateChange::SubmitFinished);

        match result {
            Ok(_) => {
                self.notices.notify(Notice::success("Post added"));
                let current = self.current_page();
                self.load_posts_page(current).await;
            }
            Err(err) => self.notify_error("Failed to add post", &err),
        }
    }

    /// Adds a comment under a post, optionally nested beneath another
    /// comment. Only that post's comment list is re-fetched afterwards.
    pub async fn submit_reply(
        &mut self,
        post_id: Uuid,
        content: String,
        parent_comment_id: Option<Uuid>,
    ) {
        let Some(discussion_id) = self.discussion_ref else {
            return;
        };
        if content.trim().is_empty() {
            self.notices
                .notify(Notice::error("Reply content cannot be empty"));
            return;
        }
        if self.state.submitting {
            return;
        }

        self.state.apply(StateChange::SubmitStarted);
        let result = self
            .gateway
            .create_comment(post_id, discussion_id, content, parent_comment_id)
            .await;
        self.state.apply(StateChange::SubmitFinished);

        match result {
            Ok(_) => {
                self.notices.notify(Notice::success("Reply added"));
                self.refresh_post_comments(post_id).await;
            }
            Err(err) => self.notify_error("Failed to add reply", &err),
        }
    }

    /// Submits the create or edit form, depending on the current mode.
    /// Create navigates back to the forum; edit reloads the discussion and
    /// returns to view mode in place.
    pub async fn save_discussion(&mut self, form: DiscussionForm) -> Option<Redirect> {
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => {
                self.notices.notify(Notice::error(error_text(&err)));
                return None;
            }
        };
        if self.state.submitting {
            return None;
        }

        match self.state.mode {
            PageMode::Create => {
                self.state.apply(StateChange::SubmitStarted);
                let result = self.gateway.create_discussion(fields).await;
                self.state.apply(StateChange::SubmitFinished);
                match result {
                    Ok(_) => {
                        self.notices.notify(Notice::success("Discussion created"));
                        Some(Redirect::ToForum)
                    }
                    Err(err) => {
                        self.notify_error("Failed to create discussion", &err);
                        None
                    }
                }
            }
            PageMode::Edit => {
                let Some(id) = self.discussion_ref else {
                    return None;
                };
                self.state.apply(StateChange::SubmitStarted);
                let result = self.gateway.update_discussion(id, fields).await;
                self.state.apply(StateChange::SubmitFinished);
                match result {
                    Ok(_) => {
                        self.notices.notify(Notice::success("Discussion updated"));
                        self.load_discussion().await;
                        self.state.apply(StateChange::ModeChanged(PageMode::View));
                        None
                    }
                    Err(err) => {
                        self.notify_error("Failed to update discussion", &err);
                        None
                    }
                }
            }
            PageMode::View => None,
        }
    }

    /// Deletes the open discussion. The confirm/cancel gate lives at the
    /// interface boundary, not here.
    pub async fn delete_discussion(&mut self) -> Option<Redirect> {
        let Some(id) = self.discussion_ref else {
            return None;
        };
        if self.state.submitting {
            return None;
        }

        self.state.apply(StateChange::SubmitStarted);
        let result = self.gateway.delete_discussion(id).await;
        self.state.apply(StateChange::SubmitFinished);

        match result {
            Ok(()) => {
                self.notices.notify(Notice::success("Discussion deleted"));
                Some(Redirect::ToForum)
            }
            Err(err) => {
                self.notify_error("Failed to delete discussion", &err);
                None
            }
        }
    }

    pub fn edit(&mut self) {
        self.state.apply(StateChange::ModeChanged(PageMode::Edit));
    }

    pub fn cancel_edit(&mut self) {
        self.state.apply(StateChange::ModeChanged(PageMode::View));
    }

    /// The edit form pre-filled from the loaded discussion.
    pub fn edit_form(&self) -> Option<DiscussionForm> {
        self.state.discussion.as_ref().map(DiscussionForm::from)
    }

    async fn load_discussion(&mut self) {
        let Some(id) = self.discussion_ref else {
            return;
        };
        match self.gateway.discussion(id).await {
            Ok(discussion) => self.state.apply(StateChange::DiscussionLoaded(discussion)),
            Err(err) => self.notify_error("Failed to load discussion", &err),
        }
    }

    async fn load_posts_page(&mut self, page: u32) {
        let Some(id) = self.discussion_ref else {
            return;
        };
        match self.gateway.discussion_posts(id, page).await {
            Ok(fetched) => {
                self.state.apply(StateChange::PostsLoaded {
                    posts: fetched.posts,
                    pagination: fetched.pagination,
                });
                self.load_comments_for_visible_posts().await;
            }
            Err(err) => self.notify_error("Failed to load posts", &err),
        }
    }

    /// Fetches every visible post's comment list. The fetches run
    /// concurrently; whatever succeeded is kept, and any failures collapse
    /// into one aggregated notice instead of wiping the page.
    pub async fn load_comments_for_visible_posts(&mut self) {
        let visible: Vec<Uuid> = self.state.posts.iter().map(|post| post.id).collect();
        let fetches = visible.into_iter().map(|post_id| {
            let gateway = Arc::clone(&self.gateway);
            async move { (post_id, gateway.post_comments(post_id).await) }
        });

        let mut failed = 0usize;
        for (post_id, result) in join_all(fetches).await {
            match result {
                Ok(comments) => self
                    .state
                    .apply(StateChange::CommentsLoaded { post_id, comments }),
                Err(err) => {
                    warn!(%post_id, error = %err, "comment fetch failed");
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            self.notices.notify(Notice::error(format!(
                "Failed to load comments for {failed} post(s)"
            )));
        }
    }

    async fn refresh_post_comments(&mut self, post_id: Uuid) {
        match self.gateway.post_comments(post_id).await {
            Ok(comments) => self
                .state
                .apply(StateChange::CommentsLoaded { post_id, comments }),
            Err(err) => self.notify_error("Failed to load comments", &err),
        }
    }

    fn current_page(&self) -> u32 {
        self.state
            .pagination
            .as_ref()
            .map(|p| p.current_page)
            .unwrap_or(1)
    }

    fn notify_error(&self, context: &str, err: &DomainError) {
        warn!(error = %err, "{context}");
        self.notices
            .notify(Notice::error(format!("{context}: {}", error_text(err))));
    }
}

fn error_text(err: &DomainError) -> String {
    match err {
        DomainError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}
