//! The forum containment tree: Discussion → Post → Comment.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::pagination::PaginationData;

/// Topic shelf a discussion is filed under. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscussionCategory {
    General,
    Farming,
    Market,
    Pricing,
    Transport,
    Other,
}

impl DiscussionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Farming => "farming",
            Self::Market => "market",
            Self::Pricing => "pricing",
            Self::Transport => "transport",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DiscussionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscussionCategory {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "farming" => Ok(Self::Farming),
            "market" => Ok(Self::Market),
            "pricing" => Ok(Self::Pricing),
            "transport" => Ok(Self::Transport),
            "other" => Ok(Self::Other),
            other => Err(DomainError::validation(format!(
                "unknown discussion category: {other}"
            ))),
        }
    }
}

/// A top-level forum thread.
///
/// Mutable by its author only; deleting it takes the whole containment
/// tree (posts and comments) with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: DiscussionCategory,
    /// Ordered tag list, already split and trimmed.
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields accepted when creating or replacing a discussion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiscussion {
    pub title: String,
    pub description: String,
    pub category: DiscussionCategory,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A top-level response within a discussion. Immutable anchor for comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub discussion_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A reply to a post, or via `parent_id` a reply to another comment on
/// the same post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Must reference a comment on the same post when present.
    pub parent_id: Option<Uuid>,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One page of a discussion's posts plus freshly derived pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub pagination: PaginationData,
}

/// One page of the forum index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionListing {
    pub discussions: Vec<Discussion>,
    pub pagination: PaginationData,
}

/// Split a free-text tag field on commas, trimming whitespace and dropping
/// empty segments. Order is preserved and duplicates are kept as typed.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
