//! Row structs and their conversions back into domain types. Anything
//! malformed in storage surfaces as an error here, never as a silent
//! default.

use anyhow::Context;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use domains::models::{Comment, Discussion, Post, Product, Seller};

pub(crate) fn parse_id(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("malformed id in storage: {raw}"))
}

fn parse_optional_id(raw: Option<&str>) -> anyhow::Result<Option<Uuid>> {
    raw.map(parse_id).transpose()
}

fn parse_json_list<T>(raw: &str, column: &str) -> anyhow::Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(raw).with_context(|| format!("malformed {column} JSON in storage"))
}

#[derive(sqlx::FromRow)]
pub(crate) struct DiscussionRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DiscussionRow> for Discussion {
    type Error = anyhow::Error;

    fn try_from(row: DiscussionRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            title: row.title,
            description: row.description,
            category: row.category.parse()?,
            tags: parse_json_list(&row.tags, "tags")?,
            author_id: parse_id(&row.author_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PostRow {
    pub id: String,
    pub discussion_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = anyhow::Error;

    fn try_from(row: PostRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            discussion_id: parse_id(&row.discussion_id)?,
            author_id: parse_id(&row.author_id)?,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = anyhow::Error;

    fn try_from(row: CommentRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            post_id: parse_id(&row.post_id)?,
            parent_id: parse_optional_id(row.parent_id.as_deref())?,
            author_id: parse_id(&row.author_id)?,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: i64,
    pub images: String,
    pub category: String,
    pub seller_id: String,
    pub seller_name: String,
    pub seller_type: String,
    pub certification: Option<String>,
    pub minimum_order: i64,
    pub bulk_discounts: String,
    pub city: Option<String>,
    pub view_count: i64,
    pub order_count: i64,
    pub last_order_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = anyhow::Error;

    fn try_from(row: ProductRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            name: row.name,
            description: row.description,
            price: row.price.parse().context("malformed price in storage")?,
            quantity: row.quantity,
            images: parse_json_list(&row.images, "images")?,
            category: row.category,
            seller_id: parse_id(&row.seller_id)?,
            seller_name: row.seller_name,
            seller_type: row.seller_type.parse()?,
            certification: row.certification,
            minimum_order: row.minimum_order,
            bulk_discounts: parse_json_list(&row.bulk_discounts, "bulk_discounts")?,
            city: row.city,
            view_count: row.view_count,
            order_count: row.order_count,
            last_order_at: row.last_order_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SellerRow {
    pub id: String,
    pub display_name: String,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SellerRow> for Seller {
    type Error = anyhow::Error;

    fn try_from(row: SellerRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            display_name: row.display_name,
            city: row.city,
            created_at: row.created_at,
        })
    }
}
