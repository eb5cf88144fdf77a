//! Seeds a development database with a handful of users, a discussion
//! thread, and a couple of catalog products.
//!
//! Goes through the services rather than raw INSERTs so the seeded rows
//! pass the same validation and denormalization as live traffic. Users
//! are the exception: nothing writes users in this codebase, so they are
//! inserted directly.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use configs::Settings;
use domains::models::{BulkDiscount, DiscussionCategory, NewDiscussion, NewProduct, SellerType};
use services::{ForumService, ProductService};
use storage_adapters::sqlite::{
    self, SqliteForumStore, SqliteProductStore, SqliteSellerDirectory,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = Settings::load()?;
    let pool = sqlite::connect(settings.database.url.expose_secret())
        .await
        .context("opening the database")?;

    let farmer = seed_user(&pool, "Deshmukh Agro", Some("Springfield")).await?;
    let trader = seed_user(&pool, "Kale Traders", None).await?;
    let buyer = seed_user(&pool, "Riverside Kitchens", Some("Shelbyville")).await?;

    seed_forum(&pool, &settings, farmer, trader, buyer).await?;
    seed_catalog(&pool, farmer, trader).await?;

    info!("seeding complete");
    Ok(())
}

async fn seed_user(pool: &SqlitePool, name: &str, city: Option<&str>) -> anyhow::Result<Uuid> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO users (id, display_name, city, created_at) VALUES (?, ?, ?, ?)")
        .bind(id.to_string())
        .bind(name)
        .bind(city)
        .bind(Utc::now())
        .execute(pool)
        .await
        .with_context(|| format!("inserting user {name}"))?;
    info!(user = name, city = city.unwrap_or("-"), "user created");
    Ok(id)
}

async fn seed_forum(
    pool: &SqlitePool,
    settings: &Settings,
    farmer: Uuid,
    trader: Uuid,
    buyer: Uuid,
) -> anyhow::Result<()> {
    let forum = ForumService::new(
        Arc::new(SqliteForumStore::new(pool.clone())),
        settings.forum.posts_per_page,
    );

    let discussion = forum
        .create_discussion(
            farmer,
            NewDiscussion {
                title: "Monsoon sowing schedules".into(),
                description: "When is everyone starting this season?".into(),
                category: DiscussionCategory::Farming,
                tags: vec!["monsoon".into(), "sowing".into()],
            },
        )
        .await?;

    let post = forum
        .create_post(
            trader,
            discussion.id,
            "We wait for the first sustained rain, usually mid June.".into(),
        )
        .await?;
    forum
        .create_post(
            buyer,
            discussion.id,
            "Any difference for short-duration varieties?".into(),
        )
        .await?;

    let top = forum
        .create_comment(farmer, post.id, discussion.id, "Same here.".into(), None)
        .await?;
    forum
        .create_comment(
            buyer,
            post.id,
            discussion.id,
            "Which district is that?".into(),
            Some(top.id),
        )
        .await?;

    info!(discussion_id = %discussion.id, "forum thread created");
    Ok(())
}

async fn seed_catalog(pool: &SqlitePool, farmer: Uuid, trader: Uuid) -> anyhow::Result<()> {
    let products = ProductService::new(
        Arc::new(SqliteProductStore::new(pool.clone())),
        Arc::new(SqliteSellerDirectory::new(pool.clone())),
    );

    // Seller with a profile city: the listing picks it up on save.
    let mangoes = products
        .create_product(NewProduct {
            name: "Alphonso mangoes".into(),
            description: "Tree-ripened, graded by hand.".into(),
            price: Decimal::new(125_000, 2),
            quantity: 40,
            images: vec!["https://img.example/mangoes.jpg".into()],
            category: "Fruits".into(),
            seller_id: farmer,
            seller_name: "Deshmukh Agro".into(),
            seller_type: SellerType::Farmer,
            certification: Some("GI tagged".into()),
            minimum_order: 2,
            bulk_discounts: vec![BulkDiscount {
                quantity: 20,
                price: Decimal::new(115_000, 2),
            }],
        })
        .await?;
    info!(
        product_id = %mangoes.id,
        city = mangoes.city.as_deref().unwrap_or("-"),
        "product created"
    );

    // Seller without a city: the listing stays city-less.
    let turmeric = products
        .create_product(NewProduct {
            name: "Turmeric powder".into(),
            description: "Single-origin, stone ground.".into(),
            price: Decimal::new(24_000, 2),
            quantity: 300,
            images: Vec::new(),
            category: "Spices".into(),
            seller_id: trader,
            seller_name: "Kale Traders".into(),
            seller_type: SellerType::Vendor,
            certification: None,
            minimum_order: 1,
            bulk_discounts: Vec::new(),
        })
        .await?;
    info!(
        product_id = %turmeric.id,
        city = turmeric.city.as_deref().unwrap_or("-"),
        "product created"
    );

    Ok(())
}
