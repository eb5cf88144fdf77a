//! Shared harness: a served API instance on an ephemeral port, backed by
//! a fresh in-memory database that tests can also reach directly.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use api_adapters::web::{router, AppState};
use services::{ForumService, ProductService};
use storage_adapters::sqlite::{
    connect_memory, SqliteForumStore, SqliteProductStore, SqliteSellerDirectory,
};

pub const POSTS_PER_PAGE: u32 = 10;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub pool: SqlitePool,
}

pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let pool = connect_memory().await?;
    let app = router(app_state(&pool));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("binding an ephemeral port")?;
    let address = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(TestApp {
        address,
        client: reqwest::Client::new(),
        pool,
    })
}

pub fn app_state(pool: &SqlitePool) -> AppState {
    AppState {
        forum: Arc::new(ForumService::new(
            Arc::new(SqliteForumStore::new(pool.clone())),
            POSTS_PER_PAGE,
        )),
        products: Arc::new(ProductService::new(
            Arc::new(SqliteProductStore::new(pool.clone())),
            Arc::new(SqliteSellerDirectory::new(pool.clone())),
        )),
    }
}

pub async fn seed_user(pool: &SqlitePool, name: &str, city: Option<&str>) -> anyhow::Result<Uuid> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO users (id, display_name, city, created_at) VALUES (?, ?, ?, ?)")
        .bind(id.to_string())
        .bind(name)
        .bind(city)
        .bind(Utc::now())
        .execute(pool)
        .await
        .with_context(|| format!("inserting user {name}"))?;
    Ok(id)
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn seed_user(&self, name: &str, city: Option<&str>) -> anyhow::Result<Uuid> {
        seed_user(&self.pool, name, city).await
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    /// A request carrying the acting user's identity header.
    pub fn post_as(&self, user: Uuid, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("x-user-id", user.to_string())
    }

    pub fn put_as(&self, user: Uuid, path: &str) -> reqwest::RequestBuilder {
        self.client
            .put(self.url(path))
            .header("x-user-id", user.to_string())
    }

    pub fn delete_as(&self, user: Uuid, path: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.url(path))
            .header("x-user-id", user.to_string())
    }
}
