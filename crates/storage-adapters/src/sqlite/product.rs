//! SQLite mapping for the marketplace catalog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use domains::models::Product;
use domains::ports::ProductStore;

use super::rows::ProductRow;

pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn insert_product(&self, product: Product) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO products (id, name, description, price, quantity, images, category,
                                   seller_id, seller_name, seller_type, certification,
                                   minimum_order, bulk_discounts, city, view_count, order_count,
                                   last_order_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(product.id.to_string())
        .bind(product.name)
        .bind(product.description)
        .bind(product.price.to_string())
        .bind(product.quantity)
        .bind(serde_json::to_string(&product.images)?)
        .bind(product.category)
        .bind(product.seller_id.to_string())
        .bind(product.seller_name)
        .bind(product.seller_type.as_str())
        .bind(product.certification)
        .bind(product.minimum_order)
        .bind(serde_json::to_string(&product.bulk_discounts)?)
        .bind(product.city)
        .bind(product.view_count)
        .bind(product.order_count)
        .bind(product.last_order_at)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn product(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Product::try_from).transpose()
    }

    /// Overwrites the descriptive fields. The demand counters move only
    /// through [`record_view`] and [`record_order`], so a stale in-memory
    /// copy can't wind them back.
    ///
    /// [`record_view`]: ProductStore::record_view
    /// [`record_order`]: ProductStore::record_order
    async fn update_product(&self, product: Product) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, quantity = ?, images = ?,
                                 category = ?, seller_id = ?, seller_name = ?, seller_type = ?,
                                 certification = ?, minimum_order = ?, bulk_discounts = ?,
                                 city = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.price.to_string())
        .bind(product.quantity)
        .bind(serde_json::to_string(&product.images)?)
        .bind(product.category)
        .bind(product.seller_id.to_string())
        .bind(product.seller_name)
        .bind(product.seller_type.as_str())
        .bind(product.certification)
        .bind(product.minimum_order)
        .bind(serde_json::to_string(&product.bulk_discounts)?)
        .bind(product.city)
        .bind(product.updated_at)
        .bind(product.id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_view(&self, id: Uuid) -> anyhow::Result<()> {
        let result = sqlx::query("UPDATE products SET view_count = view_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            debug!(%id, "view bump matched no product");
        }
        Ok(())
    }

    async fn record_order(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()> {
        let result = sqlx::query(
            "UPDATE products SET order_count = order_count + 1, last_order_at = ? WHERE id = ?",
        )
        .bind(at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            debug!(%id, "order bump matched no product");
        }
        Ok(())
    }
}
