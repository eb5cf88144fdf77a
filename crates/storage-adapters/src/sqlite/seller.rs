//! Seller lookups against the users table.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use domains::models::Seller;
use domains::ports::SellerDirectory;

use super::rows::SellerRow;

pub struct SqliteSellerDirectory {
    pool: SqlitePool,
}

impl SqliteSellerDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SellerDirectory for SqliteSellerDirectory {
    async fn seller(&self, id: Uuid) -> anyhow::Result<Option<Seller>> {
        let row = sqlx::query_as::<_, SellerRow>("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Seller::try_from).transpose()
    }
}
