//! SQLite persistence. One pool is shared by all three adapters. Ids are
//! stored as hyphenated text and list-valued fields as JSON text, matching
//! the embedded migrations.

mod forum;
mod product;
mod rows;
mod seller;

pub use forum::SqliteForumStore;
pub use product::SqliteProductStore;
pub use seller::SqliteSellerDirectory;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Opens the database at `url`, creating the file if missing, and brings
/// the schema up to date.
pub async fn connect(url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// In-memory database for tests. Capped at one connection: each fresh
/// handle to `sqlite::memory:` would otherwise be a separate empty
/// database.
pub async fn connect_memory() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
