//! Agora server binary. Wires the SQLite stores into the services and
//! serves the JSON API over Axum.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api_adapters::web::{router, AppState};
use configs::Settings;
use services::{ForumService, ProductService};
use storage_adapters::sqlite::{
    self, SqliteForumStore, SqliteProductStore, SqliteSellerDirectory,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings);

    let pool = sqlite::connect(settings.database.url.expose_secret())
        .await
        .context("opening the database")?;

    let forum = Arc::new(ForumService::new(
        Arc::new(SqliteForumStore::new(pool.clone())),
        settings.forum.posts_per_page,
    ));
    let products = Arc::new(ProductService::new(
        Arc::new(SqliteProductStore::new(pool.clone())),
        Arc::new(SqliteSellerDirectory::new(pool)),
    ));

    let app = router(AppState { forum, products });

    let address = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, "agora listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving the API")?;

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::new(&settings.log.filter);
    if settings.log.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
