use std::sync::Arc;

use anyhow::Context;

use camstore_api::{
    app::{AppServices, build_app},
    config::Config,
};
use camstore_content::FileContentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    camstore_observability::init();

    let config = Config::from_env();

    let store = FileContentStore::load(&config.content_dir)
        .with_context(|| format!("failed to load content from {}", config.content_dir.display()))?;

    let app = build_app(AppServices::new(Arc::new(store), config.default_locale));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
