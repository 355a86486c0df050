use std::sync::Arc;

use anyhow::Context;

use pantry_api::app::{build_app, services::AppServices};
use pantry_infra::PantryConfig;
use pantry_store::{InMemoryItemStore, ItemStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PantryConfig::from_env().context("invalid configuration")?;
    pantry_observability::tracing::init(&config.log);

    tracing::info!(
        bind = %config.bind,
        recipes_enabled = config.openai.is_some(),
        recipe_refresh = config.recipe_refresh.as_str(),
        failure_policy = config.failure_policy.as_str(),
        "configuration loaded"
    );

    let store: Arc<dyn ItemStore> = Arc::new(InMemoryItemStore::new());
    let recipes = pantry_infra::recipe_board(&config).context("failed to set up recipe service")?;
    let services = AppServices::build(store, recipes, config.recipe_refresh, config.failure_policy)
        .context("failed to subscribe to item store")?;

    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
