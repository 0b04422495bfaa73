//! Application bootstrap: registry assembly, router construction, serve and migrate.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use shelf_db::{DocumentStore, MemoryStore};
use shelf_http::router::{route_table, RouteEntry};
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every resource module, bound to `store`.
pub fn build_registry(store: Arc<dyn DocumentStore>, settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store, settings);
    registry
}

/// The complete HTTP application over `store`.
pub fn build_app(store: Arc<dyn DocumentStore>, settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(store, settings);
    shelf_http::build_router(&registry, settings)
}

/// Connect to the store, run the module lifecycle, and serve HTTP until shutdown.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let store = shelf_db::connect(&settings.database)
        .await
        .context("failed to open document store")?;
    let registry = build_registry(store.clone(), &settings);

    let ctx = InitCtx {
        settings: &settings,
        store: store.as_ref(),
    };
    registry.init_all(&ctx).await?;
    registry.run_migrations(store.as_ref()).await?;

    tracing::info!(modules = registry.len(), "shelf bootstrap complete");

    let served = shelf_http::start_server(&registry, &settings).await;
    registry.stop_all().await?;
    served
}

/// Apply every module migration to the configured store.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let store = shelf_db::connect(&settings.database)
        .await
        .context("failed to open document store")?;
    let registry = build_registry(store.clone(), settings);
    registry.run_migrations(store.as_ref()).await
}

/// Documented routes as mounted under the configured prefix.
pub fn routes(settings: &Settings) -> Vec<RouteEntry> {
    let registry = build_registry(Arc::new(MemoryStore::new()), settings);
    route_table(&registry, &settings.server)
}
