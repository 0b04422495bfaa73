//! The unit of composition: one resource kind per module.

use async_trait::async_trait;
use axum::Router;
use shelf_db::DocumentStore;

/// What a module sees while the application boots.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
    pub store: &'a dyn DocumentStore,
}

/// A named schema statement, applied once per store at `migrate` or `serve`.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A mountable slice of the SHELF API.
///
/// `name` doubles as the collection name and the mount segment, so a module
/// named `books` serves `{api_prefix}/books`.
#[async_trait]
pub trait Module: Sync + Send {
    fn name(&self) -> &'static str;

    /// Runs before migrations, once the store is open.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes relative to the mount point (`/` and `/{id}`).
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI `paths` and `components` with module-relative paths.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Runs after the server has drained.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
