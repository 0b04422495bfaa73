//! Document store collaborator for SHELF.
//!
//! Resource handlers talk to persistence only through [`DocumentStore`]. The
//! in-memory store backs tests and local runs; the SurrealDB store is built
//! with the `surreal` feature.

use std::sync::Arc;

pub mod error;
pub mod memory;
pub mod settings;
pub mod store;
#[cfg(feature = "surreal")]
pub mod surreal;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use settings::{Backend, DatabaseSettings};
pub use store::{check_field_names, Document, DocumentStore, StoredDocument, OWNER_FIELD};

/// Open the store selected by `settings.backend`.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match settings.backend {
        Backend::Memory => {
            tracing::info!(target: "shelf-db", backend = "memory", "using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "surreal")]
        Backend::Surreal => {
            let store = surreal::SurrealStore::connect(settings).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "surreal"))]
        Backend::Surreal => Err(anyhow::anyhow!(
            "database backend 'surreal' requires building with the `surreal` feature"
        )),
    }
}

/// Strip credentials from a connection URL before it reaches the logs.
pub fn sanitize_url(url: &str) -> String {
    if let (Some(at_pos), Some(scheme_end)) = (url.find('@'), url.find("://")) {
        if at_pos > scheme_end {
            return format!("{}***{}", &url[..scheme_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_url_without_credentials_is_unchanged() {
        assert_eq!(sanitize_url("ws://127.0.0.1:8000"), "ws://127.0.0.1:8000");
    }

    #[test]
    fn sanitize_url_hides_credentials() {
        let sanitized = sanitize_url("ws://root:secret@db.internal:8000");
        assert_eq!(sanitized, "ws://***@db.internal:8000");
    }

    #[tokio::test]
    async fn connect_memory_backend() {
        let store = connect(&DatabaseSettings::default()).await.unwrap();
        assert_eq!(store.backend(), "memory");
        store.ping().await.unwrap();
    }

    #[cfg(not(feature = "surreal"))]
    #[tokio::test]
    async fn connect_surreal_without_feature_fails() {
        let settings = DatabaseSettings {
            backend: Backend::Surreal,
            ..DatabaseSettings::default()
        };
        let err = connect(&settings).await.err().unwrap();
        assert!(err.to_string().contains("surreal"));
    }
}
