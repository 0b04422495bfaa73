//! In-process document store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::{check_field_names, Document, DocumentStore, StoredDocument};

/// Document store held entirely in memory.
///
/// Identifiers are UUIDv7 in simple form, so a collection iterates in
/// creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live documents in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

fn parse_id(id: &str) -> StoreResult<String> {
    Uuid::try_parse(id)
        .map(|uuid| uuid.simple().to_string())
        .map_err(|_| StoreError::InvalidId { id: id.to_string() })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| StoredDocument {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        let key = parse_id(id)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(&key))
            .map(|fields| StoredDocument {
                id: key.clone(),
                fields: fields.clone(),
            }))
    }

    async fn create(&self, collection: &str, mut fields: Document) -> StoreResult<StoredDocument> {
        check_field_names(&fields)?;
        fields.remove("id");

        let id = Uuid::now_v7().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());

        tracing::debug!(target: "shelf-db", collection, %id, "document created");
        Ok(StoredDocument { id, fields })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> StoreResult<StoredDocument> {
        let key = parse_id(id)?;
        check_field_names(&patch)?;

        let mut collections = self.collections.write().await;
        let fields = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(&key))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        for (field, value) in patch {
            if field != "id" {
                fields.insert(field, value);
            }
        }

        tracing::debug!(target: "shelf-db", collection, id = %key, "document updated");
        Ok(StoredDocument {
            id: key,
            fields: fields.clone(),
        })
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let key = parse_id(id)?;
        let removed = self
            .collections
            .write()
            .await
            .get_mut(collection)
            .and_then(|docs| docs.remove(&key));

        match removed {
            Some(_) => {
                tracing::debug!(target: "shelf-db", collection, id = %key, "document deleted");
                Ok(())
            }
            None => Err(StoreError::not_found(collection, id)),
        }
    }
}
