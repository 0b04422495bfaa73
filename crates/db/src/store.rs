use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// Field map of a stored document, without its identifier.
pub type Document = Map<String, Value>;

/// Field under which the creating caller's identity is stored.
pub const OWNER_FIELD: &str = "owner";

/// A document together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Document,
}

impl StoredDocument {
    pub fn owner(&self) -> Option<&str> {
        self.fields.get(OWNER_FIELD).and_then(Value::as_str)
    }

    /// Plain JSON representation: `id` plus every stored field.
    pub fn into_json(self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 1);
        object.insert("id".to_string(), Value::String(self.id));
        for (key, value) in self.fields {
            if key != "id" {
                object.insert(key, value);
            }
        }
        Value::Object(object)
    }
}

/// Reject field names a document database cannot store: a leading `$` or an
/// embedded `.`.
pub fn check_field_names(fields: &Document) -> StoreResult<()> {
    for key in fields.keys() {
        if key.starts_with('$') || key.contains('.') {
            return Err(StoreError::validation(
                Some(key),
                format!("field name '{key}' may not start with '$' or contain '.'"),
            ));
        }
    }
    Ok(())
}

/// Persistence primitives the resource handlers are written against.
///
/// Each call is a single independent operation; the store owns its atomicity.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;

    /// `Ok(None)` when no document has this id.
    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>>;

    /// Persist a new document and assign it an identifier. Field names must
    /// pass [`check_field_names`] for any caller, not only typed payloads.
    async fn create(&self, collection: &str, fields: Document) -> StoreResult<StoredDocument>;

    /// Merge `patch` into an existing document. Keys absent from the patch
    /// are left untouched. Field names follow the same rule as `create`.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> StoreResult<StoredDocument>;

    /// Remove a document permanently. Fails with `NotFound` if it is already gone.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Run a schema migration. Schemaless backends accept and ignore it.
    async fn apply_migration(&self, _id: &str, _statements: &str) -> StoreResult<()> {
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
