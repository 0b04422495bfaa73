//! SurrealDB-backed document store.
//!
//! The `any` engine picks the protocol from the endpoint scheme: `ws://`,
//! `http://`, or `mem://` for an embedded in-memory instance.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::sanitize_url;
use crate::settings::DatabaseSettings;
use crate::store::{check_field_names, Document, DocumentStore, StoredDocument};

/// Projected record key. Record ids are `table:key` things; handlers only see the key.
const KEY_FIELD: &str = "__key";

pub struct SurrealStore {
    client: Surreal<Any>,
}

impl SurrealStore {
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        let url = sanitize_url(&settings.endpoint);

        let client = any::connect(settings.endpoint.as_str())
            .await
            .with_context(|| format!("failed to connect to SurrealDB at '{url}'"))?;

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            client
                .signin(Root { username, password })
                .await
                .with_context(|| format!("failed to authenticate with SurrealDB at '{url}'"))?;
        }

        client
            .use_ns(&settings.namespace)
            .use_db(&settings.database)
            .await
            .with_context(|| {
                format!(
                    "failed to select namespace '{}' / database '{}'",
                    settings.namespace, settings.database
                )
            })?;

        tracing::info!(
            target: "shelf-db",
            url = %url,
            ns = %settings.namespace,
            db = %settings.database,
            "SurrealDB connected"
        );

        Ok(Self { client })
    }
}

/// Map a driver error onto the store taxonomy. Field assertion failures are
/// the backend's native validation.
fn map_error(err: surrealdb::Error) -> StoreError {
    let text = err.to_string();
    if text.contains("but field must conform") || text.contains("ASSERT") {
        StoreError::validation(None, text)
    } else {
        StoreError::Backend(anyhow::Error::new(err))
    }
}

fn check_id(id: &str) -> StoreResult<String> {
    Uuid::try_parse(id)
        .map(|uuid| uuid.simple().to_string())
        .map_err(|_| StoreError::InvalidId { id: id.to_string() })
}

fn into_stored(row: Value) -> StoreResult<StoredDocument> {
    let Value::Object(mut fields) = row else {
        return Err(StoreError::Backend(anyhow::anyhow!(
            "SurrealDB returned a non-object row"
        )));
    };
    let id = match fields.remove(KEY_FIELD) {
        Some(Value::String(id)) => id,
        _ => {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "SurrealDB row is missing its record key"
            )))
        }
    };
    fields.remove("id");
    Ok(StoredDocument { id, fields })
}

#[async_trait]
impl DocumentStore for SurrealStore {
    fn backend(&self) -> &'static str {
        "surreal"
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let mut response = self
            .client
            .query("SELECT *, meta::id(id) AS __key OMIT id FROM type::table($tb)")
            .bind(("tb", collection.to_string()))
            .await
            .map_err(map_error)?;
        let rows: Vec<Value> = response.take(0).map_err(map_error)?;
        rows.into_iter().map(into_stored).collect()
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        let key = check_id(id)?;
        let mut response = self
            .client
            .query("SELECT *, meta::id(id) AS __key OMIT id FROM type::thing($tb, $key)")
            .bind(("tb", collection.to_string()))
            .bind(("key", key))
            .await
            .map_err(map_error)?;
        let rows: Vec<Value> = response.take(0).map_err(map_error)?;
        rows.into_iter().next().map(into_stored).transpose()
    }

    async fn create(&self, collection: &str, mut fields: Document) -> StoreResult<StoredDocument> {
        check_field_names(&fields)?;
        fields.remove("id");
        let key = Uuid::now_v7().simple().to_string();

        let response = self
            .client
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", collection.to_string()))
            .bind(("key", key.clone()))
            .bind(("data", Value::Object(fields.clone())))
            .await
            .map_err(map_error)?;
        response.check().map_err(map_error)?;

        Ok(StoredDocument { id: key, fields })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        mut patch: Document,
    ) -> StoreResult<StoredDocument> {
        let key = check_id(id)?;
        check_field_names(&patch)?;
        patch.remove("id");

        let mut response = self
            .client
            .query("UPDATE type::thing($tb, $key) MERGE $data RETURN meta::id(id) AS __key")
            .bind(("tb", collection.to_string()))
            .bind(("key", key.clone()))
            .bind(("data", Value::Object(patch)))
            .await
            .map_err(map_error)?;
        let updated: Vec<Value> = response.take(0).map_err(map_error)?;
        if updated.is_empty() {
            return Err(StoreError::not_found(collection, id));
        }

        self.find_by_id(collection, &key)
            .await?
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let key = check_id(id)?;
        if self.find_by_id(collection, &key).await?.is_none() {
            return Err(StoreError::not_found(collection, id));
        }

        let response = self
            .client
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", collection.to_string()))
            .bind(("key", key))
            .await
            .map_err(map_error)?;
        response.check().map_err(map_error)?;
        Ok(())
    }

    async fn apply_migration(&self, id: &str, statements: &str) -> StoreResult<()> {
        tracing::info!(target: "shelf-db", migration = id, "applying migration");
        let response = self
            .client
            .query(statements.to_string())
            .await
            .map_err(map_error)?;
        response.check().map_err(map_error)?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client.health().await.map_err(map_error)
    }
}
