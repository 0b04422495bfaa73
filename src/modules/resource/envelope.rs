//! Request and response envelopes keyed by resource name.

use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::{json, Map, Value};
use shelf_db::{Document, OWNER_FIELD};
use shelf_http::AppError;

use super::Resource;

/// `{key: value}`
pub fn wrap(key: &str, value: Value) -> Value {
    let mut body = Map::with_capacity(1);
    body.insert(key.to_string(), value);
    Value::Object(body)
}

/// Pull `R::Fields` out of `{R::SINGULAR: {...}}`.
pub fn open<R: Resource>(payload: Value) -> Result<R::Fields, AppError> {
    let missing = || {
        AppError::validation(
            vec![json!({"field": R::SINGULAR, "error": "required"})],
            format!("request body must nest fields under `{}`", R::SINGULAR),
        )
    };

    let Value::Object(mut body) = payload else {
        return Err(missing());
    };
    let fields = body.remove(R::SINGULAR).ok_or_else(missing)?;

    if !fields.is_object() {
        return Err(AppError::validation(
            vec![json!({"field": R::SINGULAR, "error": "must be an object"})],
            format!("`{}` must be an object", R::SINGULAR),
        ));
    }

    serde_json::from_value(fields)
        .map_err(|err| AppError::validation(vec![], format!("invalid {}: {err}", R::SINGULAR)))
}

/// Serialize typed fields into a store document. Absent fields are omitted,
/// and the identifier and owner can never be written through a payload.
pub fn to_document<F: Serialize>(fields: &F) -> Result<Document, AppError> {
    let value = serde_json::to_value(fields).context("failed to serialize fields")?;
    let Value::Object(mut document) = value else {
        return Err(anyhow!("resource fields must serialize to an object").into());
    };
    document.remove("id");
    document.remove(OWNER_FIELD);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::{models::AuthorFields, Author};
    use axum::http::StatusCode;

    #[test]
    fn wrap_uses_key() {
        assert_eq!(wrap("authors", json!([])), json!({"authors": []}));
    }

    #[test]
    fn open_reads_singular_key() {
        let fields = open::<Author>(json!({"author": {"name": "Ada"}})).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn open_rejects_missing_envelope() {
        let err = open::<Author>(json!({"name": "Ada"})).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn open_rejects_wrong_field_types() {
        let err = open::<Author>(json!({"author": {"born": "long ago"}})).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn open_rejects_scalar_envelope() {
        let err = open::<Author>(json!({"author": "Ada"})).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn to_document_skips_absent_fields() {
        let fields = AuthorFields {
            name: Some("Ada".into()),
            ..AuthorFields::default()
        };
        assert_eq!(
            Value::Object(to_document(&fields).unwrap()),
            json!({"name": "Ada"})
        );
    }
}
