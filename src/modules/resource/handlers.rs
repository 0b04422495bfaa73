//! List, show, create, update and delete handlers, generic over the kind.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use shelf_authz::{require_caller, require_ownership};
use shelf_db::{StoredDocument, OWNER_FIELD};
use shelf_http::AppError;

use super::envelope;
use super::{FieldViolation, Intent, Resource, ResourceState};

type Payload = Result<Json<Value>, JsonRejection>;

fn reject_invalid<R: Resource>(violations: Vec<FieldViolation>) -> Result<(), AppError> {
    if violations.is_empty() {
        return Ok(());
    }
    let details = violations.iter().map(FieldViolation::to_json).collect();
    Err(AppError::validation(details, format!("invalid {}", R::SINGULAR)))
}

async fn find<R: Resource>(state: &ResourceState<R>, id: &str) -> Result<StoredDocument, AppError> {
    state
        .store
        .find_by_id(R::PLURAL, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{} '{}' not found", R::SINGULAR, id)))
}

/// `GET /{plural}`
pub async fn list<R: Resource>(
    State(state): State<ResourceState<R>>,
) -> Result<Json<Value>, AppError> {
    let records: Vec<Value> = state
        .store
        .find_all(R::PLURAL)
        .await?
        .into_iter()
        .map(StoredDocument::into_json)
        .collect();

    tracing::debug!(resource = R::PLURAL, count = records.len(), "listed records");
    Ok(Json(envelope::wrap(R::PLURAL, Value::Array(records))))
}

/// `GET /{plural}/{id}`
pub async fn show<R: Resource>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let record = find(&state, &id).await?;
    Ok(Json(envelope::wrap(R::SINGULAR, record.into_json())))
}

/// `POST /{plural}`; blank fields were already stripped by middleware.
pub async fn create<R: Resource>(
    State(state): State<ResourceState<R>>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let fields = envelope::open::<R>(payload?.0)?;
    reject_invalid::<R>(R::validate(&fields, Intent::Create))?;

    let owner = require_caller(state.policy, &state.caller(&headers))?;
    let mut document = envelope::to_document(&fields)?;
    if let Some(owner) = owner {
        document.insert(OWNER_FIELD.to_string(), Value::String(owner));
    }

    let created = state.store.create(R::PLURAL, document).await?;
    tracing::info!(resource = R::SINGULAR, id = %created.id, "record created");

    Ok((
        StatusCode::CREATED,
        Json(envelope::wrap(R::SINGULAR, created.into_json())),
    ))
}

/// `PATCH /{plural}/{id}`; blank fields were already stripped by middleware.
pub async fn update<R: Resource>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<StatusCode, AppError> {
    let record = find(&state, &id).await?;
    require_ownership(state.policy, &state.caller(&headers), record.owner())?;

    let fields = envelope::open::<R>(payload?.0)?;
    reject_invalid::<R>(R::validate(&fields, Intent::Update))?;

    let patch = envelope::to_document(&fields)?;
    state.store.update(R::PLURAL, &record.id, patch).await?;
    tracing::info!(resource = R::SINGULAR, id = %record.id, "record updated");

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /{plural}/{id}`
pub async fn destroy<R: Resource>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let record = find(&state, &id).await?;
    require_ownership(state.policy, &state.caller(&headers), record.owner())?;

    state.store.delete(R::PLURAL, &record.id).await?;
    tracing::info!(resource = R::SINGULAR, id = %record.id, "record deleted");

    Ok(StatusCode::NO_CONTENT)
}
