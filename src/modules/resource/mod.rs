//! CRUD lifecycle shared by every resource kind.
//!
//! A kind describes itself through [`Resource`]; [`ResourceModule`] turns
//! that description into a mounted module with list, show, create, update
//! and delete routes backed by the document store.

pub mod envelope;
pub mod handlers;
pub mod openapi;
pub mod validation;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    http::HeaderMap,
    middleware,
    routing::{get, patch, post},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shelf_authz::{Caller, OwnershipPolicy};
use shelf_db::DocumentStore;
use shelf_http::blank_fields::{remove_blank_fields, BodyLimit};
use shelf_kernel::{settings::Settings, InitCtx, Migration, Module};

pub use validation::{FieldViolation, Intent};

/// Static description of a resource kind.
pub trait Resource: Send + Sync + 'static {
    /// Envelope key for one record, e.g. `author`.
    const SINGULAR: &'static str;
    /// Envelope key for a collection, route segment, and store collection, e.g. `authors`.
    const PLURAL: &'static str;
    /// Schema and tag name, e.g. `Author`.
    const TITLE: &'static str;

    /// Typed request schema. Every field is optional so one type serves
    /// both create and partial update.
    type Fields: Serialize + DeserializeOwned + Send + 'static;

    fn validate(fields: &Self::Fields, intent: Intent) -> Vec<FieldViolation>;

    /// JSON Schema `properties` for [`Resource::Fields`].
    fn field_schema() -> Value;

    /// Fields that must be present on create.
    fn required_fields() -> &'static [&'static str];

    fn migrations() -> Vec<Migration> {
        vec![]
    }
}

/// Per-kind handler state.
pub struct ResourceState<R> {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) policy: OwnershipPolicy,
    pub(crate) caller_header: Arc<str>,
    pub(crate) body_limit: usize,
    _resource: PhantomData<fn() -> R>,
}

impl<R> ResourceState<R> {
    pub fn new(store: Arc<dyn DocumentStore>, settings: &Settings) -> Self {
        Self {
            store,
            policy: settings.auth.ownership,
            caller_header: Arc::from(settings.auth.caller_header.as_str()),
            body_limit: settings.server.body_limit_bytes,
            _resource: PhantomData,
        }
    }

    pub(crate) fn caller(&self, headers: &HeaderMap) -> Caller {
        Caller::from_headers(headers, &self.caller_header)
    }
}

impl<R> Clone for ResourceState<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy,
            caller_header: self.caller_header.clone(),
            body_limit: self.body_limit,
            _resource: PhantomData,
        }
    }
}

/// Module exposing the five CRUD routes for `R`.
pub struct ResourceModule<R> {
    state: ResourceState<R>,
}

impl<R: Resource> ResourceModule<R> {
    pub fn new(store: Arc<dyn DocumentStore>, settings: &Settings) -> Self {
        Self {
            state: ResourceState::new(store, settings),
        }
    }
}

#[async_trait]
impl<R: Resource> Module for ResourceModule<R> {
    fn name(&self) -> &'static str {
        R::PLURAL
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = ctx.store.backend(),
            ownership = ?self.state.policy,
            "{} module initialized",
            R::PLURAL
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        let strip_blanks = middleware::from_fn_with_state(
            BodyLimit(self.state.body_limit),
            remove_blank_fields,
        );

        Router::new()
            .route(
                "/",
                get(handlers::list::<R>)
                    .merge(post(handlers::create::<R>).layer(strip_blanks.clone())),
            )
            .route(
                "/{id}",
                get(handlers::show::<R>)
                    .delete(handlers::destroy::<R>)
                    .merge(patch(handlers::update::<R>).layer(strip_blanks)),
            )
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<Value> {
        Some(openapi::fragment::<R>())
    }

    fn migrations(&self) -> Vec<Migration> {
        R::migrations()
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "{} module stopped", R::PLURAL);
        Ok(())
    }
}

/// Boxed module for `R`, ready for registration.
pub fn create_module<R: Resource>(
    store: Arc<dyn DocumentStore>,
    settings: &Settings,
) -> Arc<dyn Module> {
    Arc::new(ResourceModule::<R>::new(store, settings))
}
