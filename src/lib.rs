//! SHELF application library
//!
//! Authors and books exposed as CRUD resources, plus the bootstrap that
//! wires them to a document store and an HTTP server.

pub mod app;
pub mod modules;

pub use app::{build_app, build_registry};
