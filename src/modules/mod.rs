pub mod authors;
pub mod books;
pub mod resource;

use std::sync::Arc;

use shelf_db::DocumentStore;
use shelf_kernel::{settings::Settings, ModuleRegistry};

pub use authors::Author;
pub use books::Book;

/// Register every resource module with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    store: Arc<dyn DocumentStore>,
    settings: &Settings,
) {
    registry.register(resource::create_module::<Author>(store.clone(), settings));
    registry.register(resource::create_module::<Book>(store, settings));
}
