//! Product resource: model, payload schemas, storage and HTTP handlers.

pub mod error;
pub mod handler;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod schema;
pub mod store;

pub use error::{ProductError, ProductResult};
pub use handler::AppState;
pub use memory::MemoryProductStore;
pub use model::{NewProduct, Product, ProductChanges};
pub use postgres::PgProductStore;
pub use store::{ProductSession, ProductStore};
