pub mod entity;
pub mod store;
pub mod text;

pub use entity::{Category, EntityKind, EntityMeta, Listing, OrbitChain, Project, Subcategory};
pub use store::{KeyValueStore, MemoryStore};
