//! `reviewgraph-store`: persistence boundary and entity lifecycle.
//!
//! The repository stores flat DTOs; [`EntityManager`] enforces the business
//! rules (unique names, valid containers) and keeps containment lists in sync.

pub mod config;
pub mod in_memory;
pub mod manager;
pub mod repository;

pub use config::{DEEP_LEVEL_VAR, MAX_DEEP_LEVEL_VAR, StoreConfig};
pub use in_memory::InMemoryDtoRepository;
pub use manager::{DtoResult, EntityManager};
pub use repository::DtoRepository;
