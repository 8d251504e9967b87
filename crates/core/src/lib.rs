//! `reviewgraph-core`: entity-graph foundation building blocks.
//!
//! Identity, containment and operation outcomes. No wire format, no storage.

pub mod container_list;
pub mod entity;
pub mod error;
pub mod id;
pub mod operation_result;

pub use container_list::EntityContainerList;
pub use entity::{Entity, EntityKind};
pub use error::{DomainError, DomainResult};
pub use id::EntityId;
pub use operation_result::{EntityOperationResult, EntryState, TrackedEntry, UNSPECIFIED_FAILURE};
