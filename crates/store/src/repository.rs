use reviewgraph_core::{EntityId, EntityKind};
use reviewgraph_dto::EntityDto;

/// Persistence boundary: flat DTOs keyed by id.
///
/// Failures are opaque infrastructure errors; business rules live in
/// [`EntityManager`](crate::EntityManager).
pub trait DtoRepository: Send + Sync {
    fn get(&self, id: EntityId) -> anyhow::Result<Option<EntityDto>>;

    /// Every stored entity of `kind`, ordered by id.
    fn get_all(&self, kind: EntityKind) -> anyhow::Result<Vec<EntityDto>>;

    /// Insert or replace.
    fn upsert(&self, dto: EntityDto) -> anyhow::Result<()>;

    /// Returns whether something was removed.
    fn delete(&self, id: EntityId) -> anyhow::Result<bool>;
}
