use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;

use reviewgraph_core::{EntityId, EntityKind};
use reviewgraph_dto::EntityDto;

use crate::repository::DtoRepository;

/// In-memory DTO repository.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryDtoRepository {
    entries: RwLock<HashMap<EntityId, EntityDto>>,
}

impl InMemoryDtoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(dtos: impl IntoIterator<Item = EntityDto>) -> Self {
        Self {
            entries: RwLock::new(dtos.into_iter().map(|d| (d.id(), d)).collect()),
        }
    }

    pub fn len(&self) -> anyhow::Result<usize> {
        let entries = self.entries.read().map_err(|_| anyhow!("lock poisoned"))?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl DtoRepository for InMemoryDtoRepository {
    fn get(&self, id: EntityId) -> anyhow::Result<Option<EntityDto>> {
        let entries = self.entries.read().map_err(|_| anyhow!("lock poisoned"))?;
        Ok(entries.get(&id).cloned())
    }

    fn get_all(&self, kind: EntityKind) -> anyhow::Result<Vec<EntityDto>> {
        let entries = self.entries.read().map_err(|_| anyhow!("lock poisoned"))?;
        let mut out: Vec<EntityDto> =
            entries.values().filter(|d| d.kind() == kind).cloned().collect();
        out.sort_by_key(EntityDto::id);
        Ok(out)
    }

    fn upsert(&self, dto: EntityDto) -> anyhow::Result<()> {
        let mut entries = self.entries.write().map_err(|_| anyhow!("lock poisoned"))?;
        entries.insert(dto.id(), dto);
        Ok(())
    }

    fn delete(&self, id: EntityId) -> anyhow::Result<bool> {
        let mut entries = self.entries.write().map_err(|_| anyhow!("lock poisoned"))?;
        Ok(entries.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewgraph_dto::{RoleDto, UserEntityDto};

    fn role(name: &str) -> EntityDto {
        RoleDto {
            id: EntityId::new(),
            role_name: name.to_string(),
            access_rights: vec![],
        }
        .into()
    }

    #[test]
    fn upsert_replaces_by_id() {
        let repo = InMemoryDtoRepository::new();
        let mut dto = role("Reviewer");
        repo.upsert(dto.clone()).unwrap();
        if let EntityDto::Role(r) = &mut dto {
            r.role_name = "Lead".to_string();
        }
        repo.upsert(dto.clone()).unwrap();

        assert_eq!(repo.len().unwrap(), 1);
        assert_eq!(repo.get(dto.id()).unwrap(), Some(dto));
    }

    #[test]
    fn get_all_filters_by_kind() {
        let user: EntityDto = UserEntityDto {
            id: EntityId::new(),
            user_name: "alice".to_string(),
            is_admin: false,
        }
        .into();
        let repo = InMemoryDtoRepository::with_entries([role("A"), role("B"), user]);

        let roles = repo.get_all(EntityKind::Role).unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles[0].id() < roles[1].id());
        assert_eq!(repo.get_all(EntityKind::Project).unwrap(), vec![]);
    }

    #[test]
    fn delete_reports_presence() {
        let dto = role("Reviewer");
        let repo = InMemoryDtoRepository::with_entries([dto.clone()]);
        assert!(repo.delete(dto.id()).unwrap());
        assert!(!repo.delete(dto.id()).unwrap());
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_is_an_error_not_an_empty_repository() {
        let repo = std::sync::Arc::new(InMemoryDtoRepository::with_entries([role("Reviewer")]));
        let writer = std::sync::Arc::clone(&repo);
        let crashed = std::thread::spawn(move || {
            let _guard = writer.entries.write().unwrap();
            panic!("writer crashed while holding the lock");
        })
        .join();
        assert!(crashed.is_err());

        let err = repo.len().unwrap_err();
        assert_eq!(err.to_string(), "lock poisoned");
        assert!(repo.is_empty().is_err());
        assert!(repo.get_all(EntityKind::Role).is_err());
    }
}
