//! Entity lifecycle over a [`DtoRepository`].
//!
//! Every operation returns an [`EntityOperationResult`]: business rule
//! violations come back as failed results with readable messages, and
//! repository failures are folded in through `handle_exception` rather than
//! propagated.

use std::collections::{HashSet, VecDeque};

use reviewgraph_core::{EntityId, EntityKind, EntityOperationResult};
use reviewgraph_dto::EntityDto;

use crate::config::StoreConfig;
use crate::repository::DtoRepository;

pub type DtoResult = EntityOperationResult<EntityDto>;

pub struct EntityManager<R> {
    repository: R,
    config: StoreConfig,
}

impl<R: DtoRepository> EntityManager<R> {
    pub fn new(repository: R, config: StoreConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Validate and store a new entity, then register it in its container's
    /// containment list.
    pub fn create(&self, dto: EntityDto) -> DtoResult {
        let id = dto.id();
        let kind = dto.kind();
        let result = guarded("create", || self.try_create(dto));
        log_outcome("create", kind, id, &result);
        result
    }

    /// Replace the scalar fields and references of an existing entity.
    /// Containment lists and the container are kept as stored.
    pub fn update(&self, dto: EntityDto) -> DtoResult {
        let id = dto.id();
        let kind = dto.kind();
        let result = guarded("update", || self.try_update(dto));
        log_outcome("update", kind, id, &result);
        result
    }

    /// Remove an entity and everything it contains. The result carries the
    /// removed DTOs, the requested one first.
    pub fn delete(&self, id: EntityId) -> DtoResult {
        guarded("delete", || self.try_delete(id))
    }

    pub fn get(&self, id: EntityId) -> DtoResult {
        guarded("get", || {
            Ok(match self.repository.get(id)? {
                Some(dto) => EntityOperationResult::success(dto),
                None => not_found(id),
            })
        })
    }

    pub fn get_all(&self, kind: EntityKind) -> DtoResult {
        guarded("get_all", || {
            Ok(EntityOperationResult::all_success(self.repository.get_all(kind)?))
        })
    }

    /// The entity plus what it contains up to `deep_level` hops (clamped to
    /// the configured maximum; `None` uses the configured default),
    /// breadth-first with the requested entity first.
    pub fn get_with_deep_level(&self, id: EntityId, deep_level: Option<u32>) -> DtoResult {
        let deep_level = self.config.clamp(deep_level);
        guarded("get_with_deep_level", || {
            let Some(root) = self.repository.get(id)? else {
                return Ok(not_found(id));
            };
            let dtos = self.collect_subtree(root, deep_level)?;
            tracing::debug!(
                entity_id = %id,
                deep_level,
                collected = dtos.len(),
                "loaded entity subtree"
            );
            Ok(EntityOperationResult::all_success(dtos))
        })
    }

    fn try_create(&self, dto: EntityDto) -> anyhow::Result<DtoResult> {
        let id = dto.id();
        let kind = dto.kind();

        if self.repository.get(id)?.is_some() {
            return Ok(EntityOperationResult::failed([format!(
                "{kind} {id} already exists"
            )]));
        }

        let mut errors = self.name_conflicts(&dto)?;

        let parent = match dto.container() {
            Some(container) => match self.repository.get(container)? {
                None => {
                    errors.push(format!("container {container} does not exist"));
                    None
                }
                Some(parent) if !parent.kind().can_contain(kind) => {
                    errors.push(format!("{} {container} cannot contain {kind}", parent.kind()));
                    None
                }
                Some(parent) => Some(parent),
            },
            None if !kind.is_root() => {
                errors.push(format!("{kind} {id} requires a container"));
                None
            }
            None => None,
        };

        if !errors.is_empty() {
            return Ok(EntityOperationResult::failed(errors));
        }

        self.repository.upsert(dto.clone())?;

        if let Some(mut parent) = parent {
            if let Some(list) = parent.containment_list_mut(kind) {
                if !list.contains(&id) {
                    list.push(id);
                }
            }
            self.repository.upsert(parent)?;
        }

        Ok(EntityOperationResult::success(dto))
    }

    fn try_update(&self, mut dto: EntityDto) -> anyhow::Result<DtoResult> {
        let id = dto.id();
        let Some(mut stored) = self.repository.get(id)? else {
            return Ok(not_found(id));
        };

        if stored.kind() != dto.kind() {
            return Ok(EntityOperationResult::failed([format!(
                "entity {id} is a {}, not a {}",
                stored.kind(),
                dto.kind()
            )]));
        }

        let errors = self.name_conflicts(&dto)?;
        if !errors.is_empty() {
            return Ok(EntityOperationResult::failed(errors));
        }

        dto.set_container(stored.container());
        for child in EntityKind::ALL {
            if let (Some(target), Some(source)) =
                (dto.containment_list_mut(child), stored.containment_list_mut(child))
            {
                target.clone_from(source);
            }
        }

        self.repository.upsert(dto.clone())?;
        Ok(EntityOperationResult::success(dto))
    }

    fn try_delete(&self, id: EntityId) -> anyhow::Result<DtoResult> {
        let Some(root) = self.repository.get(id)? else {
            return Ok(not_found(id));
        };
        let kind = root.kind();
        let container = root.container();

        let removed = self.collect_subtree(root, u32::MAX)?;
        for dto in &removed {
            self.repository.delete(dto.id())?;
        }

        if let Some(container) = container {
            if let Some(mut parent) = self.repository.get(container)? {
                if let Some(list) = parent.containment_list_mut(kind) {
                    list.retain(|child| *child != id);
                }
                self.repository.upsert(parent)?;
            }
        }

        tracing::info!(entity_id = %id, %kind, removed = removed.len(), "deleted entity");
        Ok(EntityOperationResult::all_success(removed))
    }

    /// `root` and its stored descendants up to `deep_level` hops, breadth-first.
    /// Listed children missing from the repository are skipped.
    fn collect_subtree(&self, root: EntityDto, deep_level: u32) -> anyhow::Result<Vec<EntityDto>> {
        let mut seen = HashSet::from([root.id()]);
        let mut out = Vec::new();
        let mut queue = VecDeque::from([(root, 0u32)]);

        while let Some((dto, depth)) = queue.pop_front() {
            if depth < deep_level {
                for child_id in dto.contained_ids() {
                    if !seen.insert(child_id) {
                        continue;
                    }
                    match self.repository.get(child_id)? {
                        Some(child) => queue.push_back((child, depth + 1)),
                        None => tracing::warn!(
                            entity_id = %dto.id(),
                            child_id = %child_id,
                            "listed child is missing from the repository"
                        ),
                    }
                }
            }
            out.push(dto);
        }

        Ok(out)
    }

    /// Names that must be unique per kind: project, role and user names.
    fn name_conflicts(&self, dto: &EntityDto) -> anyhow::Result<Vec<String>> {
        let Some(name) = unique_name(dto) else {
            return Ok(Vec::new());
        };

        let clash = self
            .repository
            .get_all(dto.kind())?
            .iter()
            .filter(|other| other.id() != dto.id())
            .any(|other| unique_name(other).is_some_and(|n| n.eq_ignore_ascii_case(name)));

        Ok(if clash {
            vec![format!("{} name '{name}' already exists", dto.kind())]
        } else {
            Vec::new()
        })
    }
}

fn unique_name(dto: &EntityDto) -> Option<&str> {
    match dto {
        EntityDto::Project(d) => Some(&d.project_name),
        EntityDto::Role(d) => Some(&d.role_name),
        EntityDto::UserEntity(d) => Some(&d.user_name),
        _ => None,
    }
}

fn not_found(id: EntityId) -> DtoResult {
    EntityOperationResult::failed([format!("entity {id} not found")])
}

/// Run a repository-backed operation; an infrastructure error becomes a failed
/// result carrying its message.
fn guarded(operation: &str, f: impl FnOnce() -> anyhow::Result<DtoResult>) -> DtoResult {
    match f() {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(operation, error = %err, "repository failure");
            let mut result = EntityOperationResult::all_success(Vec::new());
            result.handle_exception(&err);
            result
        }
    }
}

fn log_outcome(operation: &str, kind: EntityKind, id: EntityId, result: &DtoResult) {
    if result.succeeded() {
        tracing::info!(operation, %kind, entity_id = %id, "entity stored");
    } else {
        tracing::debug!(
            operation,
            %kind,
            entity_id = %id,
            errors = ?result.errors(),
            "entity rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryDtoRepository;
    use reviewgraph_dto::{RoleDto, UserEntityDto};

    fn manager() -> EntityManager<InMemoryDtoRepository> {
        EntityManager::new(InMemoryDtoRepository::new(), StoreConfig::default())
    }

    fn role(name: &str) -> EntityDto {
        RoleDto {
            id: EntityId::new(),
            role_name: name.to_string(),
            access_rights: vec![],
        }
        .into()
    }

    #[test]
    fn duplicate_role_name_is_rejected() {
        let manager = manager();
        assert!(manager.create(role("Reviewer")).succeeded());

        let result = manager.create(role("reviewer"));
        assert!(!result.succeeded());
        assert_eq!(result.errors(), ["Role name 'reviewer' already exists"]);
        assert_eq!(manager.repository().len().unwrap(), 1);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let manager = manager();
        let dto = role("Reviewer");
        assert!(manager.create(dto.clone()).succeeded());
        let result = manager.create(dto);
        assert!(result.errors()[0].ends_with("already exists"));
    }

    #[test]
    fn update_cannot_change_kind() {
        let manager = manager();
        let dto = role("Reviewer");
        manager.create(dto.clone());

        let user: EntityDto = UserEntityDto {
            id: dto.id(),
            user_name: "alice".to_string(),
            is_admin: false,
        }
        .into();
        let result = manager.update(user);
        assert!(!result.succeeded());
        assert!(result.errors()[0].contains("is a Role"));
    }

    #[test]
    fn missing_entity_is_not_found() {
        let manager = manager();
        let id = EntityId::new();
        for result in [manager.get(id), manager.delete(id), manager.get_with_deep_level(id, None)] {
            assert!(!result.succeeded());
            assert!(result.errors()[0].contains("not found"));
        }
    }
}
