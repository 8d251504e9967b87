use std::collections::HashMap;

use reviewgraph_core::{Entity, EntityId, EntityKind};
use reviewgraph_dto::EntityDto;
use reviewgraph_model::{EntityNode, EntityRef, collect_dtos};

/// Result of one resolution: the root entities (each owning its subtree) and
/// an explicit child → container edge map for every contained entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGraph {
    roots: Vec<EntityNode>,
    containment: HashMap<EntityId, EntityId>,
}

impl ResolvedGraph {
    pub(crate) fn new(roots: Vec<EntityNode>, containment: HashMap<EntityId, EntityId>) -> Self {
        Self { roots, containment }
    }

    /// Entities without a container in the window, ordered by id.
    pub fn roots(&self) -> &[EntityNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<EntityNode> {
        self.roots
    }

    pub fn root(&self, id: EntityId) -> Option<&EntityNode> {
        self.roots.iter().find(|r| r.id() == id)
    }

    /// Roots of the given kind, e.g. every resolved project.
    pub fn roots_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityNode> {
        self.roots.iter().filter(move |r| r.kind() == kind)
    }

    /// Any resolved entity, wherever it is contained.
    pub fn find(&self, id: EntityId) -> Option<EntityRef<'_>> {
        let top = self.top_of(id);
        self.root(top).and_then(|root| root.as_entity_ref().find(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.find(id).is_some()
    }

    pub fn container_of(&self, id: EntityId) -> Option<EntityId> {
        self.containment.get(&id).copied()
    }

    pub fn containment(&self) -> &HashMap<EntityId, EntityId> {
        &self.containment
    }

    /// Number of resolved entities.
    pub fn len(&self) -> usize {
        self.roots.len() + self.containment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Flatten back to DTOs: every root and everything below it.
    pub fn to_dtos(&self) -> Vec<EntityDto> {
        self.roots
            .iter()
            .flat_map(|root| collect_dtos(root.as_entity_ref(), u32::MAX))
            .collect()
    }

    fn top_of(&self, mut id: EntityId) -> EntityId {
        while let Some(parent) = self.containment.get(&id) {
            id = *parent;
        }
        id
    }
}
