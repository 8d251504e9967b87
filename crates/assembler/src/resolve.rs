//! Two-pass DTO resolution.
//!
//! ```text
//! DTO batch (any order, may contain forward references)
//!   ↓
//! 1. materialize_shells   one empty entity per id
//!   ↓
//! 2. window               drop entities deeper than the requested deep level
//!   ↓
//! 3. resolve_references   scalars + cross-references, looked up in the window
//!   ↓
//! 4. wire containment     children moved into their parent's typed list
//!   ↓
//! ResolvedGraph (roots own everything else)
//! ```
//!
//! Because every entity exists as a shell before any reference is looked up,
//! the input order never matters and no topological sort is needed.

use std::collections::{HashMap, HashSet};

use reviewgraph_core::{DomainError, DomainResult, Entity, EntityId};
use reviewgraph_dto::EntityDto;
use reviewgraph_model::EntityNode;

use crate::graph::ResolvedGraph;

/// Id → entity lookup built by pass 1. Local to one resolution.
pub type ShellMap = HashMap<EntityId, EntityNode>;

/// Pass 1: instantiate one empty entity per DTO, keyed by id.
///
/// If the same id appears twice the later DTO wins, provided it describes the
/// same kind; a kind change for an id is a [`DomainError::Conflict`].
pub fn materialize_shells<'a>(
    dtos: impl IntoIterator<Item = &'a EntityDto>,
) -> DomainResult<ShellMap> {
    let mut shells = ShellMap::new();
    for dto in dtos {
        let id = dto.id();
        if let Some(existing) = shells.get(&id) {
            if existing.kind() != dto.kind() {
                return Err(DomainError::conflict(format!(
                    "id {id} is used by both a {} and a {}",
                    existing.kind(),
                    dto.kind()
                )));
            }
            tracing::debug!(
                entity_id = %id,
                kind = %dto.kind(),
                "duplicate dto in batch, later one wins"
            );
            continue;
        }
        shells.insert(id, EntityNode::shell(dto.kind(), id));
    }
    Ok(shells)
}

/// Pass 2: populate every shell present in `shells` from its DTO.
///
/// References to ids absent from `shells` are dropped silently: a partial graph
/// is a normal outcome, not an error. DTOs whose entity is not in `shells`
/// (outside the window) are skipped.
pub fn resolve_references<'a>(
    dtos: impl IntoIterator<Item = &'a EntityDto>,
    shells: &mut ShellMap,
) -> DomainResult<()> {
    let window: HashSet<EntityId> = shells.keys().copied().collect();
    let known = |id: EntityId| window.contains(&id);

    for dto in dtos {
        if let Some(node) = shells.get_mut(&dto.id()) {
            node.apply_dto(dto, &known)?;
        }
    }
    Ok(())
}

/// Resolve a DTO batch into an owned graph restricted to `deep_level`
/// containment hops below each root (`0` keeps the roots only).
///
/// A root is an entity without a container in the batch. Fails only on
/// malformed payloads: an id shared by two kinds, a child whose kind its
/// container cannot hold, or a containment cycle.
pub fn assemble(dtos: &[EntityDto], deep_level: u32) -> DomainResult<ResolvedGraph> {
    let mut shells = materialize_shells(dtos)?;
    let batch = latest_dtos(dtos);

    let parent_of = effective_containers(&batch);
    let depths = containment_depths(&parent_of, batch.keys().copied())?;

    shells.retain(|id, _| depths.get(id).is_some_and(|d| *d <= deep_level));

    resolve_references(batch.values().copied(), &mut shells)?;

    let containment: HashMap<EntityId, EntityId> = parent_of
        .into_iter()
        .filter(|(child, parent)| shells.contains_key(child) && shells.contains_key(parent))
        .collect();

    wire_containment(&batch, &containment, &depths, &mut shells)?;

    let mut roots: Vec<EntityNode> = shells.into_values().collect();
    roots.sort_by_key(|n| n.id());

    tracing::debug!(
        batch = dtos.len(),
        window = containment.len() + roots.len(),
        roots = roots.len(),
        deep_level,
        "assembled entity graph"
    );

    Ok(ResolvedGraph::new(roots, containment))
}

/// Last DTO per id (partial updates overwrite earlier ones).
fn latest_dtos(dtos: &[EntityDto]) -> HashMap<EntityId, &EntityDto> {
    dtos.iter().map(|dto| (dto.id(), dto)).collect()
}

/// child → parent, within the batch.
///
/// A child's own `container` field is authoritative when its container is in
/// the batch; otherwise the first parent listing it in a containment list is
/// used.
fn effective_containers(batch: &HashMap<EntityId, &EntityDto>) -> HashMap<EntityId, EntityId> {
    let mut parent_of = HashMap::new();

    for (id, dto) in batch {
        if let Some(container) = dto.container().filter(|c| batch.contains_key(c)) {
            parent_of.insert(*id, container);
        }
    }

    // Deterministic fallback regardless of map iteration order.
    let mut parents: Vec<&EntityDto> = batch.values().copied().collect();
    parents.sort_by_key(|dto| dto.id());
    for parent in parents {
        for child in parent.contained_ids() {
            if child != parent.id() && batch.contains_key(&child) {
                parent_of.entry(child).or_insert(parent.id());
            }
        }
    }

    parent_of
}

/// Containment depth of every id (roots are 0). Fails on cycles.
fn containment_depths(
    parent_of: &HashMap<EntityId, EntityId>,
    ids: impl IntoIterator<Item = EntityId>,
) -> DomainResult<HashMap<EntityId, u32>> {
    let mut depths: HashMap<EntityId, u32> = HashMap::new();

    for id in ids {
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        let mut cursor = id;

        let anchor = loop {
            if let Some(depth) = depths.get(&cursor) {
                break Some(*depth);
            }
            if !on_path.insert(cursor) {
                return Err(DomainError::invariant(format!(
                    "containment cycle through entity {cursor}"
                )));
            }
            path.push(cursor);
            match parent_of.get(&cursor) {
                Some(parent) => cursor = *parent,
                None => break None,
            }
        };

        // `path` runs child → ancestor; assign depths from the top down.
        let mut depth = anchor.map_or(0, |d| d + 1);
        for node in path.into_iter().rev() {
            depths.insert(node, depth);
            depth += 1;
        }
    }

    Ok(depths)
}

/// Move every windowed child into its parent, deepest parents first so each
/// child is complete before it is moved.
fn wire_containment(
    batch: &HashMap<EntityId, &EntityDto>,
    containment: &HashMap<EntityId, EntityId>,
    depths: &HashMap<EntityId, u32>,
    shells: &mut ShellMap,
) -> DomainResult<()> {
    let mut children_of: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
    for (child, parent) in containment {
        children_of.entry(*parent).or_default().push(*child);
    }

    let mut parents: Vec<EntityId> = children_of.keys().copied().collect();
    parents.sort_by_key(|id| (std::cmp::Reverse(depths.get(id).copied().unwrap_or(0)), *id));

    for parent_id in parents {
        let Some(children) = children_of.remove(&parent_id) else {
            continue;
        };

        for child_id in ordered_children(batch.get(&parent_id).copied(), children) {
            let child = shells.remove(&child_id).ok_or_else(|| {
                DomainError::invariant(format!("entity {child_id} was attached twice"))
            })?;
            let parent = shells.get_mut(&parent_id).ok_or_else(|| {
                DomainError::invariant(format!("container {parent_id} left the window early"))
            })?;
            parent.adopt(child)?;
        }
    }

    Ok(())
}

/// Children in the order the parent's DTO lists them, then the remaining ones
/// (which only named the parent as container) by id.
fn ordered_children(parent: Option<&EntityDto>, mut children: Vec<EntityId>) -> Vec<EntityId> {
    let listed = parent.map(EntityDto::contained_ids).unwrap_or_default();
    let rank: HashMap<EntityId, usize> = listed
        .iter()
        .enumerate()
        .rev()
        .map(|(i, id)| (*id, i))
        .collect();

    children.sort_by_key(|id| (rank.get(id).copied().unwrap_or(usize::MAX), *id));
    children
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> EntityId {
        EntityId::new()
    }

    #[test]
    fn depths_follow_parent_chain() {
        let (a, b, c) = (id(), id(), id());
        let parent_of = HashMap::from([(b, a), (c, b)]);
        let depths = containment_depths(&parent_of, [c, a, b]).unwrap();
        assert_eq!(depths[&a], 0);
        assert_eq!(depths[&b], 1);
        assert_eq!(depths[&c], 2);
    }

    #[test]
    fn cycle_is_rejected() {
        let (a, b) = (id(), id());
        let parent_of = HashMap::from([(a, b), (b, a)]);
        let err = containment_depths(&parent_of, [a]).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(msg) if msg.contains("cycle")));
    }

    #[test]
    fn unlisted_children_are_ordered_by_id() {
        let (x, y, z) = (id(), id(), id());
        let mut expected = vec![x, y, z];
        expected.sort();
        assert_eq!(ordered_children(None, vec![z, x, y]), expected);
    }
}
