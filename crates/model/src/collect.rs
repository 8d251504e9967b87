//! Flattening an owned subtree back into DTOs, bounded by a deep level.

use std::collections::{HashSet, VecDeque};

use reviewgraph_dto::EntityDto;

use crate::node::EntityRef;

/// DTOs of `root` and of everything it contains up to `deep_level`
/// containment hops, breadth-first. `deep_level == 0` yields the root only.
///
/// Each entity is emitted once, even if it were reachable twice.
pub fn collect_dtos(root: EntityRef<'_>, deep_level: u32) -> Vec<EntityDto> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut queue = VecDeque::from([(root, 0u32)]);

    while let Some((node, depth)) = queue.pop_front() {
        if !seen.insert(node.id()) {
            continue;
        }
        out.push(node.to_dto());
        if depth < deep_level {
            queue.extend(node.children().into_iter().map(|child| (child, depth + 1)));
        }
    }

    tracing::trace!(root_id = %root.id(), deep_level, collected = out.len(), "collected dtos");
    out
}
