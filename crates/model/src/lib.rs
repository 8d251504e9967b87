//! `reviewgraph-model`: concrete entities of the review graph.
//!
//! Containment is ownership: a parent holds its children in
//! [`EntityContainerList`](reviewgraph_core::EntityContainerList)s and each
//! child remembers its container by id. Cross-references (authors, assignees,
//! categories, annotated items) are plain ids that the assembler only keeps
//! when the referenced entity was part of the resolved batch.

macro_rules! impl_entity {
    ($t:ty, $kind:expr) => {
        impl reviewgraph_core::Entity for $t {
            fn id(&self) -> reviewgraph_core::EntityId {
                self.id
            }

            fn kind(&self) -> reviewgraph_core::EntityKind {
                $kind
            }

            fn container(&self) -> Option<reviewgraph_core::EntityId> {
                self.container
            }

            fn set_container(&mut self, container: Option<reviewgraph_core::EntityId>) {
                self.container = container;
            }
        }
    };
}

pub mod access;
pub mod annotation;
pub mod artifact;
pub mod collect;
pub mod node;
pub mod participant;
pub mod project;
pub mod review;

pub use access::AccessPolicy;
pub use annotation::{Annotation, Comment, Feedback, Note, Reply};
pub use artifact::{Artifact, BudgetTemplate, Model};
pub use collect::collect_dtos;
pub use node::{EntityNode, EntityRef};
pub use participant::{Participant, Role, UserEntity};
pub use project::Project;
pub use review::{Review, ReviewCategory, ReviewItem, ReviewObjective, ReviewTask};

pub use reviewgraph_core::{Entity, EntityContainerList, EntityId, EntityKind};
