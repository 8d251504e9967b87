//! Entity trait: identity + single-owner containment.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Minimal interface shared by every entity of the review graph.
///
/// The container back-reference is an id, never a pointer. It is written by
/// [`crate::EntityContainerList`] when the entity is inserted or removed, so
/// callers outside this crate should treat `set_container` as plumbing.
pub trait Entity {
    /// Returns the entity identifier.
    fn id(&self) -> EntityId;

    /// Concrete kind (wire discriminator).
    fn kind(&self) -> EntityKind;

    /// Id of the owning entity, `None` for roots and detached entities.
    fn container(&self) -> Option<EntityId>;

    fn set_container(&mut self, container: Option<EntityId>);
}

/// Concrete entity kinds.
///
/// The variant name is the `$type` discriminator used on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Project,
    Review,
    ReviewObjective,
    ReviewTask,
    ReviewItem,
    ReviewCategory,
    Participant,
    Role,
    UserEntity,
    Comment,
    Reply,
    Feedback,
    Note,
    Model,
    BudgetTemplate,
}

impl EntityKind {
    pub const ALL: [EntityKind; 15] = [
        EntityKind::Project,
        EntityKind::Review,
        EntityKind::ReviewObjective,
        EntityKind::ReviewTask,
        EntityKind::ReviewItem,
        EntityKind::ReviewCategory,
        EntityKind::Participant,
        EntityKind::Role,
        EntityKind::UserEntity,
        EntityKind::Comment,
        EntityKind::Reply,
        EntityKind::Feedback,
        EntityKind::Note,
        EntityKind::Model,
        EntityKind::BudgetTemplate,
    ];

    /// Stable `$type` name.
    pub const fn discriminator(self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Review => "Review",
            EntityKind::ReviewObjective => "ReviewObjective",
            EntityKind::ReviewTask => "ReviewTask",
            EntityKind::ReviewItem => "ReviewItem",
            EntityKind::ReviewCategory => "ReviewCategory",
            EntityKind::Participant => "Participant",
            EntityKind::Role => "Role",
            EntityKind::UserEntity => "UserEntity",
            EntityKind::Comment => "Comment",
            EntityKind::Reply => "Reply",
            EntityKind::Feedback => "Feedback",
            EntityKind::Note => "Note",
            EntityKind::Model => "Model",
            EntityKind::BudgetTemplate => "BudgetTemplate",
        }
    }

    pub fn from_discriminator(tag: &str) -> Option<EntityKind> {
        Self::ALL.into_iter().find(|k| k.discriminator() == tag)
    }

    /// Comment, Feedback and Note share the annotation family.
    pub const fn is_annotation(self) -> bool {
        matches!(self, EntityKind::Comment | EntityKind::Feedback | EntityKind::Note)
    }

    pub const fn is_artifact(self) -> bool {
        matches!(self, EntityKind::Model | EntityKind::BudgetTemplate)
    }

    /// Kinds that are never contained by another entity.
    pub const fn is_root(self) -> bool {
        matches!(
            self,
            EntityKind::Project
                | EntityKind::Role
                | EntityKind::UserEntity
                | EntityKind::ReviewCategory
        )
    }

    /// Containment schema: may an entity of kind `child` live in one of this
    /// kind's containment lists?
    pub const fn can_contain(self, child: EntityKind) -> bool {
        match self {
            EntityKind::Project => {
                matches!(child, EntityKind::Participant | EntityKind::Review)
                    || child.is_artifact()
                    || child.is_annotation()
            }
            EntityKind::Review => {
                matches!(child, EntityKind::ReviewObjective | EntityKind::ReviewItem)
            }
            EntityKind::ReviewObjective => matches!(child, EntityKind::ReviewTask),
            EntityKind::Comment => matches!(child, EntityKind::Reply),
            _ => false,
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.discriminator())
    }
}
