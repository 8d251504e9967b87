//! Closed unions over every concrete entity: owned ([`EntityNode`]) and
//! borrowed ([`EntityRef`]).
//!
//! These are the per-kind dispatch tables of the graph: shell construction,
//! reference population, containment wiring and DTO conversion are all
//! exhaustive `match`es, so adding a kind fails to compile until every table
//! knows about it.

use reviewgraph_core::{DomainError, DomainResult, Entity, EntityId, EntityKind};
use reviewgraph_dto::EntityDto;

use crate::annotation::{Annotation, Comment, Feedback, Note, Reply};
use crate::artifact::{Artifact, BudgetTemplate, Model};
use crate::participant::{Participant, Role, UserEntity};
use crate::project::Project;
use crate::review::{Review, ReviewCategory, ReviewItem, ReviewObjective, ReviewTask};

/// Membership test against the resolution window: is this id part of the
/// batch being resolved?
pub type Known<'a> = &'a dyn Fn(EntityId) -> bool;

pub(crate) fn resolve_ref(id: Option<EntityId>, known: Known<'_>) -> Option<EntityId> {
    id.filter(|id| known(*id))
}

/// Clear `target`, then refill it with the ids of `source` found in the window.
pub(crate) fn resolve_refs(target: &mut Vec<EntityId>, source: &[EntityId], known: Known<'_>) {
    target.clear();
    target.extend(source.iter().copied().filter(|id| known(*id)));
}

/// Any entity, owned.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityNode {
    Project(Project),
    Review(Review),
    ReviewObjective(ReviewObjective),
    ReviewTask(ReviewTask),
    ReviewItem(ReviewItem),
    ReviewCategory(ReviewCategory),
    Participant(Participant),
    Role(Role),
    UserEntity(UserEntity),
    Comment(Comment),
    Reply(Reply),
    Feedback(Feedback),
    Note(Note),
    Model(Model),
    BudgetTemplate(BudgetTemplate),
}

/// Any entity, borrowed from wherever it lives in the owned tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    Project(&'a Project),
    Review(&'a Review),
    ReviewObjective(&'a ReviewObjective),
    ReviewTask(&'a ReviewTask),
    ReviewItem(&'a ReviewItem),
    ReviewCategory(&'a ReviewCategory),
    Participant(&'a Participant),
    Role(&'a Role),
    UserEntity(&'a UserEntity),
    Comment(&'a Comment),
    Reply(&'a Reply),
    Feedback(&'a Feedback),
    Note(&'a Note),
    Model(&'a Model),
    BudgetTemplate(&'a BudgetTemplate),
}

macro_rules! each_variant {
    ($enum:ident, $value:expr, $e:ident => $body:expr) => {
        match $value {
            $enum::Project($e) => $body,
            $enum::Review($e) => $body,
            $enum::ReviewObjective($e) => $body,
            $enum::ReviewTask($e) => $body,
            $enum::ReviewItem($e) => $body,
            $enum::ReviewCategory($e) => $body,
            $enum::Participant($e) => $body,
            $enum::Role($e) => $body,
            $enum::UserEntity($e) => $body,
            $enum::Comment($e) => $body,
            $enum::Reply($e) => $body,
            $enum::Feedback($e) => $body,
            $enum::Note($e) => $body,
            $enum::Model($e) => $body,
            $enum::BudgetTemplate($e) => $body,
        }
    };
}

impl EntityNode {
    /// Empty instance of `kind` carrying only its id.
    pub fn shell(kind: EntityKind, id: EntityId) -> Self {
        match kind {
            EntityKind::Project => EntityNode::Project(Project::shell(id)),
            EntityKind::Review => EntityNode::Review(Review::shell(id)),
            EntityKind::ReviewObjective => EntityNode::ReviewObjective(ReviewObjective::shell(id)),
            EntityKind::ReviewTask => EntityNode::ReviewTask(ReviewTask::shell(id)),
            EntityKind::ReviewItem => EntityNode::ReviewItem(ReviewItem::shell(id)),
            EntityKind::ReviewCategory => EntityNode::ReviewCategory(ReviewCategory::shell(id)),
            EntityKind::Participant => EntityNode::Participant(Participant::shell(id)),
            EntityKind::Role => EntityNode::Role(Role::shell(id)),
            EntityKind::UserEntity => EntityNode::UserEntity(UserEntity::shell(id)),
            EntityKind::Comment => EntityNode::Comment(Comment::shell(id)),
            EntityKind::Reply => EntityNode::Reply(Reply::shell(id)),
            EntityKind::Feedback => EntityNode::Feedback(Feedback::shell(id)),
            EntityKind::Note => EntityNode::Note(Note::shell(id)),
            EntityKind::Model => EntityNode::Model(Model::shell(id)),
            EntityKind::BudgetTemplate => EntityNode::BudgetTemplate(BudgetTemplate::shell(id)),
        }
    }

    /// Copy scalar fields from `dto` and resolve its cross-references against
    /// `known`. Collection references are cleared first, so applying the same
    /// DTO twice gives the same result.
    ///
    /// Containment lists are not touched here; children are attached with
    /// [`EntityNode::adopt`].
    pub fn apply_dto(&mut self, dto: &EntityDto, known: Known<'_>) -> DomainResult<()> {
        match (self, dto) {
            (EntityNode::Project(e), EntityDto::Project(d)) => e.apply_dto(d, known),
            (EntityNode::Review(e), EntityDto::Review(d)) => e.apply_dto(d, known),
            (EntityNode::ReviewObjective(e), EntityDto::ReviewObjective(d)) => {
                e.apply_dto(d, known)
            }
            (EntityNode::ReviewTask(e), EntityDto::ReviewTask(d)) => e.apply_dto(d, known),
            (EntityNode::ReviewItem(e), EntityDto::ReviewItem(d)) => e.apply_dto(d, known),
            (EntityNode::ReviewCategory(e), EntityDto::ReviewCategory(d)) => e.apply_dto(d),
            (EntityNode::Participant(e), EntityDto::Participant(d)) => e.apply_dto(d, known),
            (EntityNode::Role(e), EntityDto::Role(d)) => e.apply_dto(d),
            (EntityNode::UserEntity(e), EntityDto::UserEntity(d)) => e.apply_dto(d),
            (EntityNode::Comment(e), EntityDto::Comment(d)) => e.apply_dto(d, known),
            (EntityNode::Reply(e), EntityDto::Reply(d)) => e.apply_dto(d, known),
            (EntityNode::Feedback(e), EntityDto::Feedback(d)) => e.apply_dto(d, known),
            (EntityNode::Note(e), EntityDto::Note(d)) => e.apply_dto(d, known),
            (EntityNode::Model(e), EntityDto::Model(d)) => e.apply_dto(d),
            (EntityNode::BudgetTemplate(e), EntityDto::BudgetTemplate(d)) => e.apply_dto(d),
            (node, dto) => {
                return Err(DomainError::conflict(format!(
                    "entity {} is a {} but the DTO describes a {}",
                    node.id(),
                    node.kind(),
                    dto.kind()
                )));
            }
        }
        Ok(())
    }

    /// Move `child` into the matching containment list of this entity.
    ///
    /// Fails when the kinds are incompatible or when a child with the same id is
    /// already there.
    pub fn adopt(&mut self, child: EntityNode) -> DomainResult<()> {
        match (self, child) {
            (EntityNode::Project(p), EntityNode::Participant(c)) => p.participants_mut().add(c),
            (EntityNode::Project(p), EntityNode::Review(c)) => p.reviews_mut().add(c),
            (EntityNode::Project(p), EntityNode::Model(c)) => {
                p.artifacts_mut().add(Artifact::Model(c))
            }
            (EntityNode::Project(p), EntityNode::BudgetTemplate(c)) => {
                p.artifacts_mut().add(Artifact::BudgetTemplate(c))
            }
            (EntityNode::Project(p), EntityNode::Comment(c)) => {
                p.annotations_mut().add(Annotation::Comment(c))
            }
            (EntityNode::Project(p), EntityNode::Feedback(c)) => {
                p.annotations_mut().add(Annotation::Feedback(c))
            }
            (EntityNode::Project(p), EntityNode::Note(c)) => {
                p.annotations_mut().add(Annotation::Note(c))
            }
            (EntityNode::Review(r), EntityNode::ReviewObjective(c)) => {
                r.review_objectives_mut().add(c)
            }
            (EntityNode::Review(r), EntityNode::ReviewItem(c)) => r.review_items_mut().add(c),
            (EntityNode::ReviewObjective(o), EntityNode::ReviewTask(c)) => {
                o.review_tasks_mut().add(c)
            }
            (EntityNode::Comment(c), EntityNode::Reply(r)) => c.replies_mut().add(r),
            (parent, child) => Err(DomainError::invariant(format!(
                "{} {} cannot contain {} {}",
                parent.kind(),
                parent.id(),
                child.kind(),
                child.id()
            ))),
        }
    }

    pub fn as_entity_ref(&self) -> EntityRef<'_> {
        match self {
            EntityNode::Project(e) => EntityRef::Project(e),
            EntityNode::Review(e) => EntityRef::Review(e),
            EntityNode::ReviewObjective(e) => EntityRef::ReviewObjective(e),
            EntityNode::ReviewTask(e) => EntityRef::ReviewTask(e),
            EntityNode::ReviewItem(e) => EntityRef::ReviewItem(e),
            EntityNode::ReviewCategory(e) => EntityRef::ReviewCategory(e),
            EntityNode::Participant(e) => EntityRef::Participant(e),
            EntityNode::Role(e) => EntityRef::Role(e),
            EntityNode::UserEntity(e) => EntityRef::UserEntity(e),
            EntityNode::Comment(e) => EntityRef::Comment(e),
            EntityNode::Reply(e) => EntityRef::Reply(e),
            EntityNode::Feedback(e) => EntityRef::Feedback(e),
            EntityNode::Note(e) => EntityRef::Note(e),
            EntityNode::Model(e) => EntityRef::Model(e),
            EntityNode::BudgetTemplate(e) => EntityRef::BudgetTemplate(e),
        }
    }

    pub fn to_dto(&self) -> EntityDto {
        self.as_entity_ref().to_dto()
    }
}

impl Entity for EntityNode {
    fn id(&self) -> EntityId {
        each_variant!(EntityNode, self, e => e.id())
    }

    fn kind(&self) -> EntityKind {
        each_variant!(EntityNode, self, e => e.kind())
    }

    fn container(&self) -> Option<EntityId> {
        each_variant!(EntityNode, self, e => e.container())
    }

    fn set_container(&mut self, container: Option<EntityId>) {
        each_variant!(EntityNode, self, e => e.set_container(container))
    }
}

macro_rules! ref_accessors {
    ($lt:lifetime; $($method:ident => $variant:ident($t:ty)),* $(,)?) => {
        $(
            pub fn $method(self) -> Option<&$lt $t> {
                match self {
                    EntityRef::$variant(e) => Some(e),
                    _ => None,
                }
            }
        )*
    };
}

impl<'a> EntityRef<'a> {
    pub fn id(self) -> EntityId {
        each_variant!(EntityRef, self, e => e.id())
    }

    pub fn kind(self) -> EntityKind {
        each_variant!(EntityRef, self, e => e.kind())
    }

    pub fn container(self) -> Option<EntityId> {
        each_variant!(EntityRef, self, e => e.container())
    }

    /// Directly contained entities, in containment-list order.
    pub fn children(self) -> Vec<EntityRef<'a>> {
        match self {
            EntityRef::Project(p) => p
                .participants()
                .iter()
                .map(EntityRef::Participant)
                .chain(p.reviews().iter().map(EntityRef::Review))
                .chain(p.artifacts().iter().map(Artifact::as_entity_ref))
                .chain(p.annotations().iter().map(Annotation::as_entity_ref))
                .collect(),
            EntityRef::Review(r) => r
                .review_objectives()
                .iter()
                .map(EntityRef::ReviewObjective)
                .chain(r.review_items().iter().map(EntityRef::ReviewItem))
                .collect(),
            EntityRef::ReviewObjective(o) => {
                o.review_tasks().iter().map(EntityRef::ReviewTask).collect()
            }
            EntityRef::Comment(c) => c.replies().iter().map(EntityRef::Reply).collect(),
            _ => Vec::new(),
        }
    }

    /// Depth-first search for `id` in the subtree rooted here (inclusive).
    pub fn find(self, id: EntityId) -> Option<EntityRef<'a>> {
        if self.id() == id {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(id))
    }

    pub fn to_dto(self) -> EntityDto {
        match self {
            EntityRef::Project(e) => e.to_dto().into(),
            EntityRef::Review(e) => e.to_dto().into(),
            EntityRef::ReviewObjective(e) => e.to_dto().into(),
            EntityRef::ReviewTask(e) => e.to_dto().into(),
            EntityRef::ReviewItem(e) => e.to_dto().into(),
            EntityRef::ReviewCategory(e) => e.to_dto().into(),
            EntityRef::Participant(e) => e.to_dto().into(),
            EntityRef::Role(e) => e.to_dto().into(),
            EntityRef::UserEntity(e) => e.to_dto().into(),
            EntityRef::Comment(e) => e.to_dto().into(),
            EntityRef::Reply(e) => e.to_dto().into(),
            EntityRef::Feedback(e) => e.to_dto().into(),
            EntityRef::Note(e) => e.to_dto().into(),
            EntityRef::Model(e) => e.to_dto().into(),
            EntityRef::BudgetTemplate(e) => e.to_dto().into(),
        }
    }

    ref_accessors!(
        'a;
        as_project => Project(Project),
        as_review => Review(Review),
        as_review_objective => ReviewObjective(ReviewObjective),
        as_review_task => ReviewTask(ReviewTask),
        as_review_item => ReviewItem(ReviewItem),
        as_review_category => ReviewCategory(ReviewCategory),
        as_participant => Participant(Participant),
        as_role => Role(Role),
        as_user => UserEntity(UserEntity),
        as_comment => Comment(Comment),
        as_reply => Reply(Reply),
        as_feedback => Feedback(Feedback),
        as_note => Note(Note),
        as_model => Model(Model),
        as_budget_template => BudgetTemplate(BudgetTemplate),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_has_requested_kind_and_id() {
        for kind in EntityKind::ALL {
            let id = EntityId::new();
            let shell = EntityNode::shell(kind, id);
            assert_eq!(shell.kind(), kind);
            assert_eq!(shell.id(), id);
            assert_eq!(shell.container(), None);
        }
    }

    #[test]
    fn adopt_rejects_incompatible_child() {
        let mut review = EntityNode::shell(EntityKind::Review, EntityId::new());
        let reply = EntityNode::shell(EntityKind::Reply, EntityId::new());
        let err = review.adopt(reply).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("cannot contain Reply")),
            _ => panic!("Expected InvariantViolation"),
        }
    }

    #[test]
    fn adopt_wires_container_and_children_order() {
        let mut project = EntityNode::shell(EntityKind::Project, EntityId::new());
        let review = EntityNode::shell(EntityKind::Review, EntityId::new());
        let note = EntityNode::shell(EntityKind::Note, EntityId::new());
        let (review_id, note_id) = (review.id(), note.id());

        project.adopt(note).unwrap();
        project.adopt(review).unwrap();

        let children: Vec<EntityId> = project
            .as_entity_ref()
            .children()
            .into_iter()
            .map(EntityRef::id)
            .collect();
        // Reviews come before annotations regardless of adoption order.
        assert_eq!(children, vec![review_id, note_id]);

        let found = project.as_entity_ref().find(note_id).unwrap();
        assert_eq!(found.container(), Some(project.id()));
        assert!(found.as_note().is_some());
    }

    #[test]
    fn apply_dto_rejects_kind_mismatch() {
        let id = EntityId::new();
        let mut node = EntityNode::shell(EntityKind::Role, id);
        let dto = EntityNode::shell(EntityKind::UserEntity, id).to_dto();
        let known = |_: EntityId| true;
        assert!(matches!(
            node.apply_dto(&dto, &known),
            Err(DomainError::Conflict(_))
        ));
    }
}
