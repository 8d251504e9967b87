//! Annotations (comments, feedback, notes) and comment replies.

use chrono::{DateTime, Utc};

use reviewgraph_core::{Entity, EntityContainerList, EntityId, EntityKind};
use reviewgraph_dto::{CommentDto, FeedbackDto, NoteDto, ReplyDto, StatusKind, View};

use crate::node::{EntityRef, Known, resolve_ref, resolve_refs};

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    id: EntityId,
    container: Option<EntityId>,
    pub content: String,
    pub status: StatusKind,
    pub view: View,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    /// Review items, objectives or tasks the comment is attached to.
    pub annotatable_items: Vec<EntityId>,
    replies: EntityContainerList<Reply>,
}

impl Comment {
    pub fn new(content: impl Into<String>, author: Option<EntityId>) -> Self {
        let mut comment = Self::shell(EntityId::new());
        comment.content = content.into();
        comment.author = author;
        comment.created_on = Utc::now();
        comment
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            content: String::new(),
            status: StatusKind::Open,
            view: View::None,
            created_on: DateTime::<Utc>::default(),
            author: None,
            annotatable_items: Vec::new(),
            replies: EntityContainerList::new(id),
        }
    }

    pub fn replies(&self) -> &EntityContainerList<Reply> {
        &self.replies
    }

    pub fn replies_mut(&mut self) -> &mut EntityContainerList<Reply> {
        &mut self.replies
    }

    pub(crate) fn apply_dto(&mut self, dto: &CommentDto, known: Known<'_>) {
        self.content = dto.content.clone();
        self.status = dto.status;
        self.view = dto.view;
        self.created_on = dto.created_on;
        self.author = resolve_ref(dto.author, known);
        resolve_refs(&mut self.annotatable_items, &dto.annotatable_items, known);
    }

    pub fn to_dto(&self) -> CommentDto {
        CommentDto {
            id: self.id,
            container: self.container,
            content: self.content.clone(),
            status: self.status,
            view: self.view,
            created_on: self.created_on,
            author: self.author,
            annotatable_items: self.annotatable_items.clone(),
            replies: self.replies.ids(),
        }
    }
}

impl_entity!(Comment, EntityKind::Comment);

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    id: EntityId,
    container: Option<EntityId>,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
}

impl Reply {
    pub fn new(content: impl Into<String>, author: Option<EntityId>) -> Self {
        let mut reply = Self::shell(EntityId::new());
        reply.content = content.into();
        reply.author = author;
        reply.created_on = Utc::now();
        reply
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            content: String::new(),
            created_on: DateTime::<Utc>::default(),
            author: None,
        }
    }

    pub(crate) fn apply_dto(&mut self, dto: &ReplyDto, known: Known<'_>) {
        self.content = dto.content.clone();
        self.created_on = dto.created_on;
        self.author = resolve_ref(dto.author, known);
    }

    pub fn to_dto(&self) -> ReplyDto {
        ReplyDto {
            id: self.id,
            container: self.container,
            content: self.content.clone(),
            created_on: self.created_on,
            author: self.author,
        }
    }
}

impl_entity!(Reply, EntityKind::Reply);

// Feedback and Note carry the same shape; only the kind differs.
macro_rules! plain_annotation {
    ($t:ident, $dto:ident, $kind:expr) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $t {
            id: EntityId,
            container: Option<EntityId>,
            pub content: String,
            pub created_on: DateTime<Utc>,
            pub author: Option<EntityId>,
            pub annotatable_items: Vec<EntityId>,
        }

        impl $t {
            pub fn new(content: impl Into<String>, author: Option<EntityId>) -> Self {
                let mut annotation = Self::shell(EntityId::new());
                annotation.content = content.into();
                annotation.author = author;
                annotation.created_on = Utc::now();
                annotation
            }

            pub fn shell(id: EntityId) -> Self {
                Self {
                    id,
                    container: None,
                    content: String::new(),
                    created_on: DateTime::<Utc>::default(),
                    author: None,
                    annotatable_items: Vec::new(),
                }
            }

            pub(crate) fn apply_dto(&mut self, dto: &$dto, known: Known<'_>) {
                self.content = dto.content.clone();
                self.created_on = dto.created_on;
                self.author = resolve_ref(dto.author, known);
                resolve_refs(&mut self.annotatable_items, &dto.annotatable_items, known);
            }

            pub fn to_dto(&self) -> $dto {
                $dto {
                    id: self.id,
                    container: self.container,
                    content: self.content.clone(),
                    created_on: self.created_on,
                    author: self.author,
                    annotatable_items: self.annotatable_items.clone(),
                }
            }
        }

        impl_entity!($t, $kind);
    };
}

plain_annotation!(Feedback, FeedbackDto, EntityKind::Feedback);
plain_annotation!(Note, NoteDto, EntityKind::Note);

/// Any annotation a project can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Comment(Comment),
    Feedback(Feedback),
    Note(Note),
}

impl Annotation {
    pub fn as_entity_ref(&self) -> EntityRef<'_> {
        match self {
            Annotation::Comment(c) => EntityRef::Comment(c),
            Annotation::Feedback(f) => EntityRef::Feedback(f),
            Annotation::Note(n) => EntityRef::Note(n),
        }
    }

    pub fn author(&self) -> Option<EntityId> {
        match self {
            Annotation::Comment(c) => c.author,
            Annotation::Feedback(f) => f.author,
            Annotation::Note(n) => n.author,
        }
    }

    pub fn annotatable_items(&self) -> &[EntityId] {
        match self {
            Annotation::Comment(c) => &c.annotatable_items,
            Annotation::Feedback(f) => &f.annotatable_items,
            Annotation::Note(n) => &n.annotatable_items,
        }
    }
}

impl Entity for Annotation {
    fn id(&self) -> EntityId {
        match self {
            Annotation::Comment(c) => c.id(),
            Annotation::Feedback(f) => f.id(),
            Annotation::Note(n) => n.id(),
        }
    }

    fn kind(&self) -> EntityKind {
        match self {
            Annotation::Comment(_) => EntityKind::Comment,
            Annotation::Feedback(_) => EntityKind::Feedback,
            Annotation::Note(_) => EntityKind::Note,
        }
    }

    fn container(&self) -> Option<EntityId> {
        match self {
            Annotation::Comment(c) => c.container(),
            Annotation::Feedback(f) => f.container(),
            Annotation::Note(n) => n.container(),
        }
    }

    fn set_container(&mut self, container: Option<EntityId>) {
        match self {
            Annotation::Comment(c) => c.set_container(container),
            Annotation::Feedback(f) => f.set_container(container),
            Annotation::Note(n) => n.set_container(container),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_forwards_container_to_variant() {
        let owner = EntityId::new();
        let mut list = EntityContainerList::new(owner);
        list.add(Annotation::Note(Note::new("looks fine", None))).unwrap();

        match &list[0] {
            Annotation::Note(n) => assert_eq!(n.container(), Some(owner)),
            _ => panic!("Expected a note"),
        }
        assert_eq!(list[0].kind(), EntityKind::Note);
    }

    #[test]
    fn comment_dto_lists_replies() {
        let mut comment = Comment::new("Mass margin too low", None);
        let reply = Reply::new("Agreed", None);
        let reply_id = reply.id();
        comment.replies_mut().add(reply).unwrap();

        let dto = comment.to_dto();
        assert_eq!(dto.replies, vec![reply_id]);
        assert_eq!(comment.replies()[0].container(), Some(comment.id()));
    }
}
