//! Closed union of every DTO kind plus the `$type` dispatch used to decode it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use reviewgraph_core::{EntityId, EntityKind};

use crate::annotation::{CommentDto, FeedbackDto, NoteDto, ReplyDto};
use crate::artifact::{BudgetTemplateDto, ModelDto};
use crate::participant::{ParticipantDto, RoleDto, UserEntityDto};
use crate::review::{
    ProjectDto, ReviewCategoryDto, ReviewDto, ReviewItemDto, ReviewObjectiveDto, ReviewTaskDto,
};

/// Name of the discriminator field on the wire.
pub const TYPE_FIELD: &str = "$type";

/// Any DTO, tagged by its concrete kind.
///
/// Serialization writes `$type` first, then the variant's own fields. Decoding
/// goes through [`EntityDto::from_value`], which reads `$type` before picking
/// the concrete parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "$type")]
pub enum EntityDto {
    Project(ProjectDto),
    Review(ReviewDto),
    ReviewObjective(ReviewObjectiveDto),
    ReviewTask(ReviewTaskDto),
    ReviewItem(ReviewItemDto),
    ReviewCategory(ReviewCategoryDto),
    Participant(ParticipantDto),
    Role(RoleDto),
    UserEntity(UserEntityDto),
    Comment(CommentDto),
    Reply(ReplyDto),
    Feedback(FeedbackDto),
    Note(NoteDto),
    Model(ModelDto),
    BudgetTemplate(BudgetTemplateDto),
}

/// Failure to turn a JSON value into an [`EntityDto`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected a JSON object for an entity")]
    NotAnObject,

    #[error("missing or non-string `$type` discriminator")]
    MissingDiscriminator,

    #[error("unknown entity type `{0}`")]
    UnknownDiscriminator(String),

    #[error("malformed {kind} payload: {source}")]
    Payload {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
}

macro_rules! dispatch {
    ($self:expr, $dto:ident => $body:expr) => {
        match $self {
            EntityDto::Project($dto) => $body,
            EntityDto::Review($dto) => $body,
            EntityDto::ReviewObjective($dto) => $body,
            EntityDto::ReviewTask($dto) => $body,
            EntityDto::ReviewItem($dto) => $body,
            EntityDto::ReviewCategory($dto) => $body,
            EntityDto::Participant($dto) => $body,
            EntityDto::Role($dto) => $body,
            EntityDto::UserEntity($dto) => $body,
            EntityDto::Comment($dto) => $body,
            EntityDto::Reply($dto) => $body,
            EntityDto::Feedback($dto) => $body,
            EntityDto::Note($dto) => $body,
            EntityDto::Model($dto) => $body,
            EntityDto::BudgetTemplate($dto) => $body,
        }
    };
}

impl EntityDto {
    pub fn id(&self) -> EntityId {
        dispatch!(self, d => d.id)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityDto::Project(_) => EntityKind::Project,
            EntityDto::Review(_) => EntityKind::Review,
            EntityDto::ReviewObjective(_) => EntityKind::ReviewObjective,
            EntityDto::ReviewTask(_) => EntityKind::ReviewTask,
            EntityDto::ReviewItem(_) => EntityKind::ReviewItem,
            EntityDto::ReviewCategory(_) => EntityKind::ReviewCategory,
            EntityDto::Participant(_) => EntityKind::Participant,
            EntityDto::Role(_) => EntityKind::Role,
            EntityDto::UserEntity(_) => EntityKind::UserEntity,
            EntityDto::Comment(_) => EntityKind::Comment,
            EntityDto::Reply(_) => EntityKind::Reply,
            EntityDto::Feedback(_) => EntityKind::Feedback,
            EntityDto::Note(_) => EntityKind::Note,
            EntityDto::Model(_) => EntityKind::Model,
            EntityDto::BudgetTemplate(_) => EntityKind::BudgetTemplate,
        }
    }

    /// Container id declared by the DTO (always `None` for root kinds).
    pub fn container(&self) -> Option<EntityId> {
        match self {
            EntityDto::Project(_)
            | EntityDto::ReviewCategory(_)
            | EntityDto::Role(_)
            | EntityDto::UserEntity(_) => None,
            EntityDto::Review(d) => d.container,
            EntityDto::ReviewObjective(d) => d.container,
            EntityDto::ReviewTask(d) => d.container,
            EntityDto::ReviewItem(d) => d.container,
            EntityDto::Participant(d) => d.container,
            EntityDto::Comment(d) => d.container,
            EntityDto::Reply(d) => d.container,
            EntityDto::Feedback(d) => d.container,
            EntityDto::Note(d) => d.container,
            EntityDto::Model(d) => d.container,
            EntityDto::BudgetTemplate(d) => d.container,
        }
    }

    pub fn set_container(&mut self, container: Option<EntityId>) {
        match self {
            EntityDto::Project(_)
            | EntityDto::ReviewCategory(_)
            | EntityDto::Role(_)
            | EntityDto::UserEntity(_) => {}
            EntityDto::Review(d) => d.container = container,
            EntityDto::ReviewObjective(d) => d.container = container,
            EntityDto::ReviewTask(d) => d.container = container,
            EntityDto::ReviewItem(d) => d.container = container,
            EntityDto::Participant(d) => d.container = container,
            EntityDto::Comment(d) => d.container = container,
            EntityDto::Reply(d) => d.container = container,
            EntityDto::Feedback(d) => d.container = container,
            EntityDto::Note(d) => d.container = container,
            EntityDto::Model(d) => d.container = container,
            EntityDto::BudgetTemplate(d) => d.container = container,
        }
    }

    /// Ids listed in this DTO's containment lists, in list order.
    pub fn contained_ids(&self) -> Vec<EntityId> {
        match self {
            EntityDto::Project(d) => d
                .participants
                .iter()
                .chain(&d.reviews)
                .chain(&d.artifacts)
                .chain(&d.annotations)
                .copied()
                .collect(),
            EntityDto::Review(d) => d
                .review_objectives
                .iter()
                .chain(&d.review_items)
                .copied()
                .collect(),
            EntityDto::ReviewObjective(d) => d.review_tasks.clone(),
            EntityDto::Comment(d) => d.replies.clone(),
            _ => Vec::new(),
        }
    }

    /// The containment list that holds children of kind `child`, if this kind
    /// can contain it.
    pub fn containment_list_mut(&mut self, child: EntityKind) -> Option<&mut Vec<EntityId>> {
        match (self, child) {
            (EntityDto::Project(d), EntityKind::Participant) => Some(&mut d.participants),
            (EntityDto::Project(d), EntityKind::Review) => Some(&mut d.reviews),
            (EntityDto::Project(d), EntityKind::Model | EntityKind::BudgetTemplate) => {
                Some(&mut d.artifacts)
            }
            (
                EntityDto::Project(d),
                EntityKind::Comment | EntityKind::Feedback | EntityKind::Note,
            ) => Some(&mut d.annotations),
            (EntityDto::Review(d), EntityKind::ReviewObjective) => Some(&mut d.review_objectives),
            (EntityDto::Review(d), EntityKind::ReviewItem) => Some(&mut d.review_items),
            (EntityDto::ReviewObjective(d), EntityKind::ReviewTask) => Some(&mut d.review_tasks),
            (EntityDto::Comment(d), EntityKind::Reply) => Some(&mut d.replies),
            _ => None,
        }
    }

    /// Every id this DTO points at: container, single references and all
    /// collection references, in declaration order.
    pub fn referenced_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.container().into_iter().collect();
        match self {
            EntityDto::Project(d) => {
                ids.extend(self.contained_ids());
                ids.extend(&d.review_categories);
            }
            EntityDto::Review(d) => {
                ids.extend(d.author);
                ids.extend(self.contained_ids());
                ids.extend(&d.artifacts);
            }
            EntityDto::ReviewObjective(d) => {
                ids.extend(d.author);
                ids.extend(&d.review_tasks);
                ids.extend(&d.review_categories);
                ids.extend(&d.annotations);
            }
            EntityDto::ReviewTask(d) => {
                ids.extend(d.author);
                ids.extend(&d.is_assigned_to);
            }
            EntityDto::ReviewItem(d) => {
                ids.extend(&d.annotations);
                ids.extend(&d.review_categories);
                ids.extend(&d.is_reviewed_by);
            }
            EntityDto::Participant(d) => {
                ids.extend(d.user);
                ids.extend(d.role);
            }
            EntityDto::Comment(d) => {
                ids.extend(d.author);
                ids.extend(&d.annotatable_items);
                ids.extend(&d.replies);
            }
            EntityDto::Reply(d) => ids.extend(d.author),
            EntityDto::Feedback(d) => {
                ids.extend(d.author);
                ids.extend(&d.annotatable_items);
            }
            EntityDto::Note(d) => {
                ids.extend(d.author);
                ids.extend(&d.annotatable_items);
            }
            EntityDto::ReviewCategory(_)
            | EntityDto::Role(_)
            | EntityDto::UserEntity(_)
            | EntityDto::Model(_)
            | EntityDto::BudgetTemplate(_) => {}
        }
        ids
    }

    /// Decode one tagged JSON object.
    pub fn from_value(value: JsonValue) -> Result<Self, DecodeError> {
        let JsonValue::Object(mut map) = value else {
            return Err(DecodeError::NotAnObject);
        };
        let tag = match map.remove(TYPE_FIELD) {
            Some(JsonValue::String(tag)) => tag,
            _ => return Err(DecodeError::MissingDiscriminator),
        };
        let kind = EntityKind::from_discriminator(&tag)
            .ok_or(DecodeError::UnknownDiscriminator(tag))?;
        Self::decode_body(kind, JsonValue::Object(map))
    }

    fn decode_body(kind: EntityKind, body: JsonValue) -> Result<Self, DecodeError> {
        fn parse<T: serde::de::DeserializeOwned>(
            kind: EntityKind,
            body: JsonValue,
        ) -> Result<T, DecodeError> {
            serde_json::from_value(body).map_err(|source| DecodeError::Payload { kind, source })
        }

        Ok(match kind {
            EntityKind::Project => EntityDto::Project(parse(kind, body)?),
            EntityKind::Review => EntityDto::Review(parse(kind, body)?),
            EntityKind::ReviewObjective => EntityDto::ReviewObjective(parse(kind, body)?),
            EntityKind::ReviewTask => EntityDto::ReviewTask(parse(kind, body)?),
            EntityKind::ReviewItem => EntityDto::ReviewItem(parse(kind, body)?),
            EntityKind::ReviewCategory => EntityDto::ReviewCategory(parse(kind, body)?),
            EntityKind::Participant => EntityDto::Participant(parse(kind, body)?),
            EntityKind::Role => EntityDto::Role(parse(kind, body)?),
            EntityKind::UserEntity => EntityDto::UserEntity(parse(kind, body)?),
            EntityKind::Comment => EntityDto::Comment(parse(kind, body)?),
            EntityKind::Reply => EntityDto::Reply(parse(kind, body)?),
            EntityKind::Feedback => EntityDto::Feedback(parse(kind, body)?),
            EntityKind::Note => EntityDto::Note(parse(kind, body)?),
            EntityKind::Model => EntityDto::Model(parse(kind, body)?),
            EntityKind::BudgetTemplate => EntityDto::BudgetTemplate(parse(kind, body)?),
        })
    }
}

impl<'de> Deserialize<'de> for EntityDto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        EntityDto::from_value(value).map_err(serde::de::Error::custom)
    }
}

macro_rules! impl_from_dto {
    ($($variant:ident($dto:ty)),* $(,)?) => {
        $(
            impl From<$dto> for EntityDto {
                fn from(value: $dto) -> Self {
                    EntityDto::$variant(value)
                }
            }
        )*
    };
}

impl_from_dto!(
    Project(ProjectDto),
    Review(ReviewDto),
    ReviewObjective(ReviewObjectiveDto),
    ReviewTask(ReviewTaskDto),
    ReviewItem(ReviewItemDto),
    ReviewCategory(ReviewCategoryDto),
    Participant(ParticipantDto),
    Role(RoleDto),
    UserEntity(UserEntityDto),
    Comment(CommentDto),
    Reply(ReplyDto),
    Feedback(FeedbackDto),
    Note(NoteDto),
    Model(ModelDto),
    BudgetTemplate(BudgetTemplateDto),
);
