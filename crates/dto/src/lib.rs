//! `reviewgraph-dto`: flat, reference-by-id transfer model.
//!
//! Every relationship is an [`EntityId`](reviewgraph_core::EntityId) or a list
//! of them; resolving those ids into a graph is the assembler's job.

pub mod annotation;
pub mod artifact;
pub mod entity_dto;
pub mod enums;
pub mod participant;
pub mod response;
pub mod review;

pub use annotation::{CommentDto, FeedbackDto, NoteDto, ReplyDto};
pub use artifact::{BudgetTemplateDto, ModelDto};
pub use entity_dto::{DecodeError, EntityDto, TYPE_FIELD};
pub use enums::{AccessRight, ReviewObjectiveKind, StatusKind, View};
pub use participant::{ParticipantDto, RoleDto, UserEntityDto};
pub use response::{EntitiesRequestResponseDto, EntityRequestResponseDto};
pub use review::{
    ProjectDto, ReviewCategoryDto, ReviewDto, ReviewItemDto, ReviewObjectiveDto, ReviewTaskDto,
};
