//! Annotation DTOs (comments, feedback, notes) and replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reviewgraph_core::EntityId;

use crate::enums::{StatusKind, View};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub content: String,
    pub status: StatusKind,
    pub view: View,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    #[serde(default)]
    pub annotatable_items: Vec<EntityId>,
    #[serde(default)]
    pub replies: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReplyDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeedbackDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    #[serde(default)]
    pub annotatable_items: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoteDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    #[serde(default)]
    pub annotatable_items: Vec<EntityId>,
}
