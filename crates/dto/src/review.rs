//! Review-side DTOs: project, review, objectives, tasks, items, categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reviewgraph_core::EntityId;

use crate::enums::{ReviewObjectiveKind, StatusKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectDto {
    pub id: EntityId,
    pub project_name: String,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub participants: Vec<EntityId>,
    #[serde(default)]
    pub reviews: Vec<EntityId>,
    #[serde(default)]
    pub artifacts: Vec<EntityId>,
    #[serde(default)]
    pub annotations: Vec<EntityId>,
    #[serde(default)]
    pub review_categories: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub review_number: u32,
    pub status: StatusKind,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    #[serde(default)]
    pub review_objectives: Vec<EntityId>,
    #[serde(default)]
    pub review_items: Vec<EntityId>,
    #[serde(default)]
    pub artifacts: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewObjectiveDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub review_objective_number: u32,
    pub review_objective_kind: ReviewObjectiveKind,
    pub status: StatusKind,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    #[serde(default)]
    pub review_tasks: Vec<EntityId>,
    #[serde(default)]
    pub review_categories: Vec<EntityId>,
    #[serde(default)]
    pub annotations: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewTaskDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub task_number: u32,
    pub status: StatusKind,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    #[serde(default)]
    pub is_assigned_to: Vec<EntityId>,
}

/// A reviewed element of the engineering model (`thing_id` points into the
/// external model, not into this graph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewItemDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub thing_id: Uuid,
    #[serde(default)]
    pub annotations: Vec<EntityId>,
    #[serde(default)]
    pub review_categories: Vec<EntityId>,
    #[serde(default)]
    pub is_reviewed_by: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewCategoryDto {
    pub id: EntityId,
    pub review_category_name: String,
    pub description: String,
    pub acronym: String,
    pub tag_color: String,
    pub is_read_only: bool,
}
