use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reviewgraph_core::EntityId;

/// Uploaded engineering model (an iteration of an external model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub file_name: String,
    pub model_name: String,
    pub iteration_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BudgetTemplateDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub file_name: String,
    pub budget_name: String,
}
