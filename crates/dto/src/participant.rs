use serde::{Deserialize, Serialize};

use reviewgraph_core::EntityId;

use crate::enums::AccessRight;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParticipantDto {
    pub id: EntityId,
    pub container: Option<EntityId>,
    pub user: Option<EntityId>,
    pub role: Option<EntityId>,
    #[serde(default)]
    pub domains_of_expertise: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleDto {
    pub id: EntityId,
    pub role_name: String,
    #[serde(default)]
    pub access_rights: Vec<AccessRight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserEntityDto {
    pub id: EntityId,
    pub user_name: String,
    pub is_admin: bool,
}
