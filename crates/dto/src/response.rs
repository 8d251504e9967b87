//! Request/response envelopes crossing the wire boundary.

use serde::{Deserialize, Serialize};

use reviewgraph_core::EntityOperationResult;

use crate::entity_dto::EntityDto;

/// Outcome of a single-entity request: `{"IsRequestSuccessful", "Entity", "Errors"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityRequestResponseDto {
    pub is_request_successful: bool,
    pub entity: Option<EntityDto>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// List variant of [`EntityRequestResponseDto`], carrying `"Entities"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntitiesRequestResponseDto {
    pub is_request_successful: bool,
    #[serde(default)]
    pub entities: Vec<EntityDto>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl EntityRequestResponseDto {
    pub fn success(entity: EntityDto) -> Self {
        Self {
            is_request_successful: true,
            entity: Some(entity),
            errors: Vec::new(),
        }
    }

    pub fn failed<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from(EntityOperationResult::failed(errors))
    }

    /// Back to an operation result on the receiving side.
    pub fn into_result(self) -> EntityOperationResult<EntityDto> {
        match (self.is_request_successful, self.entity) {
            (true, Some(entity)) => EntityOperationResult::success(entity),
            (true, None) => EntityOperationResult::all_success(Vec::new()),
            (false, _) => EntityOperationResult::failed(self.errors),
        }
    }
}

impl EntitiesRequestResponseDto {
    pub fn success(entities: Vec<EntityDto>) -> Self {
        Self {
            is_request_successful: true,
            entities,
            errors: Vec::new(),
        }
    }

    pub fn failed<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from(EntityOperationResult::failed(errors))
    }

    pub fn into_result(self) -> EntityOperationResult<EntityDto> {
        if self.is_request_successful {
            EntityOperationResult::all_success(self.entities)
        } else {
            EntityOperationResult::failed(self.errors)
        }
    }
}

impl From<EntityOperationResult<EntityDto>> for EntityRequestResponseDto {
    fn from(result: EntityOperationResult<EntityDto>) -> Self {
        let (succeeded, entities, errors) = result.into_parts();
        Self {
            is_request_successful: succeeded,
            entity: if succeeded { entities.into_iter().next() } else { None },
            errors,
        }
    }
}

impl From<EntityOperationResult<EntityDto>> for EntitiesRequestResponseDto {
    fn from(result: EntityOperationResult<EntityDto>) -> Self {
        let (succeeded, entities, errors) = result.into_parts();
        Self {
            is_request_successful: succeeded,
            entities: if succeeded { entities } else { Vec::new() },
            errors,
        }
    }
}
