//! Request/response envelopes.

use reviewgraph_dto::{EntitiesRequestResponseDto, EntityRequestResponseDto};

use crate::error::SerializerResult;

pub fn response_to_string(response: &EntityRequestResponseDto) -> SerializerResult<String> {
    Ok(serde_json::to_string(response)?)
}

pub fn response_from_str(text: &str) -> SerializerResult<EntityRequestResponseDto> {
    Ok(serde_json::from_str(text)?)
}

pub fn list_response_to_string(response: &EntitiesRequestResponseDto) -> SerializerResult<String> {
    Ok(serde_json::to_string(response)?)
}

pub fn list_response_from_str(text: &str) -> SerializerResult<EntitiesRequestResponseDto> {
    Ok(serde_json::from_str(text)?)
}
