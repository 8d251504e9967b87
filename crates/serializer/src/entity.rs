//! Single-entity encode/decode.

use std::io::{Read, Write};

use serde_json::Value as JsonValue;

use reviewgraph_dto::EntityDto;

use crate::error::SerializerResult;

/// Write one entity as a tagged JSON object.
pub fn to_writer<W: Write>(writer: W, dto: &EntityDto) -> SerializerResult<()> {
    serde_json::to_writer(writer, dto)?;
    Ok(())
}

pub fn to_string(dto: &EntityDto) -> SerializerResult<String> {
    Ok(serde_json::to_string(dto)?)
}

pub fn to_vec(dto: &EntityDto) -> SerializerResult<Vec<u8>> {
    Ok(serde_json::to_vec(dto)?)
}

pub fn from_value(value: JsonValue) -> SerializerResult<EntityDto> {
    Ok(EntityDto::from_value(value)?)
}

/// Decode one entity, dispatching on its `$type`.
pub fn from_str(text: &str) -> SerializerResult<EntityDto> {
    from_value(serde_json::from_str(text)?)
}

pub fn from_slice(bytes: &[u8]) -> SerializerResult<EntityDto> {
    from_value(serde_json::from_slice(bytes)?)
}

pub fn from_reader<R: Read>(reader: R) -> SerializerResult<EntityDto> {
    from_value(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SerializerError;
    use reviewgraph_core::{EntityId, EntityKind};
    use reviewgraph_dto::{AccessRight, RoleDto, UserEntityDto};

    fn role() -> EntityDto {
        RoleDto {
            id: EntityId::new(),
            role_name: "Reviewer".to_string(),
            access_rights: vec![AccessRight::ReviewTask, AccessRight::CreateComment],
        }
        .into()
    }

    #[test]
    fn role_wire_shape() {
        let dto = role();
        let value: JsonValue = serde_json::from_str(&to_string(&dto).unwrap()).unwrap();
        assert_eq!(value["$type"], "Role");
        assert_eq!(value["Id"], dto.id().to_string());
        assert_eq!(value["RoleName"], "Reviewer");
        assert_eq!(value["AccessRights"], serde_json::json!(["ReviewTask", "CreateComment"]));
    }

    #[test]
    fn bytes_and_reader_agree() {
        let dto = role();
        let bytes = to_vec(&dto).unwrap();
        assert_eq!(from_slice(&bytes).unwrap(), dto);
        assert_eq!(from_reader(bytes.as_slice()).unwrap(), dto);
    }

    #[test]
    fn writer_receives_the_object() {
        let dto = role();
        let mut out = Vec::new();
        to_writer(&mut out, &dto).unwrap();
        assert_eq!(out, to_vec(&dto).unwrap());
    }

    #[test]
    fn missing_discriminator() {
        let err = from_str(r#"{"Id":"0190a1c2-0000-7000-8000-000000000001","UserName":"x"}"#)
            .unwrap_err();
        assert!(matches!(err, SerializerError::MissingDiscriminator));
    }

    #[test]
    fn malformed_payload_names_kind() {
        let err = from_str(r#"{"$type":"UserEntity","Id":"not-a-guid"}"#).unwrap_err();
        match err {
            SerializerError::Payload { kind, .. } => assert_eq!(kind, EntityKind::UserEntity),
            other => panic!("Expected Payload error, got {other:?}"),
        }
    }

    #[test]
    fn tag_position_does_not_matter() {
        let id = EntityId::new();
        let text =
            format!(r#"{{"Id":"{id}","UserName":"alice","IsAdmin":true,"$type":"UserEntity"}}"#);
        let expected: EntityDto = UserEntityDto {
            id,
            user_name: "alice".to_string(),
            is_admin: true,
        }
        .into();
        assert_eq!(from_str(&text).unwrap(), expected);
    }

    #[test]
    fn syntax_error_is_json_error() {
        assert!(matches!(from_str("{").unwrap_err(), SerializerError::Json(_)));
    }
}
