//! Arrays of heterogeneous entities.

use std::io::{Read, Write};

use serde::Serializer as _;
use serde::ser::SerializeSeq;
use serde_json::Value as JsonValue;

use reviewgraph_dto::EntityDto;

use crate::entity::from_value;
use crate::error::{SerializerError, SerializerResult};

/// Stream `dtos` as one JSON array, element by element, then flush.
///
/// Returns the number of entities written.
pub fn batch_to_writer<'a, W, I>(writer: W, dtos: I) -> SerializerResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a EntityDto>,
{
    let mut serializer = serde_json::Serializer::new(writer);
    let mut written = 0usize;

    let mut seq = (&mut serializer).serialize_seq(None)?;
    for dto in dtos {
        seq.serialize_element(dto)?;
        written += 1;
    }
    seq.end()?;

    serializer.into_inner().flush()?;
    tracing::trace!(written, "serialized entity batch");
    Ok(written)
}

pub fn batch_to_vec<'a, I>(dtos: I) -> SerializerResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a EntityDto>,
{
    let mut out = Vec::new();
    batch_to_writer(&mut out, dtos)?;
    Ok(out)
}

pub fn batch_to_string<'a, I>(dtos: I) -> SerializerResult<String>
where
    I: IntoIterator<Item = &'a EntityDto>,
{
    let bytes = batch_to_vec(dtos)?;
    // serde_json only ever emits UTF-8.
    String::from_utf8(bytes).map_err(|e| SerializerError::Io(std::io::Error::other(e)))
}

/// Decode an array of tagged objects. The first bad element aborts the batch
/// and its position is reported.
pub fn batch_from_value(value: JsonValue) -> SerializerResult<Vec<EntityDto>> {
    let JsonValue::Array(items) = value else {
        return Err(SerializerError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| from_value(item).map_err(|e| SerializerError::at(index, e)))
        .collect()
}

pub fn batch_from_str(text: &str) -> SerializerResult<Vec<EntityDto>> {
    batch_from_value(serde_json::from_str(text)?)
}

pub fn batch_from_slice(bytes: &[u8]) -> SerializerResult<Vec<EntityDto>> {
    batch_from_value(serde_json::from_slice(bytes)?)
}

pub fn batch_from_reader<R: Read>(reader: R) -> SerializerResult<Vec<EntityDto>> {
    batch_from_value(serde_json::from_reader(reader)?)
}
