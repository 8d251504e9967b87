//! `reviewgraph-serializer`: JSON wire format for entity DTOs.
//!
//! Every entity travels as one object whose `$type` field names its concrete
//! kind; the remaining fields are the kind's own, in PascalCase. Decoding reads
//! `$type` first and dispatches to the matching parser, so the position of the
//! tag inside the object does not matter.

pub mod batch;
pub mod entity;
pub mod envelope;
pub mod error;

pub use batch::{
    batch_from_reader, batch_from_slice, batch_from_str, batch_from_value, batch_to_string,
    batch_to_vec, batch_to_writer,
};
pub use entity::{from_reader, from_slice, from_str, from_value, to_string, to_vec, to_writer};
pub use envelope::{
    list_response_from_str, list_response_to_string, response_from_str, response_to_string,
};
pub use error::{SerializerError, SerializerResult};
