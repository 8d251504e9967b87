use reviewgraph_core::EntityKind;
use reviewgraph_dto::DecodeError;
use thiserror::Error;

/// Wire (de)serialization failure.
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected a JSON object for an entity")]
    NotAnObject,

    #[error("expected a JSON array of entities")]
    NotAnArray,

    #[error("missing or non-string `$type` discriminator")]
    MissingDiscriminator,

    #[error("unknown entity type `{0}`")]
    UnknownDiscriminator(String),

    #[error("malformed {kind} payload: {source}")]
    Payload {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("entity at index {index}: {source}")]
    Batch {
        index: usize,
        #[source]
        source: Box<SerializerError>,
    },
}

impl SerializerError {
    pub(crate) fn at(index: usize, source: SerializerError) -> Self {
        Self::Batch {
            index,
            source: Box::new(source),
        }
    }

    /// Innermost error, skipping batch positions.
    pub fn root_cause(&self) -> &SerializerError {
        match self {
            Self::Batch { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<DecodeError> for SerializerError {
    fn from(value: DecodeError) -> Self {
        match value {
            DecodeError::NotAnObject => Self::NotAnObject,
            DecodeError::MissingDiscriminator => Self::MissingDiscriminator,
            DecodeError::UnknownDiscriminator(tag) => Self::UnknownDiscriminator(tag),
            DecodeError::Payload { kind, source } => Self::Payload { kind, source },
        }
    }
}

pub type SerializerResult<T> = Result<T, SerializerError>;
