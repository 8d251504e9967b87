//! Uniform success/failure outcome of entity operations.

use core::fmt::Display;

/// Message recorded when a failure is reported without one.
pub const UNSPECIFIED_FAILURE: &str = "operation failed";

/// Persistence change-tracking state of an entity after an operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntryState {
    Detached,
    Unchanged,
    Deleted,
    Modified,
    Added,
}

/// Handle onto a change-tracked entity, as handed back by a transactional
/// persistence layer.
pub trait TrackedEntry<T> {
    fn state(&self) -> EntryState;

    fn entity(&self) -> T;
}

/// Outcome of a create/update/delete (or a read-only computation).
///
/// Either succeeded with one or more entities, or failed with a non-empty list
/// of human-readable errors. Once failed, a result never becomes successful
/// again: no method sets `succeeded` back to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOperationResult<T> {
    succeeded: bool,
    entities: Vec<T>,
    errors: Vec<String>,
}

impl<T> EntityOperationResult<T> {
    pub fn success(entity: T) -> Self {
        Self {
            succeeded: true,
            entities: vec![entity],
            errors: Vec::new(),
        }
    }

    pub fn all_success(entities: impl IntoIterator<Item = T>) -> Self {
        Self {
            succeeded: true,
            entities: entities.into_iter().collect(),
            errors: Vec::new(),
        }
    }

    pub fn failed<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors: Vec<String> = errors.into_iter().map(Into::into).collect();
        if errors.is_empty() {
            errors.push(UNSPECIFIED_FAILURE.to_string());
        }
        Self {
            succeeded: false,
            entities: Vec::new(),
            errors,
        }
    }

    /// Build from a change-tracked entry: succeeded iff the entry ended in one of
    /// the `expected` states.
    pub fn from_entry(entry: &impl TrackedEntry<T>, expected: &[EntryState]) -> Self {
        let state = entry.state();
        if expected.contains(&state) {
            Self::success(entry.entity())
        } else {
            Self::failed([format!(
                "unexpected entity state {state:?} (expected one of {expected:?})"
            )])
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// First entity of a successful result.
    pub fn entity(&self) -> Option<&T> {
        self.entities.first()
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_entity(self) -> Option<T> {
        self.entities.into_iter().next()
    }

    pub fn into_parts(self) -> (bool, Vec<T>, Vec<String>) {
        (self.succeeded, self.entities, self.errors)
    }

    /// Downgrade to failed and record the error's message.
    pub fn handle_exception(&mut self, err: &dyn Display) {
        self.add_error(err.to_string());
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.succeeded = false;
        self.entities.clear();
        self.errors.push(error.into());
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> EntityOperationResult<U> {
        EntityOperationResult {
            succeeded: self.succeeded,
            entities: self.entities.into_iter().map(f).collect(),
            errors: self.errors,
        }
    }
}
