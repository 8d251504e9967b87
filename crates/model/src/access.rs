//! Role-based access checks for project participants.

use reviewgraph_core::{DomainError, DomainResult, Entity};
use reviewgraph_dto::AccessRight;

use crate::participant::{Participant, Role, UserEntity};

impl Participant {
    /// Whether this participant's role grants `right`. A participant without a
    /// (resolved) role is allowed nothing.
    pub fn is_allowed_to(&self, right: AccessRight, roles: &[Role]) -> bool {
        self.role
            .and_then(|role_id| roles.iter().find(|r| r.id() == role_id))
            .is_some_and(|role| role.is_allowed_to(right))
    }
}

/// Access decisions over a set of known roles and users.
///
/// Administrators bypass role checks.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy<'a> {
    roles: &'a [Role],
    users: &'a [UserEntity],
}

impl<'a> AccessPolicy<'a> {
    pub fn new(roles: &'a [Role], users: &'a [UserEntity]) -> Self {
        Self { roles, users }
    }

    pub fn is_admin(&self, participant: &Participant) -> bool {
        participant
            .user
            .and_then(|user_id| self.users.iter().find(|u| u.id() == user_id))
            .is_some_and(|u| u.is_admin)
    }

    pub fn is_allowed(&self, participant: &Participant, right: AccessRight) -> bool {
        self.is_admin(participant) || participant.is_allowed_to(right, self.roles)
    }

    pub fn ensure(&self, participant: &Participant, right: AccessRight) -> DomainResult<()> {
        if self.is_allowed(participant, right) {
            Ok(())
        } else {
            tracing::debug!(participant_id = %participant.id(), ?right, "access denied");
            Err(DomainError::validation(format!(
                "participant {} is not allowed to {}",
                participant.id(),
                right.display_name().to_lowercase()
            )))
        }
    }
}
