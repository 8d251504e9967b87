//! Users, roles and project participants.

use reviewgraph_core::{EntityId, EntityKind};
use reviewgraph_dto::{AccessRight, ParticipantDto, RoleDto, UserEntityDto};

use crate::node::{Known, resolve_ref};

/// A user taking part in one project, with a role.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    id: EntityId,
    container: Option<EntityId>,
    pub user: Option<EntityId>,
    pub role: Option<EntityId>,
    pub domains_of_expertise: Vec<String>,
}

impl Participant {
    pub fn new(user: EntityId, role: EntityId) -> Self {
        let mut participant = Self::shell(EntityId::new());
        participant.user = Some(user);
        participant.role = Some(role);
        participant
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            user: None,
            role: None,
            domains_of_expertise: Vec::new(),
        }
    }

    pub(crate) fn apply_dto(&mut self, dto: &ParticipantDto, known: Known<'_>) {
        self.user = resolve_ref(dto.user, known);
        self.role = resolve_ref(dto.role, known);
        self.domains_of_expertise = dto.domains_of_expertise.clone();
    }

    pub fn to_dto(&self) -> ParticipantDto {
        ParticipantDto {
            id: self.id,
            container: self.container,
            user: self.user,
            role: self.role,
            domains_of_expertise: self.domains_of_expertise.clone(),
        }
    }
}

impl_entity!(Participant, EntityKind::Participant);

/// Named set of access rights.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    id: EntityId,
    container: Option<EntityId>,
    pub role_name: String,
    pub access_rights: Vec<AccessRight>,
}

impl Role {
    pub fn new(role_name: impl Into<String>, access_rights: Vec<AccessRight>) -> Self {
        let mut role = Self::shell(EntityId::new());
        role.role_name = role_name.into();
        role.access_rights = access_rights;
        role
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            role_name: String::new(),
            access_rights: Vec::new(),
        }
    }

    pub fn is_allowed_to(&self, right: AccessRight) -> bool {
        self.access_rights.contains(&right)
    }

    pub(crate) fn apply_dto(&mut self, dto: &RoleDto) {
        self.role_name = dto.role_name.clone();
        self.access_rights = dto.access_rights.clone();
    }

    pub fn to_dto(&self) -> RoleDto {
        RoleDto {
            id: self.id,
            role_name: self.role_name.clone(),
            access_rights: self.access_rights.clone(),
        }
    }
}

impl_entity!(Role, EntityKind::Role);

#[derive(Debug, Clone, PartialEq)]
pub struct UserEntity {
    id: EntityId,
    container: Option<EntityId>,
    pub user_name: String,
    pub is_admin: bool,
}

impl UserEntity {
    pub fn new(user_name: impl Into<String>, is_admin: bool) -> Self {
        let mut user = Self::shell(EntityId::new());
        user.user_name = user_name.into();
        user.is_admin = is_admin;
        user
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            user_name: String::new(),
            is_admin: false,
        }
    }

    pub(crate) fn apply_dto(&mut self, dto: &UserEntityDto) {
        self.user_name = dto.user_name.clone();
        self.is_admin = dto.is_admin;
    }

    pub fn to_dto(&self) -> UserEntityDto {
        UserEntityDto {
            id: self.id,
            user_name: self.user_name.clone(),
            is_admin: self.is_admin,
        }
    }
}

impl_entity!(UserEntity, EntityKind::UserEntity);
