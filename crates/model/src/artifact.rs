//! Artifacts uploaded into a project.

use uuid::Uuid;

use reviewgraph_core::{Entity, EntityId, EntityKind};
use reviewgraph_dto::{BudgetTemplateDto, ModelDto};

use crate::node::EntityRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    id: EntityId,
    container: Option<EntityId>,
    pub file_name: String,
    pub model_name: String,
    pub iteration_id: Uuid,
}

impl Model {
    pub fn new(
        file_name: impl Into<String>,
        model_name: impl Into<String>,
        iteration_id: Uuid,
    ) -> Self {
        let mut model = Self::shell(EntityId::new());
        model.file_name = file_name.into();
        model.model_name = model_name.into();
        model.iteration_id = iteration_id;
        model
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            file_name: String::new(),
            model_name: String::new(),
            iteration_id: Uuid::nil(),
        }
    }

    pub(crate) fn apply_dto(&mut self, dto: &ModelDto) {
        self.file_name = dto.file_name.clone();
        self.model_name = dto.model_name.clone();
        self.iteration_id = dto.iteration_id;
    }

    pub fn to_dto(&self) -> ModelDto {
        ModelDto {
            id: self.id,
            container: self.container,
            file_name: self.file_name.clone(),
            model_name: self.model_name.clone(),
            iteration_id: self.iteration_id,
        }
    }
}

impl_entity!(Model, EntityKind::Model);

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTemplate {
    id: EntityId,
    container: Option<EntityId>,
    pub file_name: String,
    pub budget_name: String,
}

impl BudgetTemplate {
    pub fn new(file_name: impl Into<String>, budget_name: impl Into<String>) -> Self {
        let mut budget = Self::shell(EntityId::new());
        budget.file_name = file_name.into();
        budget.budget_name = budget_name.into();
        budget
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            file_name: String::new(),
            budget_name: String::new(),
        }
    }

    pub(crate) fn apply_dto(&mut self, dto: &BudgetTemplateDto) {
        self.file_name = dto.file_name.clone();
        self.budget_name = dto.budget_name.clone();
    }

    pub fn to_dto(&self) -> BudgetTemplateDto {
        BudgetTemplateDto {
            id: self.id,
            container: self.container,
            file_name: self.file_name.clone(),
            budget_name: self.budget_name.clone(),
        }
    }
}

impl_entity!(BudgetTemplate, EntityKind::BudgetTemplate);

/// Any artifact a project can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Model(Model),
    BudgetTemplate(BudgetTemplate),
}

impl Artifact {
    pub fn as_entity_ref(&self) -> EntityRef<'_> {
        match self {
            Artifact::Model(m) => EntityRef::Model(m),
            Artifact::BudgetTemplate(b) => EntityRef::BudgetTemplate(b),
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Artifact::Model(m) => &m.file_name,
            Artifact::BudgetTemplate(b) => &b.file_name,
        }
    }
}

impl Entity for Artifact {
    fn id(&self) -> EntityId {
        match self {
            Artifact::Model(m) => m.id(),
            Artifact::BudgetTemplate(b) => b.id(),
        }
    }

    fn kind(&self) -> EntityKind {
        match self {
            Artifact::Model(_) => EntityKind::Model,
            Artifact::BudgetTemplate(_) => EntityKind::BudgetTemplate,
        }
    }

    fn container(&self) -> Option<EntityId> {
        match self {
            Artifact::Model(m) => m.container(),
            Artifact::BudgetTemplate(b) => b.container(),
        }
    }

    fn set_container(&mut self, container: Option<EntityId>) {
        match self {
            Artifact::Model(m) => m.set_container(container),
            Artifact::BudgetTemplate(b) => b.set_container(container),
        }
    }
}
