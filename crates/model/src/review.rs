//! Reviews and what they contain.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use reviewgraph_core::{EntityContainerList, EntityId, EntityKind};
use reviewgraph_dto::{
    ReviewCategoryDto, ReviewDto, ReviewItemDto, ReviewObjectiveDto, ReviewObjectiveKind,
    ReviewTaskDto, StatusKind,
};

use crate::node::{Known, resolve_ref, resolve_refs};

/// A review campaign inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    id: EntityId,
    container: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub review_number: u32,
    pub status: StatusKind,
    pub created_on: DateTime<Utc>,
    /// Participant who opened the review.
    pub author: Option<EntityId>,
    review_objectives: EntityContainerList<ReviewObjective>,
    review_items: EntityContainerList<ReviewItem>,
    /// Artifacts (models, budgets) under review.
    pub artifacts: Vec<EntityId>,
}

impl Review {
    pub fn new(title: impl Into<String>, review_number: u32, author: Option<EntityId>) -> Self {
        let mut review = Self::shell(EntityId::new());
        review.title = title.into();
        review.review_number = review_number;
        review.author = author;
        review.created_on = Utc::now();
        review
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            title: String::new(),
            description: String::new(),
            review_number: 0,
            status: StatusKind::Open,
            created_on: DateTime::<Utc>::default(),
            author: None,
            review_objectives: EntityContainerList::new(id),
            review_items: EntityContainerList::new(id),
            artifacts: Vec::new(),
        }
    }

    pub fn review_objectives(&self) -> &EntityContainerList<ReviewObjective> {
        &self.review_objectives
    }

    pub fn review_objectives_mut(&mut self) -> &mut EntityContainerList<ReviewObjective> {
        &mut self.review_objectives
    }

    pub fn review_items(&self) -> &EntityContainerList<ReviewItem> {
        &self.review_items
    }

    pub fn review_items_mut(&mut self) -> &mut EntityContainerList<ReviewItem> {
        &mut self.review_items
    }

    pub(crate) fn apply_dto(&mut self, dto: &ReviewDto, known: Known<'_>) {
        self.title = dto.title.clone();
        self.description = dto.description.clone();
        self.review_number = dto.review_number;
        self.status = dto.status;
        self.created_on = dto.created_on;
        self.author = resolve_ref(dto.author, known);
        resolve_refs(&mut self.artifacts, &dto.artifacts, known);
    }

    pub fn to_dto(&self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            container: self.container,
            title: self.title.clone(),
            description: self.description.clone(),
            review_number: self.review_number,
            status: self.status,
            created_on: self.created_on,
            author: self.author,
            review_objectives: self.review_objectives.ids(),
            review_items: self.review_items.ids(),
            artifacts: self.artifacts.clone(),
        }
    }
}

impl_entity!(Review, EntityKind::Review);

/// Objective of a review (e.g. a PRR checklist item).
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewObjective {
    id: EntityId,
    container: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub review_objective_number: u32,
    pub review_objective_kind: ReviewObjectiveKind,
    pub status: StatusKind,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    review_tasks: EntityContainerList<ReviewTask>,
    pub review_categories: Vec<EntityId>,
    pub annotations: Vec<EntityId>,
}

impl ReviewObjective {
    pub fn new(
        title: impl Into<String>,
        kind: ReviewObjectiveKind,
        number: u32,
        author: Option<EntityId>,
    ) -> Self {
        let mut objective = Self::shell(EntityId::new());
        objective.title = title.into();
        objective.review_objective_kind = kind;
        objective.review_objective_number = number;
        objective.author = author;
        objective.created_on = Utc::now();
        objective
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            title: String::new(),
            description: String::new(),
            review_objective_number: 0,
            review_objective_kind: ReviewObjectiveKind::default(),
            status: StatusKind::Open,
            created_on: DateTime::<Utc>::default(),
            author: None,
            review_tasks: EntityContainerList::new(id),
            review_categories: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn review_tasks(&self) -> &EntityContainerList<ReviewTask> {
        &self.review_tasks
    }

    pub fn review_tasks_mut(&mut self) -> &mut EntityContainerList<ReviewTask> {
        &mut self.review_tasks
    }

    pub(crate) fn apply_dto(&mut self, dto: &ReviewObjectiveDto, known: Known<'_>) {
        self.title = dto.title.clone();
        self.description = dto.description.clone();
        self.review_objective_number = dto.review_objective_number;
        self.review_objective_kind = dto.review_objective_kind;
        self.status = dto.status;
        self.created_on = dto.created_on;
        self.author = resolve_ref(dto.author, known);
        resolve_refs(&mut self.review_categories, &dto.review_categories, known);
        resolve_refs(&mut self.annotations, &dto.annotations, known);
    }

    pub fn to_dto(&self) -> ReviewObjectiveDto {
        ReviewObjectiveDto {
            id: self.id,
            container: self.container,
            title: self.title.clone(),
            description: self.description.clone(),
            review_objective_number: self.review_objective_number,
            review_objective_kind: self.review_objective_kind,
            status: self.status,
            created_on: self.created_on,
            author: self.author,
            review_tasks: self.review_tasks.ids(),
            review_categories: self.review_categories.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

impl_entity!(ReviewObjective, EntityKind::ReviewObjective);

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewTask {
    id: EntityId,
    container: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub task_number: u32,
    pub status: StatusKind,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityId>,
    /// Participants the task is assigned to.
    pub is_assigned_to: Vec<EntityId>,
}

impl ReviewTask {
    pub fn new(title: impl Into<String>, task_number: u32, author: Option<EntityId>) -> Self {
        let mut task = Self::shell(EntityId::new());
        task.title = title.into();
        task.task_number = task_number;
        task.author = author;
        task.created_on = Utc::now();
        task
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            title: String::new(),
            description: String::new(),
            task_number: 0,
            status: StatusKind::Open,
            created_on: DateTime::<Utc>::default(),
            author: None,
            is_assigned_to: Vec::new(),
        }
    }

    pub fn is_assigned(&self, participant: EntityId) -> bool {
        self.is_assigned_to.contains(&participant)
    }

    pub(crate) fn apply_dto(&mut self, dto: &ReviewTaskDto, known: Known<'_>) {
        self.title = dto.title.clone();
        self.description = dto.description.clone();
        self.task_number = dto.task_number;
        self.status = dto.status;
        self.created_on = dto.created_on;
        self.author = resolve_ref(dto.author, known);
        resolve_refs(&mut self.is_assigned_to, &dto.is_assigned_to, known);
    }

    pub fn to_dto(&self) -> ReviewTaskDto {
        ReviewTaskDto {
            id: self.id,
            container: self.container,
            title: self.title.clone(),
            description: self.description.clone(),
            task_number: self.task_number,
            status: self.status,
            created_on: self.created_on,
            author: self.author,
            is_assigned_to: self.is_assigned_to.clone(),
        }
    }
}

impl_entity!(ReviewTask, EntityKind::ReviewTask);

/// Review bookkeeping for one element of the external model.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    id: EntityId,
    container: Option<EntityId>,
    pub thing_id: Uuid,
    pub annotations: Vec<EntityId>,
    pub review_categories: Vec<EntityId>,
    pub is_reviewed_by: Vec<EntityId>,
}

impl ReviewItem {
    pub fn new(thing_id: Uuid) -> Self {
        let mut item = Self::shell(EntityId::new());
        item.thing_id = thing_id;
        item
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            thing_id: Uuid::nil(),
            annotations: Vec::new(),
            review_categories: Vec::new(),
            is_reviewed_by: Vec::new(),
        }
    }

    pub(crate) fn apply_dto(&mut self, dto: &ReviewItemDto, known: Known<'_>) {
        self.thing_id = dto.thing_id;
        resolve_refs(&mut self.annotations, &dto.annotations, known);
        resolve_refs(&mut self.review_categories, &dto.review_categories, known);
        resolve_refs(&mut self.is_reviewed_by, &dto.is_reviewed_by, known);
    }

    pub fn to_dto(&self) -> ReviewItemDto {
        ReviewItemDto {
            id: self.id,
            container: self.container,
            thing_id: self.thing_id,
            annotations: self.annotations.clone(),
            review_categories: self.review_categories.clone(),
            is_reviewed_by: self.is_reviewed_by.clone(),
        }
    }
}

impl_entity!(ReviewItem, EntityKind::ReviewItem);

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCategory {
    id: EntityId,
    container: Option<EntityId>,
    pub review_category_name: String,
    pub description: String,
    pub acronym: String,
    /// Hex color used to tag items, e.g. `#8ABD3E`.
    pub tag_color: String,
    pub is_read_only: bool,
}

impl ReviewCategory {
    pub fn new(name: impl Into<String>, acronym: impl Into<String>) -> Self {
        let mut category = Self::shell(EntityId::new());
        category.review_category_name = name.into();
        category.acronym = acronym.into();
        category
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            review_category_name: String::new(),
            description: String::new(),
            acronym: String::new(),
            tag_color: String::new(),
            is_read_only: false,
        }
    }

    pub(crate) fn apply_dto(&mut self, dto: &ReviewCategoryDto) {
        self.review_category_name = dto.review_category_name.clone();
        self.description = dto.description.clone();
        self.acronym = dto.acronym.clone();
        self.tag_color = dto.tag_color.clone();
        self.is_read_only = dto.is_read_only;
    }

    pub fn to_dto(&self) -> ReviewCategoryDto {
        ReviewCategoryDto {
            id: self.id,
            review_category_name: self.review_category_name.clone(),
            description: self.description.clone(),
            acronym: self.acronym.clone(),
            tag_color: self.tag_color.clone(),
            is_read_only: self.is_read_only,
        }
    }
}

impl_entity!(ReviewCategory, EntityKind::ReviewCategory);

#[cfg(test)]
mod tests {
    use super::*;
    use reviewgraph_core::Entity;

    #[test]
    fn objective_owns_its_tasks() {
        let mut objective =
            ReviewObjective::new("Check budgets", ReviewObjectiveKind::Srr, 1, None);
        let task = ReviewTask::new("Mass budget", 1, None);
        let task_id = task.id();
        objective.review_tasks_mut().add(task).unwrap();

        assert_eq!(objective.review_tasks()[0].container(), Some(objective.id()));
        assert_eq!(objective.to_dto().review_tasks, vec![task_id]);
    }

    #[test]
    fn review_dto_lists_children_in_order() {
        let mut review = Review::new("CDR", 3, None);
        let first = ReviewObjective::new("A", ReviewObjectiveKind::Prr, 1, None);
        let second = ReviewObjective::new("B", ReviewObjectiveKind::Prr, 2, None);
        let ids = vec![first.id(), second.id()];
        review.review_objectives_mut().add_range(vec![first, second]).unwrap();

        let dto = review.to_dto();
        assert_eq!(dto.review_objectives, ids);
        assert_eq!(dto.container, None);
        assert_eq!(dto.review_number, 3);
    }
}
