use chrono::{DateTime, Utc};

use reviewgraph_core::{EntityContainerList, EntityId, EntityKind};
use reviewgraph_dto::ProjectDto;

use crate::annotation::Annotation;
use crate::artifact::Artifact;
use crate::node::{Known, resolve_refs};
use crate::participant::Participant;
use crate::review::Review;

/// Root of a review workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    id: EntityId,
    container: Option<EntityId>,
    pub project_name: String,
    pub created_on: DateTime<Utc>,
    participants: EntityContainerList<Participant>,
    reviews: EntityContainerList<Review>,
    artifacts: EntityContainerList<Artifact>,
    annotations: EntityContainerList<Annotation>,
    /// Categories made available to this project's reviews.
    pub review_categories: Vec<EntityId>,
}

impl Project {
    pub fn new(project_name: impl Into<String>) -> Self {
        let mut project = Self::shell(EntityId::new());
        project.project_name = project_name.into();
        project.created_on = Utc::now();
        project
    }

    pub fn shell(id: EntityId) -> Self {
        Self {
            id,
            container: None,
            project_name: String::new(),
            created_on: DateTime::<Utc>::default(),
            participants: EntityContainerList::new(id),
            reviews: EntityContainerList::new(id),
            artifacts: EntityContainerList::new(id),
            annotations: EntityContainerList::new(id),
            review_categories: Vec::new(),
        }
    }

    pub fn participants(&self) -> &EntityContainerList<Participant> {
        &self.participants
    }

    pub fn participants_mut(&mut self) -> &mut EntityContainerList<Participant> {
        &mut self.participants
    }

    pub fn reviews(&self) -> &EntityContainerList<Review> {
        &self.reviews
    }

    pub fn reviews_mut(&mut self) -> &mut EntityContainerList<Review> {
        &mut self.reviews
    }

    pub fn artifacts(&self) -> &EntityContainerList<Artifact> {
        &self.artifacts
    }

    pub fn artifacts_mut(&mut self) -> &mut EntityContainerList<Artifact> {
        &mut self.artifacts
    }

    pub fn annotations(&self) -> &EntityContainerList<Annotation> {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut EntityContainerList<Annotation> {
        &mut self.annotations
    }

    /// The participant standing for `user` in this project, if any.
    pub fn participant_for_user(&self, user: EntityId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user == Some(user))
    }

    pub(crate) fn apply_dto(&mut self, dto: &ProjectDto, known: Known<'_>) {
        self.project_name = dto.project_name.clone();
        self.created_on = dto.created_on;
        resolve_refs(&mut self.review_categories, &dto.review_categories, known);
    }

    pub fn to_dto(&self) -> ProjectDto {
        ProjectDto {
            id: self.id,
            project_name: self.project_name.clone(),
            created_on: self.created_on,
            participants: self.participants.ids(),
            reviews: self.reviews.ids(),
            artifacts: self.artifacts.ids(),
            annotations: self.annotations.ids(),
            review_categories: self.review_categories.clone(),
        }
    }
}

impl_entity!(Project, EntityKind::Project);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Comment;
    use crate::artifact::Model;
    use reviewgraph_core::Entity;

    #[test]
    fn containment_lists_are_owned_by_project() {
        let mut project = Project::new("Envision");
        project
            .artifacts_mut()
            .add(Artifact::Model(Model::new("envision.zip", "Envision", uuid::Uuid::nil())))
            .unwrap();
        project
            .annotations_mut()
            .add(Annotation::Comment(Comment::new("Check the thermal budget", None)))
            .unwrap();

        assert_eq!(project.artifacts().owner(), project.id());
        assert_eq!(project.artifacts()[0].container(), Some(project.id()));
        assert_eq!(project.annotations()[0].container(), Some(project.id()));

        let dto = project.to_dto();
        assert_eq!(dto.artifacts.len(), 1);
        assert_eq!(dto.annotations.len(), 1);
    }

    #[test]
    fn participant_lookup_by_user() {
        let mut project = Project::new("Envision");
        let user = EntityId::new();
        project
            .participants_mut()
            .add(Participant::new(user, EntityId::new()))
            .unwrap();

        assert!(project.participant_for_user(user).is_some());
        assert!(project.participant_for_user(EntityId::new()).is_none());
    }
}
