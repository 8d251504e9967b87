use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use reviewgraph_assembler::assemble;
use reviewgraph_core::{EntityId, EntityKind};
use reviewgraph_dto::{
    AccessRight, BudgetTemplateDto, CommentDto, EntityDto, FeedbackDto, ModelDto, NoteDto,
    ParticipantDto, ProjectDto, ReplyDto, ReviewCategoryDto, ReviewDto, ReviewItemDto,
    ReviewObjectiveDto, ReviewObjectiveKind, ReviewTaskDto, RoleDto, StatusKind, UserEntityDto,
    View,
};
use reviewgraph_model::{
    Entity, EntityRef, Participant, Project, Review, ReviewTask, Role, UserEntity, collect_dtos,
};
use reviewgraph_serializer::{
    SerializerError, batch_from_slice, batch_from_str, batch_to_string, batch_to_vec, from_str,
    to_string,
};

fn entity_id() -> impl Strategy<Value = EntityId> {
    any::<u128>().prop_map(|n| EntityId::from_uuid(Uuid::from_u128(n)))
}

fn container() -> impl Strategy<Value = Option<EntityId>> {
    proptest::option::of(entity_id())
}

fn ids() -> impl Strategy<Value = Vec<EntityId>> {
    prop::collection::vec(entity_id(), 0..4)
}

/// Instants between 1970 and 2096, down to the nanosecond.
fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000_000_000_000).prop_map(|nanos| Utc.timestamp_nanos(nanos))
}

fn status() -> impl Strategy<Value = StatusKind> {
    prop_oneof![Just(StatusKind::Open), Just(StatusKind::Closed), Just(StatusKind::Done)]
}

fn project() -> impl Strategy<Value = EntityDto> {
    (entity_id(), ".*", timestamp(), ids(), ids(), ids(), ids(), ids()).prop_map(
        |(id, project_name, created_on, participants, reviews, artifacts, annotations, cats)| {
            ProjectDto {
                id,
                project_name,
                created_on,
                participants,
                reviews,
                artifacts,
                annotations,
                review_categories: cats,
            }
            .into()
        },
    )
}

fn review() -> impl Strategy<Value = EntityDto> {
    (
        entity_id(),
        container(),
        ".*",
        any::<u32>(),
        status(),
        timestamp(),
        container(),
        ids(),
        ids(),
        ids(),
    )
        .prop_map(
            |(id, container, title, number, status, created, author, objectives, items, arts)| {
                ReviewDto {
                    id,
                    container,
                    title,
                    description: "Mission review".to_string(),
                    review_number: number,
                    status,
                    created_on: created,
                    author,
                    review_objectives: objectives,
                    review_items: items,
                    artifacts: arts,
                }
                .into()
            },
        )
}

fn objective() -> impl Strategy<Value = EntityDto> {
    (
        entity_id(),
        container(),
        any::<bool>(),
        status(),
        timestamp(),
        ids(),
        ids(),
        ids(),
    )
        .prop_map(
            |(id, container, srr, status, created_on, review_tasks, categories, annotations)| {
                let review_objective_kind =
                    if srr { ReviewObjectiveKind::Srr } else { ReviewObjectiveKind::Prr };
                ReviewObjectiveDto {
                    id,
                    container,
                    title: "Objective".to_string(),
                    description: "Check requirements".to_string(),
                    review_objective_number: 1,
                    review_objective_kind,
                    status,
                    created_on,
                    author: None,
                    review_tasks,
                    review_categories: categories,
                    annotations,
                }
                .into()
            },
        )
}

fn task() -> impl Strategy<Value = EntityDto> {
    (
        entity_id(),
        container(),
        ".*",
        any::<u32>(),
        status(),
        timestamp(),
        container(),
        ids(),
    )
        .prop_map(
            |(id, container, title, task_number, status, created_on, author, is_assigned_to)| {
                ReviewTaskDto {
                    id,
                    container,
                    title,
                    description: String::new(),
                    task_number,
                    status,
                    created_on,
                    author,
                    is_assigned_to,
                }
                .into()
            },
        )
}

fn item() -> impl Strategy<Value = EntityDto> {
    (entity_id(), container(), any::<u128>(), ids(), ids(), ids()).prop_map(
        |(id, container, thing, annotations, review_categories, is_reviewed_by)| {
            ReviewItemDto {
                id,
                container,
                thing_id: Uuid::from_u128(thing),
                annotations,
                review_categories,
                is_reviewed_by,
            }
            .into()
        },
    )
}

fn category() -> impl Strategy<Value = EntityDto> {
    (entity_id(), ".*", ".*", "[A-Z]{0,4}", "#[0-9A-F]{6}", any::<bool>()).prop_map(
        |(id, review_category_name, description, acronym, tag_color, is_read_only)| {
            ReviewCategoryDto {
                id,
                review_category_name,
                description,
                acronym,
                tag_color,
                is_read_only,
            }
            .into()
        },
    )
}

fn participant() -> impl Strategy<Value = EntityDto> {
    (
        entity_id(),
        container(),
        container(),
        container(),
        prop::collection::vec("[A-Za-z ]{1,12}", 0..3),
    )
        .prop_map(|(id, container, user, role, domains_of_expertise)| {
            ParticipantDto {
                id,
                container,
                user,
                role,
                domains_of_expertise,
            }
            .into()
        })
}

fn role() -> impl Strategy<Value = EntityDto> {
    (entity_id(), ".*", prop::sample::subsequence(AccessRight::ALL.to_vec(), 0..=10)).prop_map(
        |(id, role_name, access_rights)| {
            RoleDto {
                id,
                role_name,
                access_rights,
            }
            .into()
        },
    )
}

fn user() -> impl Strategy<Value = EntityDto> {
    (entity_id(), "[a-z]{1,12}", any::<bool>()).prop_map(|(id, user_name, is_admin)| {
        UserEntityDto {
            id,
            user_name,
            is_admin,
        }
        .into()
    })
}

fn comment() -> impl Strategy<Value = EntityDto> {
    (
        entity_id(),
        container(),
        ".*",
        prop::sample::select(View::ALL.to_vec()),
        timestamp(),
        ids(),
        ids(),
    )
        .prop_map(|(id, container, content, view, created_on, annotatable_items, replies)| {
            CommentDto {
                id,
                container,
                content,
                status: StatusKind::Open,
                view,
                created_on,
                author: None,
                annotatable_items,
                replies,
            }
            .into()
        })
}

fn reply() -> impl Strategy<Value = EntityDto> {
    (entity_id(), container(), ".*", timestamp(), container()).prop_map(
        |(id, container, content, created_on, author)| {
            ReplyDto {
                id,
                container,
                content,
                created_on,
                author,
            }
            .into()
        },
    )
}

fn feedback_or_note() -> impl Strategy<Value = EntityDto> {
    (entity_id(), container(), ".*", timestamp(), container(), ids(), any::<bool>()).prop_map(
        |(id, container, content, created_on, author, annotatable_items, note)| {
            if note {
                NoteDto {
                    id,
                    container,
                    content,
                    created_on,
                    author,
                    annotatable_items,
                }
                .into()
            } else {
                FeedbackDto {
                    id,
                    container,
                    content,
                    created_on,
                    author,
                    annotatable_items,
                }
                .into()
            }
        },
    )
}

fn artifact() -> impl Strategy<Value = EntityDto> {
    (entity_id(), container(), "[a-z]{1,8}\\.zip", ".*", any::<u128>(), any::<bool>()).prop_map(
        |(id, container, file_name, name, iteration, budget)| {
            if budget {
                BudgetTemplateDto {
                    id,
                    container,
                    file_name,
                    budget_name: name,
                }
                .into()
            } else {
                ModelDto {
                    id,
                    container,
                    file_name,
                    model_name: name,
                    iteration_id: Uuid::from_u128(iteration),
                }
                .into()
            }
        },
    )
}

fn any_dto() -> impl Strategy<Value = EntityDto> {
    prop_oneof![
        project(),
        review(),
        objective(),
        task(),
        item(),
        category(),
        participant(),
        role(),
        user(),
        comment(),
        reply(),
        feedback_or_note(),
        artifact(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    #[test]
    fn single_entity_round_trips(dto in any_dto()) {
        let text = to_string(&dto).unwrap();
        let tag = format!(r#"{{"$type":"{}""#, dto.kind());
        prop_assert!(text.starts_with(&tag), "expected {} to open with {}", text, tag);
        prop_assert_eq!(from_str(&text).unwrap(), dto);
    }

    #[test]
    fn batch_round_trips(dtos in prop::collection::vec(any_dto(), 0..12)) {
        let bytes = batch_to_vec(&dtos).unwrap();
        prop_assert_eq!(batch_from_slice(&bytes).unwrap(), dtos);
    }
}

#[test]
fn every_kind_has_a_round_trip_strategy() {
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;
    use std::collections::HashSet;

    let strategy = any_dto();
    let mut runner = TestRunner::deterministic();
    let mut seen = HashSet::new();
    for _ in 0..2_000 {
        let dto = strategy.new_tree(&mut runner).unwrap().current();
        seen.insert(dto.kind());
    }
    assert_eq!(seen.len(), EntityKind::ALL.len());
}

#[test]
fn sub_second_timestamps_survive_the_wire() {
    let dto: EntityDto = ReplyDto {
        id: EntityId::new(),
        container: None,
        content: "Agreed".to_string(),
        created_on: Utc.timestamp_nanos(1_709_294_420_123_456_789),
        author: None,
    }
    .into();
    let text = to_string(&dto).unwrap();

    assert!(text.contains("20.123456789Z"), "{text}");
    assert_eq!(from_str(&text).unwrap(), dto);
}

#[test]
fn unknown_type_in_batch_names_tag_and_index() {
    let user = to_string(
        &UserEntityDto {
            id: EntityId::new(),
            user_name: "alice".to_string(),
            is_admin: false,
        }
        .into(),
    )
    .unwrap();
    let text = format!(r#"[{user},{{"$type":"Spaceship","Id":"{}"}}]"#, EntityId::new());

    let err = batch_from_str(&text).unwrap_err();
    assert!(err.to_string().contains("Spaceship"));
    match err {
        SerializerError::Batch { index, source } => {
            assert_eq!(index, 1);
            match *source {
                SerializerError::UnknownDiscriminator(tag) => assert_eq!(tag, "Spaceship"),
                other => panic!("Expected UnknownDiscriminator, got {other:?}"),
            }
        }
        other => panic!("Expected Batch error, got {other:?}"),
    }
}

#[test]
fn absent_references_are_null_and_empty_lists_are_arrays() {
    let dto: EntityDto = ReviewTask::shell(EntityId::new()).to_dto().into();
    let value: serde_json::Value = serde_json::from_str(&to_string(&dto).unwrap()).unwrap();

    assert_eq!(value["$type"], "ReviewTask");
    assert!(value["Container"].is_null());
    assert!(value["Author"].is_null());
    assert_eq!(value["IsAssignedTo"], serde_json::json!([]));
    assert_eq!(value["Status"], "Open");
}

#[test]
fn resolved_graph_survives_the_wire() {
    let role = Role::new("Reviewer", vec![AccessRight::ReviewTask]);
    let user = UserEntity::new("alice", false);
    let participant = Participant::new(user.id(), role.id());
    let author = participant.id();

    let mut review = Review::new("Mission review", 1, Some(author));
    review.status = StatusKind::Closed;
    let mut project = Project::new("Envision");
    project.participants_mut().add(participant).unwrap();
    project.reviews_mut().add(review).unwrap();

    let mut dtos = collect_dtos(EntityRef::Project(&project), 5);
    dtos.push(role.to_dto().into());
    dtos.push(user.to_dto().into());

    let before = assemble(&dtos, 5).unwrap();
    let text = batch_to_string(&before.to_dtos()).unwrap();
    let after = assemble(&batch_from_str(&text).unwrap(), 5).unwrap();

    assert_eq!(after, before);
    assert_eq!(after.roots_of_kind(EntityKind::Project).count(), 1);
}
