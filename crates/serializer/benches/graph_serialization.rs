use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use reviewgraph_assembler::assemble;
use reviewgraph_dto::{EntityDto, ReviewObjectiveKind};
use reviewgraph_model::{
    EntityRef, Project, Review, ReviewObjective, ReviewTask, collect_dtos,
};
use reviewgraph_serializer::{batch_from_slice, batch_to_vec};

/// One project with `reviews` reviews, each holding 4 objectives of 8 tasks.
fn project_batch(reviews: u32) -> Vec<EntityDto> {
    let mut project = Project::new("Benchmark");
    for r in 0..reviews {
        let mut review = Review::new(format!("Review {r}"), r, None);
        for o in 0..4 {
            let mut objective =
                ReviewObjective::new("Objective", ReviewObjectiveKind::Prr, o, None);
            for t in 0..8 {
                let _ = objective.review_tasks_mut().add(ReviewTask::new("Task", t, None));
            }
            let _ = review.review_objectives_mut().add(objective);
        }
        let _ = project.reviews_mut().add(review);
    }
    let mut dtos = collect_dtos(EntityRef::Project(&project), u32::MAX);
    // Worst case for naive resolvers: leaves first.
    dtos.reverse();
    dtos
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for reviews in [1u32, 10, 50].iter() {
        let batch = project_batch(*reviews);
        group.throughput(Throughput::Elements(batch.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch.len()), &batch, |b, batch| {
            b.iter(|| assemble(black_box(batch), 3).unwrap());
        });
    }

    group.finish();
}

fn bench_wire(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire");
    let batch = project_batch(20);
    let bytes = batch_to_vec(&batch).unwrap();
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("batch_to_vec", |b| {
        b.iter(|| batch_to_vec(black_box(&batch)).unwrap());
    });
    group.bench_function("batch_from_slice", |b| {
        b.iter(|| batch_from_slice(black_box(&bytes)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_assemble, bench_wire);
criterion_main!(benches);
