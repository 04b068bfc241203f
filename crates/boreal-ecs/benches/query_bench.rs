use boreal_ecs::{Component, Coordinator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Debug, Clone, Copy, Default)]
struct Position(u32);
impl Component for Position {}

#[derive(Debug, Clone, Copy, Default)]
struct RenderTag;
impl Component for RenderTag {}

fn bench_queries(c: &mut Criterion) {
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    coordinator.register_component::<RenderTag>().unwrap();

    // Fill most of the fixed pool, with every other entity renderable.
    for i in 0..4_096u32 {
        let entity = coordinator.create_entity().unwrap();
        coordinator.add_component(entity, Position(i)).unwrap();
        if i % 2 == 0 {
            coordinator.add_component(entity, RenderTag).unwrap();
        }
    }

    let mut group = c.benchmark_group("ECS Queries");

    group.bench_function("Two-component scan (Position & RenderTag)", |b| {
        b.iter(|| {
            let entities = coordinator
                .entities_with::<(Position, RenderTag)>()
                .unwrap();
            black_box(entities.len());
        });
    });

    group.bench_function("Single-component scan (Position only)", |b| {
        b.iter(|| {
            let entities = coordinator.entities_with::<(Position,)>().unwrap();
            black_box(entities.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
