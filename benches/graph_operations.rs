use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use graph_actor::core::config::ActorConfig;
use graph_actor::core::types::Page;
use graph_actor::storage::MemGraph;
use graph_actor::GraphActor;

fn criterion_benchmark(c: &mut Criterion) {
    let actor = GraphActor::spawn(MemGraph::new(), &ActorConfig::default()).unwrap();
    let graph = actor.handle();
    let reader = actor.reader();

    for i in 0..1_000 {
        graph.add_edge(format!("n{}", i), format!("n{}", (i * 7) % 1_000));
    }
    graph.count().blocking_wait();

    let mut next = 0u64;
    c.bench_function("queued_add_node", |b| {
        b.iter(|| {
            next += 1;
            black_box(graph.add_node(format!("bench{}", next)).blocking_wait())
        })
    });

    c.bench_function("queued_count", |b| {
        b.iter(|| black_box(graph.count().blocking_wait()))
    });

    c.bench_function("direct_count", |b| b.iter(|| black_box(reader.count())));

    c.bench_function("queued_batch_nodes", |b| {
        b.iter(|| black_box(graph.batch_get_nodes(Page::new(100, 3)).blocking_wait()))
    });

    c.bench_function("pipelined_reads_100", |b| {
        b.iter_batched(
            || (),
            |_| {
                let tasks: Vec<_> = (0..100).map(|i| graph.node(format!("n{}", i))).collect();
                for task in tasks {
                    black_box(task.blocking_wait());
                }
            },
            BatchSize::SmallInput,
        )
    });

    actor.close().unwrap();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
