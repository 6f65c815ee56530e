use corelib::{Config, HashRing, Node};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn ring_with(nodes: usize) -> HashRing {
    HashRing::new(
        (0..nodes).map(|i| Node::new(format!("node{i}"))),
        Config::default(),
    )
    .unwrap()
}

fn bench_locate_key(c: &mut Criterion) {
    let ring = ring_with(16);
    c.bench_function("locate_key", |b| {
        b.iter(|| ring.locate_key(black_box("user-42")).unwrap().name.len())
    });
}

fn bench_closest_n(c: &mut Criterion) {
    let ring = ring_with(16);
    c.bench_function("closest_n_for_key/3", |b| {
        b.iter(|| ring.closest_n_for_key(black_box("user-42"), 3).unwrap().len())
    });
}

fn bench_add_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_node");
    for nodes in [4usize, 16, 64] {
        let base = ring_with(nodes);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &base, |b, base| {
            b.iter(|| {
                let mut ring = base.clone();
                ring.add_node(Node::new("joining")).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_locate_key, bench_closest_n, bench_add_node);
criterion_main!(benches);
