use criterion::{criterion_group, criterion_main, Criterion};
use datastruct::arena::{Arena, NodeId};

const NUM_OF_ALLOCATIONS: usize = 100;

struct Link {
    pub val: i32,
    pub next: Option<NodeId>,
}

fn bench_arena(c: &mut Criterion) {
    c.bench_function("bench arena", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let mut curr = arena.allocate(Link { val: 0, next: None });
            for _ in 0..NUM_OF_ALLOCATIONS {
                curr = arena.allocate(Link {
                    val: 0,
                    next: Some(curr),
                });
            }
            arena[curr].val
        })
    });
}

fn bench_arena_recycle(c: &mut Criterion) {
    c.bench_function("bench arena recycle", |b| {
        let mut arena = Arena::with_capacity(NUM_OF_ALLOCATIONS);
        b.iter(|| {
            let mut ids = Vec::with_capacity(NUM_OF_ALLOCATIONS);
            for _ in 0..NUM_OF_ALLOCATIONS {
                ids.push(arena.allocate(Link { val: 0, next: None }));
            }
            for id in ids {
                arena.free(id);
            }
        })
    });
}

fn bench_box(c: &mut Criterion) {
    c.bench_function("bench box", |b| {
        b.iter(|| {
            struct BoxedLink {
                pub val: i32,
                pub next: Option<Box<BoxedLink>>,
            }

            let mut curr = Box::new(BoxedLink { val: 0, next: None });
            for _ in 0..NUM_OF_ALLOCATIONS {
                curr = Box::new(BoxedLink {
                    val: 0,
                    next: Some(curr),
                });
            }
            curr.val
        })
    });
}

criterion_group!(benches, bench_arena, bench_arena_recycle, bench_box);
criterion_main!(benches);
