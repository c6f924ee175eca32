use datastruct::binary_heap::{HeapKind, IndexedHeap};
use rand::{Rng, SeedableRng, XorShiftRng};
use simplelog::{Config, LevelFilter, TestLogger};

fn check_heap(heap: &IndexedHeap<u32>) {
    let values = heap.as_slice();
    for i in 1..values.len() {
        let parent = &values[(i - 1) / 2];
        match heap.kind() {
            HeapKind::Min => assert!(parent <= &values[i]),
            HeapKind::Max => assert!(parent >= &values[i]),
        }
    }
    for value in values {
        let position = heap.position(value).expect("stored value has no position");
        assert_eq!(&values[position], value);
    }
    assert_eq!(values.len(), heap.len());
}

#[test]
fn test_random_operations() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);

    for kind in &[HeapKind::Min, HeapKind::Max] {
        let mut heap = IndexedHeap::new(*kind);
        let mut expected = Vec::new();

        for _ in 0..5000 {
            match rng.gen_range(0, 3) {
                0 => {
                    let value = rng.gen_range(0, 200);
                    heap.insert(value);
                    expected.push(value);
                },
                1 => {
                    let value = rng.gen_range(0, 200);
                    let removed = heap.remove(&value);
                    match expected.iter().position(|v| *v == value) {
                        Some(i) => {
                            expected.swap_remove(i);
                            assert_eq!(removed, Some(value));
                        },
                        None => assert_eq!(removed, None),
                    }
                },
                _ => {
                    let idx = rng.gen_range(0, heap.len() + 1);
                    let removed = heap.remove_at(idx);
                    if idx < expected.len() {
                        let value = removed.expect("in-bounds removal returned nothing");
                        let i = expected.iter().position(|v| *v == value).unwrap();
                        expected.swap_remove(i);
                    } else {
                        assert_eq!(removed, None);
                    }
                },
            }
            check_heap(&heap);
        }

        let mut actual: Vec<u32> = heap.iter().cloned().collect();
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_pop_yields_priority_order() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([2, 2, 2, 2]);
    let mut values: Vec<u32> = (0..1000).collect();
    rng.shuffle(&mut values);

    let mut min_heap = IndexedHeap::min_heap();
    let mut max_heap = IndexedHeap::max_heap();
    for value in &values {
        min_heap.insert(*value);
        max_heap.insert(*value);
    }

    for expected in 0..1000 {
        assert_eq!(min_heap.remove_at(0), Some(expected));
        assert_eq!(max_heap.remove_at(0), Some(999 - expected));
    }
    assert!(min_heap.is_empty());
    assert!(max_heap.is_empty());
}

#[test]
fn test_bincode_round_trip() {
    let mut heap = IndexedHeap::max_heap();
    for value in &[4, 9, 1, 7, 7, 3] {
        heap.insert(*value);
    }
    heap.remove(&9);

    let bytes = bincode::serialize(&heap).unwrap();
    let mut decoded: IndexedHeap<u32> = bincode::deserialize(&bytes).unwrap();
    check_heap(&decoded);
    assert_eq!(decoded, heap);
    assert_eq!(decoded.kind(), HeapKind::Max);
    assert_eq!(decoded.remove(&7), Some(7));
    assert_eq!(decoded.pop(), Some(7));
}
