//! Array-backed binary heap with constant-time membership lookup and removal of arbitrary
//! elements.

mod heap;
mod index_table;

pub use self::heap::{HeapKind, IndexedHeap};
