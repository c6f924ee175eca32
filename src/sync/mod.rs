//! Thread-safe wrappers around the single-threaded collections.

mod guarded;

pub use self::guarded::{Guarded, SyncHeap, SyncTree};
