//! An indexed binary heap and an unbalanced binary search tree.
//!
//! Both collections are single-threaded; wrap them in `sync::Guarded` to share them between
//! threads.

#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
pub mod binary_heap;
pub mod bst;
pub mod sync;
