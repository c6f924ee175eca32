//! Unbalanced binary search tree with a configurable policy for equal values.
//!
//! The tree performs no rotations, so its shape depends on insertion order and a sorted input
//! degrades it into a linked list.

mod node;
mod tree;

pub use self::tree::{BinarySearchTree, BinarySearchTreeIter};
