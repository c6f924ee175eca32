use crate::arena::NodeId;

/// A struct representing an internal node of a binary search tree. Children are owned
/// exclusively by their parent and addressed through the tree's arena.
pub struct Node<T> {
    pub value: T,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }
}
