use crate::arena::{Arena, NodeId};
use crate::bst::node::Node;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;

enum Direction {
    Left,
    Right,
    Here,
}

/// An unbalanced binary search tree whose nodes live in an arena.
///
/// Values in the left subtree of a node compare less than or equal to it and values in the
/// right subtree compare greater. When duplicates are allowed, a value equal to a node descends
/// into that node's left subtree. When duplicates are forbidden, descent stops at the first equal
/// node and the new value is hung directly below it as its left child, taking over the previous
/// left subtree. Either way every call to `insert` adds exactly one node.
///
/// # Examples
///
/// ```
/// use datastruct::bst::BinarySearchTree;
///
/// let mut tree = BinarySearchTree::new();
/// tree.insert(10);
/// tree.insert(5);
/// tree.insert(15);
///
/// assert!(tree.contains(&5));
/// assert!(!tree.contains(&20));
/// assert_eq!(tree.len(), 3);
///
/// assert_eq!(tree.remove(&10), Some(10));
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&5, &15]);
///
/// tree.clear();
/// assert!(tree.is_empty());
/// ```
pub struct BinarySearchTree<T> {
    arena: Arena<Node<T>>,
    root: Option<NodeId>,
    len: usize,
    duplicates: bool,
}

impl<T> BinarySearchTree<T> {
    /// Constructs a new, empty `BinarySearchTree<T>` that forbids duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<u32> = BinarySearchTree::new();
    /// assert!(!tree.allows_duplicates());
    /// ```
    pub fn new() -> Self {
        BinarySearchTree {
            arena: Arena::new(),
            root: None,
            len: 0,
            duplicates: false,
        }
    }

    /// Constructs a new, empty `BinarySearchTree<T>` that allows duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::with_duplicates();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn with_duplicates() -> Self {
        let mut tree = Self::new();
        tree.duplicates = true;
        tree
    }

    /// Lets subsequent inserts descend left past equal values. Nodes already in the tree are
    /// not moved.
    pub fn allow_duplicates(&mut self) {
        self.duplicates = true;
    }

    /// Makes subsequent inserts stop at the first equal value. Nodes already in the tree are not
    /// moved.
    pub fn forbid_duplicates(&mut self) {
        self.duplicates = false;
    }

    /// Returns `true` if inserts descend left past equal values.
    pub fn allows_duplicates(&self) -> bool {
        self.duplicates
    }

    /// Returns the number of values in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0 || self.root.is_none()
    }

    /// Clears the tree, removing all values. The duplicate policy is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// assert_eq!(tree.height(), 0);
    /// for value in 0..4 {
    ///     tree.insert(value);
    /// }
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.arena[id];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        height
    }

    /// Returns the minimum value of the tree. Returns `None` if the tree is empty.
    pub fn min(&self) -> Option<&T> {
        self.root.map(|mut curr| {
            while let Some(left) = self.arena[curr].left {
                curr = left;
            }
            &self.arena[curr].value
        })
    }

    /// Returns the maximum value of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.min(), Some(&1));
    /// assert_eq!(tree.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.root.map(|mut curr| {
            while let Some(right) = self.arena[curr].right {
                curr = right;
            }
            &self.arena[curr].value
        })
    }

    /// Returns an iterator over the tree. The iterator will yield values using in-order
    /// traversal, so equal values are adjacent.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> BinarySearchTreeIter<'_, T> {
        BinarySearchTreeIter {
            arena: &self.arena,
            stack: Vec::new(),
            current: self.root,
        }
    }

    // Reinserting these values keeps every value and the ordering invariant, but not
    // necessarily the shape: equal values may be relinked in a different order.
    fn pre_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            values.push(&node.value);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        values
    }
}

impl<T> BinarySearchTree<T>
where
    T: Ord,
{
    fn choose_next(&self, node: &Node<T>, value: &T) -> Direction {
        match node.value.cmp(value) {
            Ordering::Equal if self.duplicates => Direction::Left,
            Ordering::Greater => Direction::Left,
            Ordering::Less => Direction::Right,
            Ordering::Equal => Direction::Here,
        }
    }

    /// Inserts a value into the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert!(tree.contains(&1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) {
        let mut curr = match self.root {
            Some(root) => root,
            None => {
                self.root = Some(self.arena.allocate(Node::new(value)));
                self.len = 1;
                return;
            },
        };

        let direction = loop {
            let direction = self.choose_next(&self.arena[curr], &value);
            let next = match direction {
                Direction::Left => self.arena[curr].left,
                Direction::Right => self.arena[curr].right,
                Direction::Here => None,
            };
            match next {
                Some(next) => curr = next,
                None => break direction,
            }
        };

        let id = self.arena.allocate(Node::new(value));
        match direction {
            Direction::Left => self.arena[curr].left = Some(id),
            Direction::Right => self.arena[curr].right = Some(id),
            Direction::Here => {
                let left = self.arena[curr].left.take();
                self.arena[id].left = left;
                self.arena[curr].left = Some(id);
            },
        }
        self.len += 1;
    }

    /// Checks if a value exists in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Removes one node equal to a value and returns its value. Returns `None` if no such node
    /// exists.
    ///
    /// A node with two children is replaced by its in-order predecessor, the maximum of its left
    /// subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let (parent, target) = self.find_prev(value)?;
        let (left, right) = {
            let node = &self.arena[target];
            (node.left, node.right)
        };
        let replacement = match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(left), Some(right)) => Some(self.splice_predecessor(left, right)),
        };

        match parent {
            None => self.root = replacement,
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(target) {
                    node.left = replacement;
                } else {
                    node.right = replacement;
                }
            },
        }
        self.len -= 1;
        Some(self.arena.free(target).value)
    }

    fn find(&self, value: &T) -> Option<NodeId> {
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = &self.arena[id];
            if node.value == *value {
                return Some(id);
            }
            curr = self.step(node, value);
        }
        None
    }

    // Returns the first node equal to `value` together with the node visited just before it.
    fn find_prev(&self, value: &T) -> Option<(Option<NodeId>, NodeId)> {
        let mut prev = None;
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = &self.arena[id];
            if node.value == *value {
                return Some((prev, id));
            }
            prev = Some(id);
            curr = self.step(node, value);
        }
        None
    }

    fn step(&self, node: &Node<T>, value: &T) -> Option<NodeId> {
        match self.choose_next(node, value) {
            Direction::Left => node.left,
            Direction::Right => node.right,
            Direction::Here => None,
        }
    }

    // Detaches the maximum of the subtree rooted at `left` and gives it both subtrees of the
    // node being removed. Returns the detached node.
    fn splice_predecessor(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let mut parent = None;
        let mut curr = left;
        while let Some(next) = self.arena[curr].right {
            parent = Some(curr);
            curr = next;
        }
        debug!("replacing removed node by its in-order predecessor");

        if let Some(parent) = parent {
            let orphan = self.arena[curr].left;
            self.arena[parent].right = orphan;
            self.arena[curr].left = Some(left);
        }
        self.arena[curr].right = Some(right);
        curr
    }
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type IntoIter = BinarySearchTreeIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `BinarySearchTree<T>`.
///
/// This iterator traverses the elements of the tree in-order and yields immutable references.
pub struct BinarySearchTreeIter<'a, T: 'a> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for BinarySearchTreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = arena[id].left;
        }
        self.stack.pop().map(|id| {
            let node = &arena[id];
            self.current = node.right;
            &node.value
        })
    }
}

#[derive(Serialize)]
#[serde(rename = "BinarySearchTree")]
struct TreeRef<'a, T: 'a> {
    duplicates: bool,
    values: Vec<&'a T>,
}

#[derive(Deserialize)]
#[serde(rename = "BinarySearchTree")]
struct TreeOwned<T> {
    duplicates: bool,
    values: Vec<T>,
}

impl<T> Serialize for BinarySearchTree<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        TreeRef {
            duplicates: self.duplicates,
            values: self.pre_order(),
        }
        .serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for BinarySearchTree<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let TreeOwned { duplicates, values } = TreeOwned::deserialize(deserializer)?;
        let mut tree = BinarySearchTree::new();
        tree.duplicates = duplicates;
        for value in values {
            tree.insert(value);
        }
        Ok(tree)
    }
}
