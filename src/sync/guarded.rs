use crate::binary_heap::IndexedHeap;
use crate::bst::BinarySearchTree;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

/// A thread-safe `IndexedHeap<T>`.
pub type SyncHeap<T> = Guarded<IndexedHeap<T>>;

/// A thread-safe `BinarySearchTree<T>`.
pub type SyncTree<T> = Guarded<BinarySearchTree<T>>;

/// A collection behind a single mutex.
///
/// Every operation holds the lock for its whole duration, including the descent and relinking
/// of a tree insert and the swap-and-bubble of a heap removal, so concurrent callers always
/// observe the collection between complete operations. Single-threaded code uses the collections
/// directly and pays no locking cost.
///
/// A panic inside a locked operation poisons the mutex, and every later operation on the same
/// `Guarded<C>` panics as well. The collection may have been left half-updated, so it is never
/// handed out again.
///
/// # Examples
///
/// ```
/// use datastruct::binary_heap::IndexedHeap;
/// use datastruct::sync::SyncHeap;
/// use std::sync::Arc;
/// use std::thread;
///
/// let heap = Arc::new(SyncHeap::new(IndexedHeap::min_heap()));
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let heap = Arc::clone(&heap);
///         thread::spawn(move || heap.insert(i))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(heap.len(), 4);
/// assert_eq!(heap.pop(), Some(0));
/// ```
pub struct Guarded<C> {
    inner: Mutex<C>,
}

impl<C> Guarded<C> {
    /// Wraps a collection.
    pub fn new(collection: C) -> Self {
        Guarded {
            inner: Mutex::new(collection),
        }
    }

    /// Runs `f` with exclusive access to the collection and returns its result. Use this to make
    /// a sequence of operations atomic.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::bst::BinarySearchTree;
    /// use datastruct::sync::SyncTree;
    ///
    /// let tree = SyncTree::new(BinarySearchTree::new());
    /// let inserted = tree.with(|tree| {
    ///     if tree.contains(&1) {
    ///         false
    ///     } else {
    ///         tree.insert(1);
    ///         true
    ///     }
    /// });
    /// assert!(inserted);
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut C) -> R,
    {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    /// Unwraps the collection.
    ///
    /// # Panics
    ///
    /// Panics if an earlier operation panicked while holding the lock.
    pub fn into_inner(self) -> C {
        self.inner
            .into_inner()
            .expect("Error: collection poisoned by a panicking operation.")
    }

    fn lock(&self) -> MutexGuard<'_, C> {
        self.inner
            .lock()
            .expect("Error: collection poisoned by a panicking operation.")
    }
}

impl<C> Default for Guarded<C>
where
    C: Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C> From<C> for Guarded<C> {
    fn from(collection: C) -> Self {
        Self::new(collection)
    }
}

impl<T> Guarded<IndexedHeap<T>>
where
    T: Ord + Hash + Clone,
{
    /// Inserts a value into the heap.
    pub fn insert(&self, value: T) {
        self.lock().insert(value)
    }

    /// Removes one copy of a value from the heap and returns it. Returns `None` if the value is
    /// not in the heap.
    pub fn remove(&self, value: &T) -> Option<T> {
        self.lock().remove(value)
    }

    /// Removes the value at a position of the backing vector and returns it. Returns `None` if
    /// the position is out of bounds.
    pub fn remove_at(&self, idx: usize) -> Option<T> {
        self.lock().remove_at(idx)
    }

    /// Removes the root of the heap and returns it. Returns `None` if the heap is empty.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop()
    }

    /// Returns a copy of the root of the heap, or `None` if the heap is empty.
    pub fn peek(&self) -> Option<T> {
        self.lock().peek().cloned()
    }

    /// Checks if a value is in the heap.
    pub fn contains(&self, value: &T) -> bool {
        self.lock().contains(value)
    }

    /// Clears the heap, removing all values.
    pub fn clear(&self) {
        self.lock().clear()
    }

    /// Returns the number of values in the heap.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<T> Guarded<BinarySearchTree<T>>
where
    T: Ord,
{
    /// Inserts a value into the tree.
    pub fn insert(&self, value: T) {
        self.lock().insert(value)
    }

    /// Checks if a value exists in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.lock().contains(value)
    }

    /// Removes one node equal to a value and returns its value. Returns `None` if no such node
    /// exists.
    pub fn remove(&self, value: &T) -> Option<T> {
        self.lock().remove(value)
    }

    /// Clears the tree, removing all values.
    pub fn clear(&self) {
        self.lock().clear()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Lets subsequent inserts descend left past equal values.
    pub fn allow_duplicates(&self) {
        self.lock().allow_duplicates()
    }

    /// Makes subsequent inserts stop at the first equal value.
    pub fn forbid_duplicates(&self) {
        self.lock().forbid_duplicates()
    }

    /// Returns `true` if inserts descend left past equal values.
    pub fn allows_duplicates(&self) -> bool {
        self.lock().allows_duplicates()
    }
}
