use crate::binary_heap::index_table::IndexTable;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::hash::Hash;
use std::slice;

/// The order relation a heap maintains between a parent and its children.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum HeapKind {
    /// Every parent is less than or equal to its children; the root is the minimum.
    Min,
    /// Every parent is greater than or equal to its children; the root is the maximum.
    Max,
}

/// A binary heap that can remove arbitrary elements.
///
/// Alongside the backing vector, the heap keeps an index table from each value to its current
/// positions, so locating a value for removal costs an expected constant-time lookup instead of
/// a linear scan. Every move of an element updates the table in the same step. Equal values may
/// be inserted more than once; each copy is tracked separately.
///
/// # Examples
///
/// ```
/// use datastruct::binary_heap::IndexedHeap;
///
/// let mut heap = IndexedHeap::min_heap();
/// heap.insert(5);
/// heap.insert(3);
/// heap.insert(8);
/// heap.insert(1);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.remove(&3), Some(3));
/// assert_eq!(heap.remove(&3), None);
///
/// assert_eq!(heap.remove_at(0), Some(1));
/// assert_eq!(heap.pop(), Some(5));
/// assert_eq!(heap.pop(), Some(8));
/// assert_eq!(heap.pop(), None);
/// ```
#[derive(Clone, Debug)]
pub struct IndexedHeap<T> {
    arr: Vec<T>,
    index: IndexTable<T>,
    kind: HeapKind,
}

impl<T> IndexedHeap<T>
where
    T: Ord + Hash + Clone,
{
    /// Constructs a new, empty `IndexedHeap<T>` of the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::{HeapKind, IndexedHeap};
    ///
    /// let heap: IndexedHeap<u32> = IndexedHeap::new(HeapKind::Max);
    /// ```
    pub fn new(kind: HeapKind) -> Self {
        Self::with_capacity(kind, 0)
    }

    /// Constructs a new, empty min-heap.
    pub fn min_heap() -> Self {
        Self::new(HeapKind::Min)
    }

    /// Constructs a new, empty max-heap.
    pub fn max_heap() -> Self {
        Self::new(HeapKind::Max)
    }

    /// Constructs a new, empty `IndexedHeap<T>` with room for `capacity` elements before
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::{HeapKind, IndexedHeap};
    ///
    /// let heap: IndexedHeap<u32> = IndexedHeap::with_capacity(HeapKind::Min, 64);
    /// assert!(heap.is_empty());
    /// ```
    pub fn with_capacity(kind: HeapKind, capacity: usize) -> Self {
        IndexedHeap {
            arr: Vec::with_capacity(capacity),
            index: IndexTable::with_capacity(capacity),
            kind,
        }
    }

    /// Inserts a value into the heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::max_heap();
    /// heap.insert(1);
    /// heap.insert(4);
    /// assert_eq!(heap.peek(), Some(&4));
    /// ```
    pub fn insert(&mut self, value: T) {
        let at = self.arr.len();
        self.index.record(&value, at);
        self.arr.push(value);
        self.sift_up(at);
    }

    /// Removes one copy of a value from the heap and returns it. Returns `None` if the value is
    /// not in the heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::min_heap();
    /// heap.insert(2);
    /// assert_eq!(heap.remove(&2), Some(2));
    /// assert_eq!(heap.remove(&2), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let idx = self.index.position(value)?;
        Some(self.remove_index(idx))
    }

    /// Removes the value at a position of the backing vector and returns it. Returns `None` if
    /// the position is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::min_heap();
    /// heap.insert(5);
    /// heap.insert(3);
    /// assert_eq!(heap.remove_at(0), Some(3));
    /// assert_eq!(heap.remove_at(1), None);
    /// ```
    pub fn remove_at(&mut self, idx: usize) -> Option<T> {
        if idx >= self.arr.len() {
            return None;
        }
        Some(self.remove_index(idx))
    }

    /// Removes the root of the heap and returns it. Returns `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.remove_at(0)
    }

    /// Checks if a value is in the heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::min_heap();
    /// heap.insert(1);
    /// assert!(heap.contains(&1));
    /// assert!(!heap.contains(&0));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains(value)
    }

    /// Returns the current position of a value in the backing vector, or `None` if the value is
    /// not in the heap. If several copies are stored, any one of their positions is returned.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.index.position(value)
    }

    /// Clears the heap, removing all values.
    pub fn clear(&mut self) {
        debug!("clearing heap of {} values", self.arr.len());
        self.arr.clear();
        self.index.clear();
    }

    fn remove_index(&mut self, idx: usize) -> T {
        let last = self.arr.len() - 1;
        let value = self.arr.swap_remove(idx);
        self.index.forget(&value, idx);
        if idx < last {
            self.index.relocate(&self.arr[idx], last, idx);
            self.bubble(idx);
        }
        value
    }

    fn precedes(&self, a: &T, b: &T) -> bool {
        match self.kind {
            HeapKind::Min => a < b,
            HeapKind::Max => a > b,
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.arr.swap(i, j);
        if self.arr[i] != self.arr[j] {
            self.index.relocate(&self.arr[i], j, i);
            self.index.relocate(&self.arr[j], i, j);
        }
    }

    // The element at `idx` was just replaced, so it may be out of order with either its parent
    // or its children, never both.
    fn bubble(&mut self, idx: usize) {
        if idx > 0 && self.precedes(&self.arr[idx], &self.arr[(idx - 1) / 2]) {
            trace!("bubbling position {} up", idx);
            self.sift_up(idx);
        } else {
            trace!("bubbling position {} down", idx);
            self.sift_down(idx);
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.precedes(&self.arr[idx], &self.arr[parent]) {
                break;
            }
            self.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.arr.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut next = idx;
            if left < len && self.precedes(&self.arr[left], &self.arr[next]) {
                next = left;
            }
            if right < len && self.precedes(&self.arr[right], &self.arr[next]) {
                next = right;
            }
            if next == idx {
                break;
            }
            self.swap(idx, next);
            idx = next;
        }
    }
}

impl<T> IndexedHeap<T> {
    /// Returns the root of the heap, or `None` if the heap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::min_heap();
    /// assert_eq!(heap.peek(), None);
    /// heap.insert(2);
    /// heap.insert(1);
    /// assert_eq!(heap.peek(), Some(&1));
    /// ```
    pub fn peek(&self) -> Option<&T> {
        self.arr.first()
    }

    /// Returns the number of values in the heap.
    pub fn len(&self) -> usize {
        self.arr.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.arr.is_empty()
    }

    /// Returns the order relation the heap maintains.
    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    /// Returns the backing vector. Index 0 is the root and the children of position `i` are at
    /// `2i + 1` and `2i + 2`.
    pub fn as_slice(&self) -> &[T] {
        &self.arr
    }

    /// Returns an iterator over the heap in backing-vector order.
    ///
    /// # Examples
    ///
    /// ```
    /// use datastruct::binary_heap::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::min_heap();
    /// heap.insert(2);
    /// heap.insert(1);
    /// assert_eq!(heap.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.arr.iter()
    }
}

impl<'a, T> IntoIterator for &'a IndexedHeap<T> {
    type IntoIter = slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> PartialEq for IndexedHeap<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.arr == other.arr
    }
}

impl<T> Eq for IndexedHeap<T> where T: Eq {}

#[derive(Serialize)]
#[serde(rename = "IndexedHeap")]
struct HeapRef<'a, T: 'a> {
    kind: HeapKind,
    values: &'a [T],
}

#[derive(Deserialize)]
#[serde(rename = "IndexedHeap")]
struct HeapOwned<T> {
    kind: HeapKind,
    values: Vec<T>,
}

impl<T> Serialize for IndexedHeap<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        HeapRef {
            kind: self.kind,
            values: &self.arr,
        }
        .serialize(serializer)
    }
}

// The index table is not serialized; it is rebuilt by reinserting the values.
impl<'de, T> Deserialize<'de> for IndexedHeap<T>
where
    T: Deserialize<'de> + Ord + Hash + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let HeapOwned { kind, values } = HeapOwned::deserialize(deserializer)?;
        let mut heap = IndexedHeap::with_capacity(kind, values.len());
        for value in values {
            heap.insert(value);
        }
        Ok(heap)
    }
}

#[cfg(test)]
mod tests {
    use super::{HeapKind, IndexedHeap};
    use serde_test::{assert_tokens, Token};
    use std::fmt::Debug;
    use std::hash::Hash;

    fn check_invariants<T>(heap: &IndexedHeap<T>)
    where
        T: Ord + Hash + Clone + Debug,
    {
        for i in 1..heap.arr.len() {
            let parent = (i - 1) / 2;
            assert!(!heap.precedes(&heap.arr[i], &heap.arr[parent]));
        }
        for (i, value) in heap.arr.iter().enumerate() {
            assert!(heap.index.all_positions(value).contains(&i));
        }
        assert_eq!(heap.index.recorded(), heap.arr.len());
    }

    #[test]
    fn test_len_empty() {
        let heap: IndexedHeap<u32> = IndexedHeap::min_heap();
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let heap: IndexedHeap<u32> = IndexedHeap::min_heap();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn test_remove_empty() {
        let mut heap: IndexedHeap<u32> = IndexedHeap::min_heap();
        assert_eq!(heap.remove(&5), None);
        assert_eq!(heap.remove_at(0), None);
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_remove_at_root_min() {
        let mut heap = IndexedHeap::min_heap();
        for value in &[5, 3, 8, 1] {
            heap.insert(*value);
        }
        check_invariants(&heap);
        assert_eq!(heap.remove_at(0), Some(1));
        assert_eq!(heap.len(), 3);
        check_invariants(&heap);
    }

    #[test]
    fn test_remove_at_root_max() {
        let mut heap = IndexedHeap::new(HeapKind::Max);
        for value in &[5, 3, 8, 1] {
            heap.insert(*value);
        }
        assert_eq!(heap.remove_at(0), Some(8));
        assert_eq!(heap.peek(), Some(&5));
        check_invariants(&heap);
    }

    #[test]
    fn test_remove_at_out_of_bounds() {
        let mut heap = IndexedHeap::min_heap();
        heap.insert(1);
        assert_eq!(heap.remove_at(1), None);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_remove_at_last() {
        let mut heap = IndexedHeap::min_heap();
        for value in &[1, 2, 3] {
            heap.insert(*value);
        }
        assert_eq!(heap.remove_at(2), Some(3));
        assert_eq!(heap.as_slice(), &[1, 2]);
        check_invariants(&heap);
    }

    #[test]
    fn test_remove_absent() {
        let mut heap = IndexedHeap::min_heap();
        heap.insert(1);
        assert_eq!(heap.remove(&2), None);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_remove_moves_last_up() {
        let mut heap = IndexedHeap::min_heap();
        for value in &[1, 10, 2, 11, 12, 3, 4] {
            heap.insert(*value);
        }
        assert_eq!(heap.as_slice(), &[1, 10, 2, 11, 12, 3, 4]);

        assert_eq!(heap.remove(&11), Some(11));
        assert_eq!(heap.as_slice(), &[1, 4, 2, 10, 12, 3]);
        assert_eq!(heap.position(&4), Some(1));
        assert_eq!(heap.position(&10), Some(3));
        check_invariants(&heap);
    }

    #[test]
    fn test_remove_moves_last_down() {
        let mut heap = IndexedHeap::min_heap();
        for value in &[1, 10, 2, 11, 12, 3, 4] {
            heap.insert(*value);
        }

        assert_eq!(heap.remove_at(0), Some(1));
        assert_eq!(heap.as_slice(), &[2, 10, 3, 11, 12, 4]);
        assert_eq!(heap.position(&4), Some(5));
        assert_eq!(heap.position(&3), Some(2));
        check_invariants(&heap);
    }

    #[test]
    fn test_remove_duplicates() {
        let mut heap = IndexedHeap::min_heap();
        for value in &[5, 5, 1, 5] {
            heap.insert(*value);
        }
        check_invariants(&heap);

        assert_eq!(heap.remove(&5), Some(5));
        check_invariants(&heap);
        assert_eq!(heap.remove(&5), Some(5));
        check_invariants(&heap);
        assert!(heap.contains(&5));
        assert_eq!(heap.remove(&5), Some(5));
        assert!(!heap.contains(&5));
        assert_eq!(heap.as_slice(), &[1]);
        check_invariants(&heap);
    }

    #[test]
    fn test_pop_order() {
        let mut heap = IndexedHeap::max_heap();
        for value in &[7, 2, 9, 4, 1, 8, 3, 6, 5, 0] {
            heap.insert(*value);
        }
        let mut popped = Vec::new();
        while let Some(value) = heap.pop() {
            popped.push(value);
            check_invariants(&heap);
        }
        assert_eq!(popped, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_contains_position() {
        let mut heap = IndexedHeap::min_heap();
        heap.insert(2);
        heap.insert(1);
        assert!(heap.contains(&2));
        assert_eq!(heap.position(&1), Some(0));
        assert_eq!(heap.position(&2), Some(1));
        assert_eq!(heap.position(&3), None);
    }

    #[test]
    fn test_clear() {
        let mut heap = IndexedHeap::min_heap();
        heap.insert(2);
        heap.insert(1);
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(&1));
        check_invariants(&heap);
    }

    #[test]
    fn test_iter() {
        let mut heap = IndexedHeap::min_heap();
        heap.insert(3);
        heap.insert(1);
        heap.insert(2);
        assert_eq!(heap.iter().collect::<Vec<&u32>>(), vec![&1, &3, &2]);
        assert_eq!((&heap).into_iter().count(), 3);
    }

    #[test]
    fn test_tokens() {
        let mut heap = IndexedHeap::min_heap();
        heap.insert(1);
        heap.insert(3);
        heap.insert(2);

        assert_tokens(
            &heap,
            &[
                Token::Struct {
                    name: "IndexedHeap",
                    len: 2,
                },
                Token::Str("kind"),
                Token::UnitVariant {
                    name: "HeapKind",
                    variant: "Min",
                },
                Token::Str("values"),
                Token::Seq { len: Some(3) },
                Token::I32(1),
                Token::I32(3),
                Token::I32(2),
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }
}
