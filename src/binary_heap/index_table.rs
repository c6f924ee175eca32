use std::collections::HashMap;
use std::hash::Hash;

/// Maps every stored value to the positions its copies occupy in the heap's backing vector.
///
/// A value inserted `k` times has exactly `k` recorded positions.
#[derive(Clone, Debug)]
pub struct IndexTable<T> {
    positions: HashMap<T, Vec<usize>>,
}

impl<T> IndexTable<T>
where
    T: Hash + Eq + Clone,
{
    pub fn with_capacity(capacity: usize) -> Self {
        IndexTable {
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, value: &T, at: usize) {
        if let Some(positions) = self.positions.get_mut(value) {
            positions.push(at);
            return;
        }
        self.positions.insert(value.clone(), vec![at]);
    }

    // Any recorded position of `value`; the most recently recorded one is returned.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.positions.get(value).and_then(|positions| positions.last().cloned())
    }

    pub fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }

    pub fn relocate(&mut self, value: &T, from: usize, to: usize) {
        let slot = self
            .positions
            .get_mut(value)
            .and_then(|positions| positions.iter_mut().find(|position| **position == from));
        match slot {
            Some(position) => *position = to,
            None => panic!("Error: index table has no entry at position {}.", from),
        }
    }

    pub fn forget(&mut self, value: &T, at: usize) {
        let now_empty = match self.positions.get_mut(value) {
            Some(positions) => {
                match positions.iter().position(|position| *position == at) {
                    Some(i) => positions.swap_remove(i),
                    None => panic!("Error: index table has no entry at position {}.", at),
                };
                positions.is_empty()
            },
            None => panic!("Error: index table has no entry for a stored value."),
        };
        if now_empty {
            self.positions.remove(value);
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    // Total number of recorded positions across all values.
    #[cfg(test)]
    pub fn recorded(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub fn all_positions(&self, value: &T) -> Vec<usize> {
        self.positions.get(value).cloned().unwrap_or_default()
    }
}
