//! Dirty set: flat indices that require re-evaluation next tick.
//!
//! Implemented as a bitmap for O(1) membership plus an insertion-ordered
//! vector for cheap iteration, per the teacher's "pick by measured density"
//! note — a `W·H` bitmap is cache-friendly when the set is dense, which is
//! the common case right after a brush stroke.

#[derive(Debug, Clone)]
pub struct DirtySet {
    present: Vec<bool>,
    order: Vec<usize>,
}

impl DirtySet {
    pub fn new(capacity: usize) -> DirtySet {
        DirtySet {
            present: vec![false; capacity],
            order: Vec::new(),
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize) {
        if let Some(slot) = self.present.get_mut(index) {
            if !*slot {
                *slot = true;
                self.order.push(index);
            }
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.present.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// Snapshot the current membership as an owned list, leaving the set
    /// untouched (use `clear` separately per the configurable cadence).
    pub fn to_vec(&self) -> Vec<usize> {
        self.order.clone()
    }

    pub fn clear(&mut self) {
        for &idx in &self.order {
            if let Some(slot) = self.present.get_mut(idx) {
                *slot = false;
            }
        }
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut d = DirtySet::new(10);
        d.insert(3);
        d.insert(3);
        assert_eq!(d.len(), 1);
        assert!(d.contains(3));
    }

    #[test]
    fn clear_resets_membership() {
        let mut d = DirtySet::new(10);
        d.insert(1);
        d.insert(2);
        d.clear();
        assert!(d.is_empty());
        assert!(!d.contains(1));
    }

    #[test]
    fn out_of_range_insert_is_ignored() {
        let mut d = DirtySet::new(4);
        d.insert(100);
        assert!(d.is_empty());
    }
}
