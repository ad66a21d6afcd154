//! Rectangle partition: every live rectangle, grouped by size.
//!
//! Groups are kept in a `BTreeMap` ordered by [`SizeKey`], so ascending-size
//! sweeps need no sorting. Within a group the first member always holds the
//! group's minimum value; the remaining members keep insertion order.
//!
//! | Operation                               | Cost                      |
//! |-----------------------------------------|---------------------------|
//! | `RectanglePartition::insert()`          | O(log G) + O(1)           |
//! | `RectanglePartition::remove()`          | O(log G) + O(group len)   |
//! | `RectanglePartition::groups_ascending()`| lazy, O(G) to drain       |

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, VecDeque};

use crate::rect::{RectId, Rectangle, SizeKey};
use crate::types::SizeKeyMode;

/// All rectangles sharing one size key.
#[derive(Debug, Clone)]
pub struct Group {
    size: f64,
    members: VecDeque<Rectangle>,
}

impl Group {
    fn new(size: f64, first: Rectangle) -> Self {
        let mut members = VecDeque::with_capacity(4);
        members.push_back(first);
        Self { size, members }
    }

    /// Size shared by every member.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Member with the smallest value.
    pub fn head(&self) -> &Rectangle {
        // groups are never left empty
        &self.members[0]
    }

    /// Smallest value in the group.
    pub fn best_value(&self) -> f64 {
        self.head().value
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members, head first, then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rectangle> {
        self.members.iter()
    }

    fn push(&mut self, rect: Rectangle) {
        if rect.value < self.members[0].value {
            self.members.push_front(rect);
        } else {
            self.members.push_back(rect);
        }
    }

    fn take(&mut self, id: RectId) -> Option<Rectangle> {
        let pos = self.members.iter().position(|r| r.id == id)?;
        let rect = self.members.remove(pos)?;
        if pos == 0 {
            self.promote_min();
        }
        Some(rect)
    }

    /// Move the first minimum-valued member to the front.
    fn promote_min(&mut self) {
        let mut best: Option<(usize, f64)> = None;
        for (i, r) in self.members.iter().enumerate() {
            match best {
                Some((_, v)) if r.value >= v => {}
                _ => best = Some((i, r.value)),
            }
        }
        if let Some((pos, _)) = best {
            if pos > 0 {
                if let Some(r) = self.members.remove(pos) {
                    self.members.push_front(r);
                }
            }
        }
    }
}

/// Every live rectangle of a search, grouped by size.
#[derive(Debug, Clone)]
pub struct RectanglePartition {
    mode: SizeKeyMode,
    groups: BTreeMap<SizeKey, Group>,
    count: usize,
    next_id: RectId,
}

impl RectanglePartition {
    /// Create an empty partition grouping by the given key mode.
    pub fn new(mode: SizeKeyMode) -> Self {
        Self {
            mode,
            groups: BTreeMap::new(),
            count: 0,
            next_id: 0,
        }
    }

    pub fn mode(&self) -> SizeKeyMode {
        self.mode
    }

    /// Hand out a fresh rectangle id.
    pub fn alloc_id(&mut self) -> RectId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// A unit-cube rectangle with a fresh id from this partition.
    ///
    /// The rectangle is not inserted.
    pub fn new_root(&mut self, dim: usize, value: f64) -> Rectangle {
        let id = self.alloc_id();
        Rectangle::root(id, dim, value)
    }

    /// Add a rectangle to the group for its size, creating the group if needed.
    ///
    /// The rectangle goes to the front when its value is strictly below the
    /// current head's, otherwise to the back. Returns the key it was filed under.
    pub fn insert(&mut self, rect: Rectangle) -> SizeKey {
        let key = rect.key(self.mode);
        match self.groups.entry(key.clone()) {
            Entry::Occupied(mut e) => e.get_mut().push(rect),
            Entry::Vacant(e) => {
                let size = e.key().size();
                e.insert(Group::new(size, rect));
            }
        }
        self.count += 1;
        key
    }

    /// Remove the rectangle `id` from the group at `key`.
    ///
    /// Deletes the group when it becomes empty.
    pub fn remove_by_key(&mut self, key: &SizeKey, id: RectId) -> Option<Rectangle> {
        let group = self.groups.get_mut(key)?;
        let rect = group.take(id)?;
        if group.is_empty() {
            self.groups.remove(key);
        }
        self.count -= 1;
        Some(rect)
    }

    /// Remove `rect` (matched by id) from the group for its current size.
    pub fn remove(&mut self, rect: &Rectangle) -> Option<Rectangle> {
        let key = rect.key(self.mode);
        self.remove_by_key(&key, rect.id)
    }

    /// Number of rectangles.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of distinct sizes.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, key: &SizeKey) -> Option<&Group> {
        self.groups.get(key)
    }

    /// Minimum-valued rectangle of the group at `key`.
    pub fn head(&self, key: &SizeKey) -> Option<&Rectangle> {
        self.groups.get(key).map(Group::head)
    }

    /// `(size, best_value)` per group, ascending by size.
    ///
    /// Built fresh from the current state on every call.
    pub fn groups_ascending(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.groups.values().map(|g| (g.size, g.best_value()))
    }

    /// `(key, head)` per group, ascending by size.
    pub fn heads_ascending(&self) -> impl Iterator<Item = (&SizeKey, &Rectangle)> + '_ {
        self.groups.iter().map(|(k, g)| (k, g.head()))
    }

    /// Every rectangle, groups ascending by size.
    pub fn iter(&self) -> impl Iterator<Item = &Rectangle> + '_ {
        self.groups.values().flat_map(Group::iter)
    }

    /// Smallest value over all rectangles.
    pub fn smallest_value(&self) -> Option<f64> {
        self.groups
            .values()
            .map(Group::best_value)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Check that every group is non-empty, that each head holds its group's
    /// minimum, that every member is filed under its own key, and that the
    /// rectangle count is right.
    pub fn is_consistent(&self) -> bool {
        let mut n = 0;
        for (key, g) in &self.groups {
            if g.is_empty() {
                return false;
            }
            let head = g.best_value();
            for r in g.iter() {
                if r.value < head || &r.key(self.mode) != key {
                    return false;
                }
            }
            n += g.len();
        }
        n == self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_with(p: &mut RectanglePartition, depths: &[u32], value: f64) -> Rectangle {
        let mut r = Rectangle::root(p.alloc_id(), depths.len(), value);
        for (i, &d) in depths.iter().enumerate() {
            for _ in 0..d {
                r.trisect(i);
            }
        }
        r
    }

    #[test]
    fn test_insert_creates_group() {
        let mut p = RectanglePartition::new(SizeKeyMode::Float);
        assert!(p.is_empty());
        let r = rect_with(&mut p, &[0, 0], 1.0);
        let key = p.insert(r);
        assert_eq!(p.len(), 1);
        assert_eq!(p.num_groups(), 1);
        assert_eq!(p.head(&key).unwrap().value, 1.0);
        assert!((p.group(&key).unwrap().size() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_insert_better_goes_to_front() {
        let mut p = RectanglePartition::new(SizeKeyMode::Float);
        let a = rect_with(&mut p, &[1], 5.0);
        let b = rect_with(&mut p, &[1], 7.0);
        let c = rect_with(&mut p, &[1], 2.0);
        let d = rect_with(&mut p, &[1], 2.0);
        let key = p.insert(a);
        p.insert(b);
        p.insert(c);
        p.insert(d);

        let values: Vec<f64> = p.group(&key).unwrap().iter().map(|r| r.value).collect();
        // equal value is appended, not placed in front
        assert_eq!(values, vec![2.0, 5.0, 7.0, 2.0]);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_remove_deletes_empty_group() {
        let mut p = RectanglePartition::new(SizeKeyMode::Float);
        let a = rect_with(&mut p, &[0], 1.0);
        let b = rect_with(&mut p, &[1], 2.0);
        let a_id = a.id();
        let key = p.insert(a);
        p.insert(b);
        assert_eq!(p.num_groups(), 2);

        let removed = p.remove_by_key(&key, a_id).unwrap();
        assert_eq!(removed.value, 1.0);
        assert_eq!(p.num_groups(), 1);
        assert!(p.group(&key).is_none());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_remove_head_promotes_minimum() {
        let mut p = RectanglePartition::new(SizeKeyMode::Float);
        let a = rect_with(&mut p, &[1, 0], 1.0);
        let b = rect_with(&mut p, &[0, 1], 9.0);
        let c = rect_with(&mut p, &[1, 0], 4.0);
        let d = rect_with(&mut p, &[0, 1], 3.0);
        let head = a.clone();
        p.insert(a);
        p.insert(b);
        p.insert(c);
        p.insert(d);

        p.remove(&head).unwrap();
        let key = head.key(SizeKeyMode::Float);
        let values: Vec<f64> = p.group(&key).unwrap().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![3.0, 9.0, 4.0]);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut p = RectanglePartition::new(SizeKeyMode::Float);
        let a = rect_with(&mut p, &[0], 1.0);
        let key = p.insert(a);
        assert!(p.remove_by_key(&key, 999).is_none());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_groups_ascending_is_sorted_and_fresh() {
        let mut p = RectanglePartition::new(SizeKeyMode::Float);
        for (d, v) in [(2, 3.0), (0, 5.0), (1, 4.0), (1, 1.0)] {
            let r = rect_with(&mut p, &[d], v);
            p.insert(r);
        }
        let border: Vec<(f64, f64)> = p.groups_ascending().collect();
        assert_eq!(border.len(), 3);
        assert!(border.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(border[1].1, 1.0);

        let r = rect_with(&mut p, &[3], -1.0);
        p.insert(r);
        let border: Vec<(f64, f64)> = p.groups_ascending().collect();
        assert_eq!(border.len(), 4);
        assert_eq!(border[0].1, -1.0);
        // restartable
        assert_eq!(p.groups_ascending().count(), 4);
    }

    #[test]
    fn test_exact_mode_merges_permuted_sizes() {
        let mut p = RectanglePartition::new(SizeKeyMode::Exact);
        let a = rect_with(&mut p, &[2, 0, 1], 1.0);
        let b = rect_with(&mut p, &[0, 1, 2], 0.5);
        p.insert(a);
        p.insert(b);
        assert_eq!(p.num_groups(), 1);
        assert_eq!(p.smallest_value(), Some(0.5));
        assert!(p.is_consistent());
    }

    #[test]
    fn test_alloc_id_unique() {
        let mut p = RectanglePartition::new(SizeKeyMode::Float);
        let ids: Vec<RectId> = (0..5).map(|_| p.alloc_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_new_root_ids_never_collide() {
        let mut p = RectanglePartition::new(SizeKeyMode::Exact);
        assert_eq!(p.mode(), SizeKeyMode::Exact);
        let a = p.new_root(2, 3.0);
        let b = p.new_root(2, 1.0);
        let c = rect_with(&mut p, &[0, 0], 2.0);
        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
        assert_eq!(a.center, vec![0.5, 0.5]);
        assert_eq!(a.sides, vec![1.0, 1.0]);

        let (a_id, b_id) = (a.id(), b.id());
        let key = p.insert(a);
        p.insert(b);
        p.insert(c);
        // same size, so removal must pick by id alone
        let removed = p.remove_by_key(&key, a_id).unwrap();
        assert_eq!(removed.value, 3.0);
        assert_eq!(p.head(&key).unwrap().id(), b_id);
        assert_eq!(p.len(), 2);
        assert!(p.is_consistent());
    }
}
