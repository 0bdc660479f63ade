mod error;
mod iter;
mod level;
mod node;
mod options;
#[cfg(test)]
mod proptests;

pub use crate::error::{Error, Result};
pub use crate::iter::{Iter, Range};
pub use crate::level::MAX_LEVEL;
pub use crate::options::SkipListOptions;

use crate::level::LevelGenerator;
use crate::node::Node;
use std::fmt;
use std::iter::FromIterator;

/// Arena slot of the sentinel head.
const HEAD: usize = 0;

/// An ordered multi-map from `i64` scores to values.
///
/// Values sharing a score are grouped under one node in insertion order, so
/// `len()` counts distinct scores rather than values.
///
/// ```
/// use scored_skiplist::SkipList;
///
/// let mut sk = SkipList::new();
/// sk.add(10, "tom");
/// sk.add(20, "charles");
/// sk.add(15, "robert");
/// sk.add(10, "candy");
///
/// assert_eq!(sk.len(), 3);
/// assert_eq!(sk.get_all(false), vec!["tom", "candy", "robert", "charles"]);
/// assert_eq!(sk.get_by_score(10), vec!["tom", "candy"]);
/// assert_eq!(sk.get_by_range(11, 20), vec!["robert", "charles"]);
/// ```
pub struct SkipList<V> {
    // Slot 0 is the head; freed slots are recycled through `free`.
    nodes: Vec<Node<V>>,
    free: Vec<usize>,
    tail: Option<usize>,
    height: usize,
    len: usize,
    levels: LevelGenerator,
}

impl<V> Default for SkipList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SkipList<V> {
    /// Make an empty skiplist whose heights are drawn from an entropy-seeded rng.
    pub fn new() -> Self {
        Self::with_levels(LevelGenerator::new(MAX_LEVEL, 0.5, None))
    }

    /// Make an empty skiplist with a reproducible tower layout.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_levels(LevelGenerator::new(MAX_LEVEL, 0.5, Some(seed)))
    }

    pub(crate) fn with_levels(levels: LevelGenerator) -> Self {
        SkipList {
            nodes: vec![Node::head(MAX_LEVEL)],
            free: Vec::new(),
            tail: None,
            height: 1,
            len: 0,
            levels,
        }
    }

    /// Number of distinct scores stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest level currently used by any node; 1 when empty.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Insert `value` under `score`, after any values already stored there.
    pub fn add(&mut self, score: i64, value: V) {
        let height = self.levels.random_level();
        self.insert_with_height(height, score, value);
    }

    fn insert_with_height(&mut self, height: usize, score: i64, value: V) {
        debug_assert!((1..=self.levels.max_level()).contains(&height));
        if self.len == 0 {
            self.add_first(height, score, value);
            return;
        }

        let update = self.find_update(score);
        if let Some(next) = self.nodes[update[0]].next() {
            if self.nodes[next].score() == score {
                self.nodes[next].push(value);
                return;
            }
        }

        let idx = self.alloc(Node::new(score, value, height));
        for (level, &prev) in update.iter().enumerate().take(height) {
            let next = self.nodes[prev].forward[level];
            self.nodes[idx].forward[level] = next;
            self.nodes[prev].forward[level] = Some(idx);
        }

        self.nodes[idx].back = if update[0] == HEAD {
            None
        } else {
            Some(update[0])
        };
        match self.nodes[idx].next() {
            Some(next) => self.nodes[next].back = Some(idx),
            None => self.tail = Some(idx),
        }

        self.raise_height(height);
        self.len += 1;
    }

    fn add_first(&mut self, height: usize, score: i64, value: V) {
        let idx = self.alloc(Node::new(score, value, height));
        for slot in &mut self.nodes[HEAD].forward[..height] {
            *slot = Some(idx);
        }
        self.tail = Some(idx);
        self.height = 1;
        self.raise_height(height);
        self.len = 1;
    }

    fn alloc(&mut self, node: Node<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn raise_height(&mut self, height: usize) {
        if height > self.height {
            tracing::trace!("skiplist height raised: {} -> {}", self.height, height);
            self.height = height;
        }
    }

    // Drop levels whose head slot no longer leads anywhere, so `height` lands
    // on the tallest remaining node.
    fn lower_height(&mut self) {
        let before = self.height;
        while self.height > 1 && self.nodes[HEAD].forward[self.height - 1].is_none() {
            self.height -= 1;
        }
        if self.height != before {
            tracing::trace!("skiplist height lowered: {} -> {}", before, self.height);
        }
    }

    /// For every level below `height`, the last node whose score is strictly
    /// less than `score`. Levels at or above `height` are left at the head.
    #[inline]
    fn find_update(&self, score: i64) -> [usize; MAX_LEVEL] {
        self.find_update_from(score, self.height)
    }

    fn find_update_from(&self, score: i64, top: usize) -> [usize; MAX_LEVEL] {
        let mut update = [HEAD; MAX_LEVEL];
        let mut cur = HEAD;
        for level in (0..top).rev() {
            while let Some(next) = self.nodes[cur].forward[level] {
                if self.nodes[next].score() < score {
                    cur = next;
                } else {
                    break;
                }
            }
            update[level] = cur;
        }
        update
    }

    /// Last node (or the head) with a score strictly less than `score`.
    fn predecessor(&self, score: i64) -> usize {
        let mut cur = HEAD;
        for level in (0..self.height).rev() {
            while let Some(next) = self.nodes[cur].forward[level] {
                if self.nodes[next].score() < score {
                    cur = next;
                } else {
                    break;
                }
            }
        }
        cur
    }

    fn find(&self, score: i64) -> Option<usize> {
        self.nodes[self.predecessor(score)]
            .next()
            .filter(|&idx| self.nodes[idx].score() == score)
    }

    /// Values stored under `score`, in insertion order.
    pub fn get(&self, score: i64) -> Option<&[V]> {
        self.find(score).map(|idx| self.nodes[idx].values())
    }

    pub fn contains(&self, score: i64) -> bool {
        self.find(score).is_some()
    }

    /// Lowest score and its values.
    pub fn first(&self) -> Option<(i64, &[V])> {
        self.nodes[HEAD].next().map(|idx| self.entry(idx))
    }

    /// Highest score and its values.
    pub fn last(&self) -> Option<(i64, &[V])> {
        self.tail.map(|idx| self.entry(idx))
    }

    #[inline]
    fn entry(&self, idx: usize) -> (i64, &[V]) {
        let node = &self.nodes[idx];
        (node.score(), node.values())
    }

    /// Iterate `(score, values)` in ascending score order. The iterator is
    /// double-ended; `.rev()` walks the back links from the tail.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.nodes, self.nodes[HEAD].next(), self.tail, self.len)
    }

    /// Iterate `(score, values)` for every score in `[begin, end]`.
    pub fn range(&self, begin: i64, end: i64) -> Range<'_, V> {
        let start = if begin > end || self.is_empty() {
            None
        } else {
            self.nodes[self.predecessor(begin)].next()
        };
        Range::new(&self.nodes, start, end)
    }

    /// Remove `score` and every value under it. Absent scores are a no-op.
    pub fn remove(&mut self, score: i64) -> Option<Vec<V>> {
        match self.len {
            0 => return None,
            1 => {
                let only = self.nodes[HEAD].next()?;
                if self.nodes[only].score() != score {
                    return None;
                }
                return self.reset_to_empty().map(|(_, values)| values);
            }
            _ => {}
        }

        let update = self.find_update(score);
        let target = self.nodes[update[0]]
            .next()
            .filter(|&idx| self.nodes[idx].score() == score)?;

        for level in 0..self.nodes[target].height() {
            let next = self.nodes[target].forward[level];
            self.nodes[update[level]].forward[level] = next;
        }
        self.lower_height();

        let prev = self.nodes[target].prev();
        match self.nodes[target].next() {
            Some(next) => self.nodes[next].back = prev,
            None => self.tail = prev,
        }

        self.len -= 1;
        let values = self.nodes[target].reset();
        self.free.push(target);
        Some(values)
    }

    /// Remove the lowest score, returning it with its values.
    pub fn remove_first(&mut self) -> Option<(i64, Vec<V>)> {
        match self.len {
            0 => None,
            1 => self.reset_to_empty(),
            _ => {
                let score = self.nodes[self.nodes[HEAD].next()?].score();
                self.remove(score).map(|values| (score, values))
            }
        }
    }

    /// Remove the highest score, returning it with its values.
    pub fn remove_back(&mut self) -> Option<(i64, Vec<V>)> {
        match self.len {
            0 => None,
            1 => self.reset_to_empty(),
            _ => {
                let score = self.nodes[self.tail?].score();
                self.remove(score).map(|values| (score, values))
            }
        }
    }

    // Removal of the last remaining node.
    fn reset_to_empty(&mut self) -> Option<(i64, Vec<V>)> {
        let only = self.nodes[HEAD].next()?;
        let score = self.nodes[only].score();
        let values = self.nodes[only].reset();
        self.clear();
        Some((score, values))
    }

    /// Remove everything, releasing all node slots.
    pub fn clear(&mut self) {
        for slot in self.nodes[HEAD].forward.iter_mut() {
            *slot = None;
        }
        self.nodes.truncate(1);
        self.free.clear();
        self.tail = None;
        self.height = 1;
        self.len = 0;
        tracing::trace!("skiplist emptied");
    }
}

impl<V: Clone> SkipList<V> {
    /// Every value, ascending by score, or descending when `reverse` is set.
    /// Values sharing a score come out in insertion order, or its reverse.
    pub fn get_all(&self, reverse: bool) -> Vec<V> {
        if reverse {
            self.iter()
                .rev()
                .flat_map(|(_, values)| values.iter().rev())
                .cloned()
                .collect()
        } else {
            self.iter()
                .flat_map(|(_, values)| values.iter())
                .cloned()
                .collect()
        }
    }

    /// Every value whose score lies in `[begin, end]`, ascending.
    pub fn get_by_range(&self, begin: i64, end: i64) -> Vec<V> {
        self.range(begin, end)
            .flat_map(|(_, values)| values.iter())
            .cloned()
            .collect()
    }

    /// A copy of the values stored under `score`; empty if absent.
    pub fn get_by_score(&self, score: i64) -> Vec<V> {
        self.get(score).map(<[V]>::to_vec).unwrap_or_default()
    }
}

impl<'a, V> IntoIterator for &'a SkipList<V> {
    type Item = (i64, &'a [V]);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> Extend<(i64, V)> for SkipList<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (score, value) in iter {
            self.add(score, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for SkipList<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut sk = SkipList::new();
        sk.extend(iter);
        sk
    }
}

impl<V> fmt::Display for SkipList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SkipList(height: {}, len: {})", self.height, self.len)
    }
}

impl<V: fmt::Debug> fmt::Debug for SkipList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SkipList(height: {}, len: {}), and table:",
            self.height, self.len
        )?;
        for level in (0..self.height).rev() {
            write!(f, "L{}: head", level)?;
            let mut cur = self.nodes[HEAD].forward[level];
            while let Some(idx) = cur {
                write!(f, " -> {}", self.nodes[idx].score())?;
                cur = self.nodes[idx].forward[level];
            }
            writeln!(f)?;
        }
        for (score, values) in self.iter() {
            writeln!(f, "{}: {:?}", score, values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl<V> SkipList<V> {
    pub(crate) fn ensure_invariants(&self) {
        let head = &self.nodes[HEAD];
        assert_eq!(head.height(), MAX_LEVEL);
        assert!(head.values().is_empty());

        let mut order = Vec::new();
        let mut prev = None;
        let mut cur = head.next();
        while let Some(idx) = cur {
            let node = &self.nodes[idx];
            assert!((1..=self.levels.max_level()).contains(&node.height()));
            assert!(!node.values().is_empty());
            assert_eq!(node.prev(), prev, "back link of {} broken", node.score());
            if let Some(p) = prev {
                assert!(self.nodes[p].score() < node.score());
            }
            order.push(idx);
            prev = cur;
            cur = node.next();
        }
        assert_eq!(order.len(), self.len);
        assert_eq!(self.tail, order.last().copied());

        let tallest = order
            .iter()
            .map(|&idx| self.nodes[idx].height())
            .max()
            .unwrap_or(1);
        assert_eq!(self.height, tallest);

        for level in 1..MAX_LEVEL {
            let expected: Vec<usize> = order
                .iter()
                .copied()
                .filter(|&idx| self.nodes[idx].height() > level)
                .collect();
            let mut chain = Vec::new();
            let mut cur = head.forward[level];
            while let Some(idx) = cur {
                chain.push(idx);
                cur = self.nodes[idx].forward[level];
            }
            assert_eq!(chain, expected, "level {} chain mismatch", level);
        }

        assert_eq!(self.nodes.len() - 1, self.len + self.free.len());
        for &slot in &self.free {
            assert_eq!(self.nodes[slot].height(), 0);
        }
    }

    pub(crate) fn search_paths_agree(&self, score: i64) -> bool {
        self.find_update_from(score, self.height) == self.find_update_from(score, MAX_LEVEL)
    }
}
