use crate::node::Node;
use std::iter::FusedIterator;

/// Walks the level-0 chain, yielding each score with its values.
///
/// Forward steps follow successor links from the first node; backward steps
/// follow back links from the tail. The two ends meet without overlap.
pub struct Iter<'a, V> {
    nodes: &'a [Node<V>],
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(
        nodes: &'a [Node<V>],
        front: Option<usize>,
        back: Option<usize>,
        remaining: usize,
    ) -> Self {
        Self {
            nodes,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a [V]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front?];
        self.front = node.next();
        self.remaining -= 1;
        Some((node.score(), node.values()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> DoubleEndedIterator for Iter<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back?];
        self.back = node.prev();
        self.remaining -= 1;
        Some((node.score(), node.values()))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

impl<'a, V> FusedIterator for Iter<'a, V> {}

/// Yields every score in `[begin, end]` with its values.
///
/// Positioned on the first node with score >= `begin` when created, so
/// iteration is a plain level-0 walk until a score passes `end`.
pub struct Range<'a, V> {
    nodes: &'a [Node<V>],
    curr: Option<usize>,
    end: i64,
}

impl<'a, V> Range<'a, V> {
    pub(crate) fn new(nodes: &'a [Node<V>], curr: Option<usize>, end: i64) -> Self {
        Self { nodes, curr, end }
    }
}

impl<'a, V> Iterator for Range<'a, V> {
    type Item = (i64, &'a [V]);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.curr?];
        if node.score() > self.end {
            self.curr = None;
            return None;
        }
        self.curr = node.next();
        Some((node.score(), node.values()))
    }
}

impl<'a, V> FusedIterator for Range<'a, V> {}
