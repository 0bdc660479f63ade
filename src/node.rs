use std::fmt;

/// A single score and every value stored under it.
///
/// Links are arena indices into the owning `SkipList`, never pointers, so a
/// node owns nothing but its values.
pub(crate) struct Node<V> {
    score: i64,
    values: Vec<V>,
    pub(crate) forward: Vec<Option<usize>>,
    pub(crate) back: Option<usize>,
}

impl<V> Node<V> {
    pub(crate) fn head(height: usize) -> Self {
        Node {
            score: i64::MIN,
            values: Vec::new(),
            forward: vec![None; height],
            back: None,
        }
    }

    pub(crate) fn new(score: i64, value: V, height: usize) -> Self {
        Node {
            score,
            values: vec![value],
            forward: vec![None; height],
            back: None,
        }
    }

    #[inline]
    pub(crate) fn score(&self) -> i64 {
        self.score
    }

    #[inline]
    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub(crate) fn push(&mut self, value: V) {
        self.values.push(value);
    }

    /// Successor on the level-0 chain.
    #[inline]
    pub(crate) fn next(&self) -> Option<usize> {
        self.forward.first().copied().flatten()
    }

    #[inline]
    pub(crate) fn prev(&self) -> Option<usize> {
        self.back
    }

    /// Severs every link and hands back the values. The slot is left with
    /// height 0, which never occurs for a live node.
    pub(crate) fn reset(&mut self) -> Vec<V> {
        self.forward = Vec::new();
        self.back = None;
        std::mem::take(&mut self.values)
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("score", &self.score)
            .field("values", &self.values)
            .field("height", &self.height())
            .field("back", &self.back)
            .finish()
    }
}
