//! Iterative lexicographic subset enumeration over node positions

use crate::graph::NodeSet;

/// All `size`-element subsets of `{0, .., n - 1}` in lexicographic order of
/// their sorted index vectors.
///
/// State is the current index vector, so an enumeration can be suspended with
/// [`Combinations::position`] and picked up again with [`Combinations::resume`].
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, size: usize) -> Self {
        Self {
            n,
            indices: (0..size).collect(),
            started: false,
            done: size > n,
        }
    }

    /// Continue from a position previously returned by [`Combinations::position`].
    ///
    /// The subset at `position` is yielded again first. Returns `None` if the
    /// position is not a strictly increasing index vector below `n`.
    pub fn resume(n: usize, position: Vec<usize>) -> Option<Self> {
        let increasing = position.windows(2).all(|pair| pair[0] < pair[1]);
        let in_range = position.last().map_or(true, |&last| last < n);
        if !increasing || !in_range {
            return None;
        }
        Some(Self {
            n,
            indices: position,
            started: false,
            done: false,
        })
    }

    /// Index vector of the most recently yielded subset, or of the next one
    /// before iteration starts
    pub fn position(&self) -> &[usize] {
        &self.indices
    }

    fn current(&self) -> NodeSet {
        self.indices.iter().copied().collect()
    }

    fn advance(&mut self) -> bool {
        let size = self.indices.len();
        let Some(pivot) = (0..size)
            .rev()
            .find(|&i| self.indices[i] < self.n - size + i)
        else {
            return false;
        };

        self.indices[pivot] += 1;
        for i in (pivot + 1)..size {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = NodeSet;

    fn next(&mut self) -> Option<NodeSet> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        if self.advance() {
            Some(self.current())
        } else {
            self.done = true;
            None
        }
    }
}

/// `C(n, k)`, saturating at `u128::MAX`
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // exact: the running product is always a binomial coefficient
        result = match result.checked_mul((n - i) as u128) {
            Some(product) => product / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    result
}
