//! Polynomial-time bounds that narrow the exhaustive search

use crate::graph::degree::{annihilation_number, residue, sub_k_domination_number, sub_total_domination_number};
use crate::graph::IndexedGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed range of subset sizes the optimum can lie in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bound {
    pub lower: usize,
    pub upper: usize,
}

impl Bound {
    pub fn new(lower: usize, upper: usize) -> Self {
        debug_assert!(lower <= upper, "bound [{}, {}] is empty", lower, upper);
        Self { lower, upper }
    }

    /// Every size from 0 to `order`
    pub fn trivial(order: usize) -> Self {
        Self::new(0, order)
    }

    pub fn contains(&self, value: usize) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Number of sizes in the range
    pub fn width(&self) -> usize {
        self.upper - self.lower + 1
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Bound family for one invariant.
///
/// Each estimate reads only the degree sequence and the edge count. Families
/// without a known bound use `Trivial`, which degrades to unbounded search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundEstimator {
    Trivial,
    Independence { k: usize },
    Clique,
    VertexCover,
    Domination { k: usize },
    TotalDomination,
    Forcing { k: usize },
    TotalForcing,
    PowerDomination,
}

impl BoundEstimator {
    pub fn estimate<N>(&self, graph: &IndexedGraph<N>) -> Bound {
        let n = graph.order();
        if n == 0 {
            return Bound::trivial(0);
        }

        let degrees = graph.degrees();
        let m = graph.size();
        let min_degree = graph.min_degree();
        let max_degree = graph.max_degree();

        match *self {
            BoundEstimator::Trivial => Bound::trivial(n),
            BoundEstimator::Independence { k: 1 } => {
                let upper = annihilation_number(&degrees, m).min(n - min_degree);
                Bound::new(residue(&degrees).min(upper), upper)
            }
            BoundEstimator::Independence { k } => Bound::new(k.min(n), n),
            BoundEstimator::Clique => {
                let lower = if m > 0 { 2 } else { 1 };
                Bound::new(lower, (max_degree + 1).min(n))
            }
            BoundEstimator::VertexCover => {
                let lower = if max_degree == 0 { 0 } else { m.div_ceil(max_degree) };
                Bound::new(lower, n - 1)
            }
            BoundEstimator::Domination { k } => {
                let k = k.max(1);
                let mut lower = sub_k_domination_number(&degrees, k);
                let mut upper = n;
                if k == 1 {
                    lower = lower.max(n.div_ceil(max_degree + 1));
                    upper = n - max_degree;
                }
                Bound::new(lower.min(upper), upper)
            }
            BoundEstimator::TotalDomination => {
                let lower = sub_total_domination_number(&degrees).unwrap_or(n);
                Bound::new(lower.max(2).min(n), n)
            }
            BoundEstimator::Forcing { k } => {
                // the first force needs a black vertex and all but k of its neighbors black
                let lower = (min_degree + 1).saturating_sub(k).max(1);
                Bound::new(lower.min(n), n)
            }
            BoundEstimator::TotalForcing => Bound::new(min_degree.max(2).min(n), n),
            BoundEstimator::PowerDomination => Bound::new(1, n - max_degree),
        }
    }
}
