//! Orchestration: bind an invariant to its recipe and run the search

use super::registry::{Invariant, Params};
use crate::config::{Backend, SearchConfig};
use crate::error::{InvariantError, Result};
use crate::graph::{GraphView, IndexedGraph, NodeSet};
use crate::sat::SatEncoder;
use crate::search::{search, Bound, SearchStats};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Computes invariants under one [`SearchConfig`].
///
/// Holds no state besides the configuration: every call validates a fresh
/// snapshot of the graph and computes its own bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantSolver {
    config: SearchConfig,
}

/// An optimal value with the witness that realizes it
pub struct InvariantResult<'g, G: GraphView + ?Sized> {
    pub graph: &'g G,
    pub invariant: Invariant,
    /// Resolved parameter, for invariants that take one
    pub k: Option<usize>,
    pub value: usize,
    /// Witness nodes in the graph's node order
    pub witness: Vec<G::Node>,
    pub bound: Bound,
    pub stats: SearchStats,
    pub backend: Backend,
}

/// Label-free part of a result, computed on the snapshot
#[derive(Debug, Clone, Copy)]
struct Computation {
    k: usize,
    witness: NodeSet,
    bound: Bound,
    stats: SearchStats,
    backend: Backend,
}

impl InvariantSolver {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Optimal witness of `invariant` on `graph`
    pub fn witness<'g, G>(
        &self,
        graph: &'g G,
        invariant: Invariant,
        params: Params,
    ) -> Result<InvariantResult<'g, G>>
    where
        G: GraphView + ?Sized,
    {
        let snapshot = self.snapshot(graph)?;
        let computation = self.compute(&snapshot, invariant, params)?;
        Ok(InvariantResult::new(graph, &snapshot, invariant, computation))
    }

    /// Optimal value of `invariant` on `graph`; runs the same search as [`Self::witness`]
    pub fn value<G>(&self, graph: &G, invariant: Invariant, params: Params) -> Result<usize>
    where
        G: GraphView + ?Sized,
    {
        self.witness(graph, invariant, params).map(|result| result.value)
    }

    /// Whether `subset` satisfies the defining condition of `invariant`.
    ///
    /// Members that are not nodes of `graph` are ignored. Domain rules do not
    /// apply: the predicate is defined on every graph.
    pub fn is_valid<G>(
        &self,
        graph: &G,
        invariant: Invariant,
        subset: &[G::Node],
        params: Params,
    ) -> Result<bool>
    where
        G: GraphView + ?Sized,
    {
        let snapshot = self.snapshot(graph)?;
        let k = params.resolve_k(invariant)?;
        let recipe = invariant.resolve(k);
        Ok(recipe.oracle.is_valid(&snapshot, snapshot.subset_of(subset)))
    }

    /// Every registered invariant, computed in parallel across invariants.
    ///
    /// `k` is passed only to invariants that accept it. Each individual
    /// search stays sequential.
    pub fn compute_all<'g, G>(
        &self,
        graph: &'g G,
        k: Option<i64>,
    ) -> Result<Vec<(Invariant, Result<InvariantResult<'g, G>>)>>
    where
        G: GraphView + ?Sized,
        G::Node: Send + Sync,
    {
        let snapshot = self.snapshot(graph)?;

        let computations: Vec<(Invariant, Result<Computation>)> = Invariant::ALL
            .par_iter()
            .map(|&invariant| {
                let params = if invariant.accepts_k() {
                    Params { k }
                } else {
                    Params::new()
                };
                (invariant, self.compute(&snapshot, invariant, params))
            })
            .collect();

        Ok(computations
            .into_iter()
            .map(|(invariant, computation)| {
                let result = computation
                    .map(|computation| InvariantResult::new(graph, &snapshot, invariant, computation));
                (invariant, result)
            })
            .collect())
    }

    fn snapshot<G>(&self, graph: &G) -> Result<IndexedGraph<G::Node>>
    where
        G: GraphView + ?Sized,
    {
        IndexedGraph::from_view_with_limit(graph, self.config.max_order)
    }

    /// Parameters, then domain, then bound, then search
    fn compute<N>(
        &self,
        graph: &IndexedGraph<N>,
        invariant: Invariant,
        params: Params,
    ) -> Result<Computation> {
        let k = params.resolve_k(invariant)?;
        let n = graph.order();

        if n == 0 {
            return Ok(Computation {
                k,
                witness: NodeSet::empty(),
                bound: Bound::trivial(0),
                stats: SearchStats::default(),
                backend: self.config.backend,
            });
        }

        invariant.check_domain(graph)?;

        let recipe = invariant.resolve(k);
        let bound = if self.config.use_bounds {
            recipe.bound.estimate(graph)
        } else {
            Bound::trivial(n)
        };
        debug!("{} (k = {}) on {} nodes: bound {}", invariant, k, n, bound);

        let (outcome, backend) = match self.config.backend {
            Backend::Sat => match SatEncoder::new(graph, recipe.oracle).solve(recipe.direction, bound)? {
                Some(outcome) => (outcome, Backend::Sat),
                None => {
                    info!("{} has no SAT encoding, falling back to brute force", invariant);
                    (search(graph, recipe.oracle, recipe.direction, bound), Backend::BruteForce)
                }
            },
            Backend::BruteForce => (
                search(graph, recipe.oracle, recipe.direction, bound),
                Backend::BruteForce,
            ),
        };

        let Some(witness) = outcome.witness else {
            return Err(if invariant.always_exists(k) {
                InvariantError::SearchExhausted { invariant }
            } else {
                InvariantError::DomainUndefined {
                    invariant,
                    reason: format!("no subset satisfies {} with k = {}", invariant, k),
                }
            });
        };

        if !bound.contains(witness.len()) {
            warn!(
                "{} = {} lies outside its computed bound {}",
                invariant,
                witness.len(),
                bound
            );
        }
        info!(
            "{} = {} after {} size(s), {} candidate(s) in {:.3}s",
            invariant,
            witness.len(),
            outcome.stats.sizes_visited,
            outcome.stats.candidates_tested,
            outcome.stats.elapsed.as_secs_f64()
        );

        Ok(Computation {
            k,
            witness,
            bound,
            stats: outcome.stats,
            backend,
        })
    }
}

impl<'g, G: GraphView + ?Sized> InvariantResult<'g, G> {
    fn new(
        graph: &'g G,
        snapshot: &IndexedGraph<G::Node>,
        invariant: Invariant,
        computation: Computation,
    ) -> Self {
        Self {
            graph,
            invariant,
            k: invariant.accepts_k().then_some(computation.k),
            value: computation.witness.len(),
            witness: snapshot.labels_of(computation.witness),
            bound: computation.bound,
            stats: computation.stats,
            backend: computation.backend,
        }
    }

    /// Serializable view with labels rendered through `Display`
    pub fn summary(&self) -> ResultSummary
    where
        G::Node: fmt::Display,
    {
        ResultSummary {
            invariant: self.invariant,
            k: self.k,
            value: self.value,
            witness: self.witness.iter().map(ToString::to_string).collect(),
            bound: self.bound,
            backend: self.backend,
            stats: self.stats,
        }
    }
}

impl<G: GraphView + ?Sized> fmt::Debug for InvariantResult<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvariantResult")
            .field("invariant", &self.invariant)
            .field("k", &self.k)
            .field("value", &self.value)
            .field("witness", &self.witness)
            .field("bound", &self.bound)
            .field("backend", &self.backend)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub invariant: Invariant,
    pub k: Option<usize>,
    pub value: usize,
    pub witness: Vec<String>,
    pub bound: Bound,
    pub backend: Backend,
    pub stats: SearchStats,
}
