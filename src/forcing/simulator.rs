//! Zero/k-forcing propagation to a fixpoint

use super::ForcingRules;
use crate::graph::{IndexedGraph, NodeSet};

/// Final state of a forcing process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcingOutcome {
    pub final_black: NodeSet,
    pub forces_all: bool,
    /// Passes that changed at least one color
    pub passes: usize,
}

/// Black/white partition of the nodes during one simulation
#[derive(Debug, Clone, Copy)]
struct ColoringState {
    black: NodeSet,
}

impl ColoringState {
    fn new(initial: NodeSet) -> Self {
        Self { black: initial }
    }

    /// Apply one full pass of the color-change rule.
    ///
    /// Every active vertex is judged against the colors at the start of the
    /// pass, so the result does not depend on the order nodes are visited in.
    /// Returns whether any vertex changed color.
    fn pass<N>(&mut self, graph: &IndexedGraph<N>, k: usize) -> bool {
        let snapshot = self.black;
        let forced = snapshot.iter().fold(NodeSet::empty(), |acc, node| {
            acc.union(ForcingRules::forced_by(graph, node, snapshot, k))
        });

        self.black = snapshot.union(forced);
        self.black != snapshot
    }
}

/// Runs the k-forcing color-change process on a graph.
///
/// Total for every input: `k = 0` activates nothing, so only the full node set
/// forces; isolated white vertices can never be forced.
#[derive(Debug, Clone, Copy)]
pub struct PropagationSimulator<'g, N> {
    graph: &'g IndexedGraph<N>,
    k: usize,
}

impl<'g, N> PropagationSimulator<'g, N> {
    pub fn new(graph: &'g IndexedGraph<N>, k: usize) -> Self {
        Self { graph, k }
    }

    /// Iterate passes from `initial` until no color changes
    pub fn simulate(&self, initial: NodeSet) -> ForcingOutcome {
        let mut state = ColoringState::new(initial);
        let mut passes = 0;

        // black count grows every productive pass, so at most n passes
        while state.pass(self.graph, self.k) {
            passes += 1;
        }

        ForcingOutcome {
            final_black: state.black,
            forces_all: state.black == NodeSet::full(self.graph.order()),
            passes,
        }
    }

    /// Whether `initial` eventually colors every node black
    pub fn forces_all(&self, initial: NodeSet) -> bool {
        self.simulate(initial).forces_all
    }

    /// Black set before the first pass and after every productive pass
    pub fn trace(&self, initial: NodeSet) -> Vec<NodeSet> {
        let mut state = ColoringState::new(initial);
        let mut path = vec![state.black];
        while state.pass(self.graph, self.k) {
            path.push(state.black);
        }
        path
    }
}
