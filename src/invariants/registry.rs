//! Tagged-variant registry of the supported invariants

use crate::error::{InvariantError, Result};
use crate::graph::IndexedGraph;
use crate::search::{BoundEstimator, Direction, Refinement, ValidityOracle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invariant {
    Independence,
    Clique,
    VertexCover,
    Domination,
    TotalDomination,
    ConnectedDomination,
    IndependentDomination,
    ZeroForcing,
    TotalZeroForcing,
    ConnectedForcing,
    PowerDomination,
}

/// The fixed search recipe for one invariant with its parameter bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantSpec {
    pub oracle: ValidityOracle,
    pub bound: BoundEstimator,
    pub direction: Direction,
}

impl Invariant {
    pub const ALL: [Invariant; 11] = [
        Invariant::Independence,
        Invariant::Clique,
        Invariant::VertexCover,
        Invariant::Domination,
        Invariant::TotalDomination,
        Invariant::ConnectedDomination,
        Invariant::IndependentDomination,
        Invariant::ZeroForcing,
        Invariant::TotalZeroForcing,
        Invariant::ConnectedForcing,
        Invariant::PowerDomination,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Invariant::Independence => "independence",
            Invariant::Clique => "clique",
            Invariant::VertexCover => "vertex_cover",
            Invariant::Domination => "domination",
            Invariant::TotalDomination => "total_domination",
            Invariant::ConnectedDomination => "connected_domination",
            Invariant::IndependentDomination => "independent_domination",
            Invariant::ZeroForcing => "zero_forcing",
            Invariant::TotalZeroForcing => "total_zero_forcing",
            Invariant::ConnectedForcing => "connected_forcing",
            Invariant::PowerDomination => "power_domination",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Invariant::Independence | Invariant::Clique => Direction::Maximize,
            _ => Direction::Minimize,
        }
    }

    /// Whether the invariant takes the parameter `k`
    pub fn accepts_k(self) -> bool {
        !matches!(
            self,
            Invariant::Clique
                | Invariant::VertexCover
                | Invariant::TotalDomination
                | Invariant::TotalZeroForcing
        )
    }

    /// Oracle, bound family and direction for this invariant at parameter `k`
    pub fn resolve(self, k: usize) -> InvariantSpec {
        let (oracle, bound) = match self {
            Invariant::Independence => (
                ValidityOracle::Independence { k },
                BoundEstimator::Independence { k },
            ),
            Invariant::Clique => (ValidityOracle::Clique, BoundEstimator::Clique),
            Invariant::VertexCover => (ValidityOracle::VertexCover, BoundEstimator::VertexCover),
            Invariant::Domination => (
                ValidityOracle::Domination {
                    k,
                    refinement: Refinement::Plain,
                },
                BoundEstimator::Domination { k },
            ),
            Invariant::TotalDomination => (
                ValidityOracle::Domination {
                    k: 1,
                    refinement: Refinement::Total,
                },
                BoundEstimator::TotalDomination,
            ),
            Invariant::ConnectedDomination => (
                ValidityOracle::Domination {
                    k,
                    refinement: Refinement::Connected,
                },
                BoundEstimator::Domination { k },
            ),
            Invariant::IndependentDomination => (
                ValidityOracle::Domination {
                    k,
                    refinement: Refinement::Independent,
                },
                BoundEstimator::Domination { k },
            ),
            Invariant::ZeroForcing => (
                ValidityOracle::Forcing {
                    k,
                    refinement: Refinement::Plain,
                },
                BoundEstimator::Forcing { k },
            ),
            Invariant::TotalZeroForcing => (
                ValidityOracle::Forcing {
                    k: 1,
                    refinement: Refinement::Total,
                },
                BoundEstimator::TotalForcing,
            ),
            Invariant::ConnectedForcing => (
                ValidityOracle::Forcing {
                    k,
                    refinement: Refinement::Connected,
                },
                BoundEstimator::Forcing { k },
            ),
            Invariant::PowerDomination => (
                ValidityOracle::PowerDomination { k },
                BoundEstimator::PowerDomination,
            ),
        };

        InvariantSpec {
            oracle,
            bound,
            direction: self.direction(),
        }
    }

    /// Reject graphs on which the invariant has no meaning.
    ///
    /// The null graph is accepted by every invariant.
    pub fn check_domain<N>(self, graph: &IndexedGraph<N>) -> Result<()> {
        if graph.order() == 0 {
            return Ok(());
        }

        match self {
            Invariant::TotalDomination | Invariant::TotalZeroForcing => {
                let isolated = graph.isolated_nodes();
                if !isolated.is_empty() {
                    return Err(InvariantError::DomainUndefined {
                        invariant: self,
                        reason: format!("graph has {} isolated node(s)", isolated.len()),
                    });
                }
            }
            Invariant::ConnectedDomination | Invariant::ConnectedForcing => {
                if !graph.is_connected() {
                    return Err(InvariantError::DomainUndefined {
                        invariant: self,
                        reason: "graph is disconnected".to_string(),
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Whether a valid subset exists on every graph inside the domain.
    ///
    /// Only independent k-domination for `k > 1` can fail, e.g. on `K2`.
    pub fn always_exists(self, k: usize) -> bool {
        !(self == Invariant::IndependentDomination && k > 1)
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Invariant {
    type Err = InvariantError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let invariant = match normalized.as_str() {
            "independence" | "k_independence" | "independence_number" => Invariant::Independence,
            "clique" | "clique_number" => Invariant::Clique,
            "vertex_cover" | "vertex_cover_number" => Invariant::VertexCover,
            "domination" | "k_domination" | "domination_number" => Invariant::Domination,
            "total_domination" => Invariant::TotalDomination,
            "connected_domination" | "connected_k_domination" => Invariant::ConnectedDomination,
            "independent_domination" | "independent_k_domination" => {
                Invariant::IndependentDomination
            }
            "zero_forcing" | "k_forcing" => Invariant::ZeroForcing,
            "total_zero_forcing" | "total_forcing" => Invariant::TotalZeroForcing,
            "connected_forcing" | "connected_zero_forcing" | "connected_k_forcing" => {
                Invariant::ConnectedForcing
            }
            "power_domination" | "k_power_domination" => Invariant::PowerDomination,
            _ => return Err(InvariantError::UnknownInvariant(s.to_string())),
        };
        Ok(invariant)
    }
}

/// Caller-supplied invariant parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Forcing or domination radius; `None` means 1
    pub k: Option<i64>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k(k: i64) -> Self {
        Self { k: Some(k) }
    }

    /// Validated `k` for `invariant`; never clamps
    pub fn resolve_k(&self, invariant: Invariant) -> Result<usize> {
        let Some(k) = self.k else {
            return Ok(1);
        };

        if !invariant.accepts_k() {
            return Err(InvariantError::Parameter {
                name: "k",
                value: k,
                reason: format!("{} takes no parameter", invariant),
            });
        }
        if k < 1 {
            return Err(InvariantError::Parameter {
                name: "k",
                value: k,
                reason: "must be a positive integer".to_string(),
            });
        }

        usize::try_from(k).map_err(|_| InvariantError::Parameter {
            name: "k",
            value: k,
            reason: "does not fit the platform word size".to_string(),
        })
    }
}
