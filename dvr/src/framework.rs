#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense index of a node, nodes are numbered `0..n` with no gaps
pub type NodeId = usize;
/// Link and path cost. Lower is better.
pub type Cost = u32;

/// Finite stand-in for an infinite cost. Two costs below this value always sum without overflowing.
pub const INF: Cost = 0x3FFF_FFFF;

/// Rule used when two neighbours offer the same total cost to a destination
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TieBreak {
    /// Keep last round's next hop if it is among the tying neighbours, otherwise the first one found in edge order
    #[default]
    PreferStable,
    /// Always take the tying neighbour with the lowest id
    LowestId,
}

impl TieBreak {
    /// Picks between the current best hop and a candidate that reaches the destination at the same cost
    pub fn resolve(self, current: NodeId, candidate: NodeId, previous_hop: Option<NodeId>) -> NodeId {
        match self {
            TieBreak::PreferStable => {
                if previous_hop == Some(candidate) {
                    candidate
                } else {
                    current
                }
            }
            TieBreak::LowestId => current.min(candidate),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SimulationParams {
    /// upper bound on rounds for `Simulation::run_until_converged`
    pub max_rounds: usize,
    pub tie_break: TieBreak,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            max_rounds: 1000,
            tie_break: TieBreak::PreferStable,
        }
    }
}
