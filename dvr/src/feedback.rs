use thiserror::Error;

use crate::framework::{Cost, NodeId};

/// Rejected topology edits. The topology is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("node id {id} is out of range, valid ids are 0..{node_count}")]
    NodeOutOfRange { id: NodeId, node_count: usize },
    #[error("a link must join two different nodes, got {0} on both ends")]
    SameEndpoints(NodeId),
    #[error("link cost must be positive and below the infinity sentinel, got {0}")]
    InvalidCost(Cost),
    #[error("link {a} <-> {b} already exists")]
    DuplicateLink { a: NodeId, b: NodeId },
    #[error("link {a} <-> {b} not found")]
    LinkNotFound { a: NodeId, b: NodeId },
}

/// Reasons a path cannot be walked through the current tables.
/// These are expected mid-convergence and should be shown to the user, not treated as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("no route from {at} to {destination} in the current tables")]
    NoRoute { at: NodeId, destination: NodeId },
    /// The walk came back to a node it already passed through
    #[error("routing loop detected at {at} while routing to {destination}")]
    RoutingLoop { at: NodeId, destination: NodeId },
    /// A node named itself (or a node that does not exist) as next hop for another destination
    #[error("routing error at {at}, bad next hop for {destination}")]
    RoutingAnomaly { at: NodeId, destination: NodeId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Tables were still changing after the configured number of rounds.
    /// Without split horizon this is what count-to-infinity looks like after a partition.
    #[error("tables did not converge within {rounds} rounds")]
    RoundLimit { rounds: usize },
}
