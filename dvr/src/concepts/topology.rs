use crate::feedback::TopologyError;
use crate::framework::{Cost, NodeId};
use crate::util::is_finite;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A directed edge. An undirected link is two edges with matching cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub src: NodeId,
    pub dest: NodeId,
    pub cost: Cost,
}

impl Edge {
    pub fn new(src: NodeId, dest: NodeId, cost: Cost) -> Self {
        Self { src, dest, cost }
    }
}

/// Outcome of a successful `Topology::update_cost`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostUpdate {
    Updated { old: Cost },
    /// the link already had this cost, nothing was touched
    Unchanged,
}

/// Nodes `0..node_count` and the directed edges between them.
///
/// Edge order is significant: the step engine visits neighbours in this order, so edits keep the
/// relative order of untouched edges.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TopologyRepr"))]
pub struct Topology {
    node_count: usize,
    edges: Vec<Edge>,
    /// set by every successful edit, cleared by `take_dirty`
    dirty: bool,
}

/// Unchecked wire form, deserialized topologies go through `Topology::from_edges`
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TopologyRepr {
    node_count: usize,
    edges: Vec<Edge>,
    #[serde(default)]
    dirty: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<TopologyRepr> for Topology {
    type Error = TopologyError;

    fn try_from(repr: TopologyRepr) -> Result<Self, Self::Error> {
        let mut topology = Topology::from_edges(repr.node_count, repr.edges)?;
        topology.dirty = repr.dirty;
        Ok(topology)
    }
}

impl Topology {
    /// A topology with `node_count` isolated nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            dirty: false,
        }
    }

    /// Builds a topology out of undirected `(a, b, cost)` links
    pub fn from_links(node_count: usize, links: &[(NodeId, NodeId, Cost)]) -> Result<Self, TopologyError> {
        let mut topology = Self::new(node_count);
        for &(a, b, cost) in links {
            topology.add_link(a, b, cost)?;
        }
        topology.dirty = false;
        Ok(topology)
    }

    /// Builds a topology out of directed edges, which do not have to come in symmetric pairs.
    /// Duplicate `(src, dest)` pairs are rejected.
    pub fn from_edges(node_count: usize, edges: Vec<Edge>) -> Result<Self, TopologyError> {
        let topology = Self::new(node_count);
        for (i, edge) in edges.iter().enumerate() {
            topology.validate_link(edge.src, edge.dest, edge.cost)?;
            if edges[..i].iter().any(|e| e.src == edge.src && e.dest == edge.dest) {
                return Err(TopologyError::DuplicateLink { a: edge.src, b: edge.dest });
            }
        }
        Ok(Self { edges, ..topology })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn nodes(&self) -> Range<NodeId> {
        0..self.node_count
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of `node`, in edge order
    pub fn neighbours(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.src == node)
    }

    /// Cost of the directed edge `a -> b`, if any
    pub fn link_cost(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.edges.iter().find(|e| e.src == a && e.dest == b).map(|e| e.cost)
    }

    fn has_link(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| (e.src == a && e.dest == b) || (e.src == b && e.dest == a))
    }

    fn check_node(&self, id: NodeId) -> Result<(), TopologyError> {
        if id < self.node_count {
            Ok(())
        } else {
            Err(TopologyError::NodeOutOfRange {
                id,
                node_count: self.node_count,
            })
        }
    }

    fn validate_link(&self, a: NodeId, b: NodeId, cost: Cost) -> Result<(), TopologyError> {
        if a == b {
            return Err(TopologyError::SameEndpoints(a));
        }
        self.check_node(a)?;
        self.check_node(b)?;
        if cost == 0 || !is_finite(cost) {
            return Err(TopologyError::InvalidCost(cost));
        }
        Ok(())
    }

    /// Adds the link `a <-> b` as two directed edges
    pub fn add_link(&mut self, a: NodeId, b: NodeId, cost: Cost) -> Result<(), TopologyError> {
        self.validate_link(a, b, cost)?;
        if self.has_link(a, b) {
            return Err(TopologyError::DuplicateLink { a, b });
        }
        self.edges.push(Edge::new(a, b, cost));
        self.edges.push(Edge::new(b, a, cost));
        self.dirty = true;
        Ok(())
    }

    /// Removes every edge between `a` and `b`, in both directions
    pub fn remove_link(&mut self, a: NodeId, b: NodeId) -> Result<(), TopologyError> {
        self.check_node(a)?;
        self.check_node(b)?;
        if !self.has_link(a, b) {
            return Err(TopologyError::LinkNotFound { a, b });
        }
        self.edges
            .retain(|e| !((e.src == a && e.dest == b) || (e.src == b && e.dest == a)));
        self.dirty = true;
        Ok(())
    }

    /// Sets the cost of the link `a <-> b`. Both directed edges must exist.
    pub fn update_cost(&mut self, a: NodeId, b: NodeId, cost: Cost) -> Result<CostUpdate, TopologyError> {
        self.validate_link(a, b, cost)?;
        let forward = self.edges.iter().position(|e| e.src == a && e.dest == b);
        let backward = self.edges.iter().position(|e| e.src == b && e.dest == a);
        let (Some(forward), Some(backward)) = (forward, backward) else {
            return Err(TopologyError::LinkNotFound { a, b });
        };
        let old = self.edges[forward].cost;
        if old == cost && self.edges[backward].cost == cost {
            return Ok(CostUpdate::Unchanged);
        }
        self.edges[forward].cost = cost;
        self.edges[backward].cost = cost;
        self.dirty = true;
        Ok(CostUpdate::Updated { old })
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the topology changed since the last call, and clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// First consecutive pair of `path` that is no longer joined by a link
    pub fn missing_segment(&self, path: &[NodeId]) -> Option<(NodeId, NodeId)> {
        path.windows(2)
            .map(|w| (w[0], w[1]))
            .find(|&(u, v)| !self.has_link(u, v))
    }
}
