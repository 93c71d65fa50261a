use crate::framework::{Cost, NodeId, INF};
use crate::util::is_finite;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutingTableEntry {
    pub destination: NodeId,
    /// the neighbour to forward to, None if the destination is unreachable
    pub next_hop: Option<NodeId>,
    /// INF for an unreachable destination, 0 only for the owner itself
    pub cost: Cost,
}

impl RoutingTableEntry {
    pub fn self_route(node: NodeId) -> Self {
        Self {
            destination: node,
            next_hop: Some(node),
            cost: 0,
        }
    }

    pub fn unreachable(destination: NodeId) -> Self {
        Self {
            destination,
            next_hop: None,
            cost: INF,
        }
    }

    pub fn via(destination: NodeId, next_hop: NodeId, cost: Cost) -> Self {
        Self {
            destination,
            next_hop: Some(next_hop),
            cost,
        }
    }

    pub fn is_reachable(&self) -> bool {
        is_finite(self.cost) && self.next_hop.is_some()
    }
}

impl Display for RoutingTableEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dest: {}, NextHop: ", self.destination)?;
        match self.next_hop {
            Some(hop) => write!(f, "{hop}")?,
            None => write!(f, "-")?,
        }
        if is_finite(self.cost) {
            write!(f, ", Cost: {}", self.cost)
        } else {
            write!(f, ", Cost: INF")
        }
    }
}

/// One node's view of the network: exactly one entry per destination, indexed by destination id
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutingTable {
    owner: NodeId,
    entries: Vec<RoutingTableEntry>,
}

impl RoutingTable {
    /// `entries[d]` must be the entry for destination `d`
    pub(crate) fn from_entries(owner: NodeId, entries: Vec<RoutingTableEntry>) -> Self {
        debug_assert!(entries.iter().enumerate().all(|(d, e)| e.destination == d));
        Self { owner, entries }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn get(&self, destination: NodeId) -> Option<&RoutingTableEntry> {
        self.entries.get(destination)
    }

    pub fn entries(&self) -> &[RoutingTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destinations whose entry differs from `previous`, including ones only present on one side
    pub fn changed_destinations(&self, previous: &RoutingTable) -> Vec<NodeId> {
        let len = self.len().max(previous.len());
        (0..len)
            .filter(|&d| self.get(d) != previous.get(d))
            .collect()
    }
}

impl Display for RoutingTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Router {} table", self.owner)?;
        writeln!(f, "{:>6} {:>8} {:>10}", "Dest", "NextHop", "Cost")?;
        for entry in &self.entries {
            let hop = entry.next_hop.map_or_else(|| "-".to_string(), |h| h.to_string());
            let cost = if is_finite(entry.cost) {
                entry.cost.to_string()
            } else {
                "INF".to_string()
            };
            writeln!(f, "{:>6} {:>8} {:>10}", entry.destination, hop, cost)?;
        }
        Ok(())
    }
}

/// Routing tables of every node, indexed by node id. This is the state advanced by each round.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableState {
    tables: Vec<RoutingTable>,
}

impl TableState {
    /// `tables[x]` must be owned by `x`
    pub(crate) fn from_tables(tables: Vec<RoutingTable>) -> Self {
        debug_assert!(tables.iter().enumerate().all(|(x, t)| t.owner() == x));
        Self { tables }
    }

    pub fn node_count(&self) -> usize {
        self.tables.len()
    }

    pub fn table(&self, node: NodeId) -> Option<&RoutingTable> {
        self.tables.get(node)
    }

    pub fn entry(&self, node: NodeId, destination: NodeId) -> Option<&RoutingTableEntry> {
        self.table(node).and_then(|t| t.get(destination))
    }

    pub fn tables(&self) -> &[RoutingTable] {
        &self.tables
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutingTable> {
        self.tables.iter()
    }
}
