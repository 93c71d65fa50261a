//! Batch Bellman-Ford, used to check what the round based engine converges to.
//!
//! This computes final shortest paths directly. It agrees with the step engine once the engine has
//! converged, but says nothing about the intermediate rounds.

use crate::concepts::table::{RoutingTable, RoutingTableEntry, TableState};
use crate::concepts::topology::{Edge, Topology};
use crate::feedback::TopologyError;
use crate::framework::{Cost, NodeId, INF};
use crate::util::{is_finite, sum_inf};

/// Single source result, both vectors are indexed by destination
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    pub dist: Vec<Cost>,
    /// first hop from the source, None for unreachable destinations and for the source itself
    pub next_hop: Vec<Option<NodeId>>,
}

pub fn shortest_paths(topology: &Topology, source: NodeId) -> Result<ShortestPaths, TopologyError> {
    let n = topology.node_count();
    if source >= n {
        return Err(TopologyError::NodeOutOfRange { id: source, node_count: n });
    }
    let mut dist = vec![INF; n];
    let mut next_hop = vec![None; n];
    dist[source] = 0;

    // edges naming a node outside 0..n are ignored
    let edges: Vec<&Edge> = topology.edges().iter().filter(|e| e.src < n && e.dest < n).collect();

    for edge in edges.iter().filter(|e| e.src == source) {
        next_hop[edge.dest] = Some(edge.dest);
    }

    // costs are strictly positive, no negative cycle pass needed
    for _ in 1..n {
        for edge in &edges {
            if !is_finite(dist[edge.src]) {
                continue;
            }
            let candidate = sum_inf(dist[edge.src], edge.cost);
            if candidate < dist[edge.dest] {
                dist[edge.dest] = candidate;
                next_hop[edge.dest] = if edge.src == source {
                    Some(edge.dest)
                } else {
                    next_hop[edge.src]
                };
            }
        }
    }

    Ok(ShortestPaths { dist, next_hop })
}

/// Runs `shortest_paths` from every node and lays the result out like the engine's tables
pub fn all_pairs_shortest_paths(topology: &Topology) -> TableState {
    let tables = topology
        .nodes()
        .map(|x| {
            let entries = match shortest_paths(topology, x) {
                Ok(paths) => topology
                    .nodes()
                    .map(|y| match (paths.dist[y], paths.next_hop[y]) {
                        _ if x == y => RoutingTableEntry::self_route(x),
                        (cost, Some(hop)) if is_finite(cost) => RoutingTableEntry::via(y, hop, cost),
                        _ => RoutingTableEntry::unreachable(y),
                    })
                    .collect(),
                // x always comes from topology.nodes()
                Err(_) => topology.nodes().map(RoutingTableEntry::unreachable).collect(),
            };
            RoutingTable::from_entries(x, entries)
        })
        .collect();
    TableState::from_tables(tables)
}
