use crate::concepts::table::TableState;
use crate::feedback::PathError;
use crate::framework::NodeId;
use std::collections::HashSet;

/// Follows next hops from `source` until `destination` is reached.
///
/// Loops are reported rather than followed, they are normal while the tables are still converging.
pub fn resolve_path(
    tables: &TableState,
    source: NodeId,
    destination: NodeId,
) -> Result<Vec<NodeId>, PathError> {
    let n = tables.node_count();
    for id in [source, destination] {
        if id >= n {
            return Err(PathError::UnknownNode(id));
        }
    }

    let mut path = Vec::new();
    let mut visited = HashSet::new();
    let mut current = source;
    loop {
        path.push(current);
        if current == destination {
            return Ok(path);
        }
        visited.insert(current);

        let hop = tables
            .entry(current, destination)
            .filter(|e| e.is_reachable())
            .and_then(|e| e.next_hop)
            .ok_or(PathError::NoRoute { at: current, destination })?;
        if hop == current || hop >= n {
            return Err(PathError::RoutingAnomaly { at: current, destination });
        }
        if visited.contains(&hop) {
            return Err(PathError::RoutingLoop { at: hop, destination });
        }
        current = hop;
    }
}
