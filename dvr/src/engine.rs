use crate::concepts::table::{RoutingTable, RoutingTableEntry, TableState};
use crate::concepts::topology::Topology;
use crate::framework::{Cost, NodeId, TieBreak, INF};
use crate::util::sum_finite;
use log::{debug, trace};

/// Result of a single synchronous round
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub tables: TableState,
    /// nodes whose table differs from the one they had before the round
    pub changed_nodes: Vec<NodeId>,
}

impl StepReport {
    /// false once the tables have converged
    pub fn changed(&self) -> bool {
        !self.changed_nodes.is_empty()
    }
}

/// Builds the round-0 tables: every node knows itself and its direct neighbours, nothing else.
pub fn initialize(topology: &Topology) -> TableState {
    let tables = topology
        .nodes()
        .map(|x| {
            let entries = topology
                .nodes()
                .map(|y| {
                    if x == y {
                        RoutingTableEntry::self_route(x)
                    } else if let Some(cost) = topology.link_cost(x, y) {
                        RoutingTableEntry::via(y, y, cost)
                    } else {
                        RoutingTableEntry::unreachable(y)
                    }
                })
                .collect();
            RoutingTable::from_entries(x, entries)
        })
        .collect();
    TableState::from_tables(tables)
}

/// Runs one round with the default tie-break rule. Returns the new tables and whether any table changed.
pub fn step(current: &TableState, topology: &Topology) -> (TableState, bool) {
    let report = step_with(current, topology, TieBreak::default());
    let changed = report.changed();
    (report.tables, changed)
}

/// Runs one round of synchronous distance vector exchange.
///
/// Every node's new table is computed only from `previous`, the tables all nodes advertised at the
/// end of the last round. Nothing computed during this round is visible to other nodes until the
/// next call.
pub fn step_with(previous: &TableState, topology: &Topology, tie_break: TieBreak) -> StepReport {
    let mut tables = Vec::with_capacity(topology.node_count());
    let mut changed_nodes = Vec::new();

    for x in topology.nodes() {
        let entries = topology
            .nodes()
            .map(|y| {
                if x == y {
                    RoutingTableEntry::self_route(x)
                } else {
                    best_route(previous, topology, x, y, tie_break)
                }
            })
            .collect();
        let table = RoutingTable::from_entries(x, entries);

        match previous.table(x) {
            Some(old) if *old == table => {}
            Some(old) => {
                trace!("node {x} changed routes to {:?}", table.changed_destinations(old));
                changed_nodes.push(x);
            }
            None => changed_nodes.push(x),
        }
        tables.push(table);
    }

    debug!(
        "round finished, {} of {} tables changed",
        changed_nodes.len(),
        topology.node_count()
    );
    StepReport {
        tables: TableState::from_tables(tables),
        changed_nodes,
    }
}

/// Best route from `x` to `y` over x's outgoing edges, using what each neighbour advertised last round
fn best_route(
    previous: &TableState,
    topology: &Topology,
    x: NodeId,
    y: NodeId,
    tie_break: TieBreak,
) -> RoutingTableEntry {
    let previous_hop = previous.entry(x, y).and_then(|e| e.next_hop);
    let mut best: Option<(Cost, NodeId)> = None;

    for edge in topology.neighbours(x) {
        let advertised = previous.entry(edge.dest, y).map_or(INF, |e| e.cost);
        let Some(total) = sum_finite(edge.cost, advertised) else {
            continue;
        };
        best = match best {
            Some((cost, hop)) if total == cost => {
                Some((cost, tie_break.resolve(hop, edge.dest, previous_hop)))
            }
            Some((cost, _)) if total > cost => best,
            _ => Some((total, edge.dest)),
        };
    }

    match best {
        Some((cost, hop)) => RoutingTableEntry::via(y, hop, cost),
        None => RoutingTableEntry::unreachable(y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concepts::topology::Edge;

    #[test]
    fn initial_tables_only_know_neighbours() {
        let topology = Topology::from_links(3, &[(0, 1, 5)]).unwrap();
        let tables = initialize(&topology);
        assert_eq!(tables.node_count(), 3);
        assert_eq!(tables.entry(0, 0), Some(&RoutingTableEntry::self_route(0)));
        assert_eq!(tables.entry(0, 1), Some(&RoutingTableEntry::via(1, 1, 5)));
        assert_eq!(tables.entry(1, 0), Some(&RoutingTableEntry::via(0, 0, 5)));
        assert_eq!(tables.entry(0, 2), Some(&RoutingTableEntry::unreachable(2)));
        assert_eq!(tables.entry(2, 0), Some(&RoutingTableEntry::unreachable(0)));
        assert_eq!(tables.entry(2, 2), Some(&RoutingTableEntry::self_route(2)));
    }

    #[test]
    fn directed_edges_are_one_way() {
        let topology = Topology::from_edges(2, vec![Edge::new(0, 1, 2)]).unwrap();
        let (tables, changed) = step(&initialize(&topology), &topology);
        assert!(!changed);
        assert_eq!(tables.entry(0, 1), Some(&RoutingTableEntry::via(1, 1, 2)));
        assert_eq!(tables.entry(1, 0), Some(&RoutingTableEntry::unreachable(0)));
    }

    #[test]
    fn step_reads_only_the_snapshot() {
        // 0 - 1 - 2 - 3, node 0 must not learn about 3 in the first round
        let topology = Topology::from_links(4, &[(0, 1, 1), (1, 2, 1), (2, 3, 1)]).unwrap();
        let (round1, changed) = step(&initialize(&topology), &topology);
        assert!(changed);
        assert_eq!(round1.entry(0, 2), Some(&RoutingTableEntry::via(2, 1, 2)));
        assert_eq!(round1.entry(0, 3), Some(&RoutingTableEntry::unreachable(3)));
        let (round2, _) = step(&round1, &topology);
        assert_eq!(round2.entry(0, 3), Some(&RoutingTableEntry::via(3, 1, 3)));
    }

    #[test]
    fn stable_tie_break_keeps_previous_hop() {
        // 0 reaches 3 through 1 or 2 at equal cost
        let topology =
            Topology::from_links(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]).unwrap();
        let (round1, _) = step(&initialize(&topology), &topology);
        // first neighbour in edge order wins when there is no previous hop
        assert_eq!(round1.entry(0, 3), Some(&RoutingTableEntry::via(3, 1, 2)));

        // pretend the previous round went through 2
        let mut tables: Vec<RoutingTable> = round1.tables().to_vec();
        let mut entries = tables[0].entries().to_vec();
        entries[3] = RoutingTableEntry::via(3, 2, 2);
        tables[0] = RoutingTable::from_entries(0, entries);
        let seeded = TableState::from_tables(tables);

        let stable = step_with(&seeded, &topology, TieBreak::PreferStable);
        assert_eq!(stable.tables.entry(0, 3), Some(&RoutingTableEntry::via(3, 2, 2)));
        let lowest = step_with(&seeded, &topology, TieBreak::LowestId);
        assert_eq!(lowest.tables.entry(0, 3), Some(&RoutingTableEntry::via(3, 1, 2)));
        assert_eq!(lowest.changed_nodes, vec![0]);
    }

    #[test]
    fn lowest_id_ignores_edge_order() {
        let topology =
            Topology::from_links(4, &[(0, 2, 1), (0, 1, 1), (1, 3, 1), (2, 3, 1)]).unwrap();
        let (stable, _) = step(&initialize(&topology), &topology);
        assert_eq!(stable.entry(0, 3).and_then(|e| e.next_hop), Some(2));
        let lowest = step_with(&initialize(&topology), &topology, TieBreak::LowestId);
        assert_eq!(lowest.tables.entry(0, 3).and_then(|e| e.next_hop), Some(1));
    }

    #[test]
    fn missing_snapshot_counts_as_change() {
        let topology = Topology::from_links(2, &[(0, 1, 1)]).unwrap();
        let report = step_with(&TableState::default(), &topology, TieBreak::default());
        assert_eq!(report.changed_nodes, vec![0, 1]);
        assert_eq!(report.tables.entry(0, 1), Some(&RoutingTableEntry::unreachable(1)));
        assert_eq!(report.tables.entry(1, 1), Some(&RoutingTableEntry::self_route(1)));
    }

    #[test]
    fn costs_near_infinity_stay_unreachable() {
        let topology = Topology::from_links(3, &[(0, 1, INF - 1), (1, 2, INF - 1)]).unwrap();
        let (tables, _) = step(&initialize(&topology), &topology);
        assert_eq!(tables.entry(0, 2), Some(&RoutingTableEntry::unreachable(2)));
        assert_eq!(tables.entry(0, 1), Some(&RoutingTableEntry::via(1, 1, INF - 1)));
    }
}
