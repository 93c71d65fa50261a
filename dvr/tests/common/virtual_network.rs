use dvr::concepts::table::{RoutingTableEntry, TableState};
use dvr::concepts::topology::Topology;
use dvr::engine::{initialize, step_with, StepReport};
use dvr::framework::{Cost, NodeId, TieBreak};

/// Topology plus tables, advanced one round per tick
pub struct VirtualNetwork {
    pub topology: Topology,
    pub tables: TableState,
    pub tie_break: TieBreak,
    pub rounds: usize,
}

impl VirtualNetwork {
    pub fn create(node_count: usize, links: &[(NodeId, NodeId, Cost)]) -> VirtualNetwork {
        Self::from_topology(Topology::from_links(node_count, links).unwrap())
    }

    pub fn from_topology(topology: Topology) -> VirtualNetwork {
        VirtualNetwork {
            tables: initialize(&topology),
            topology,
            tie_break: TieBreak::default(),
            rounds: 0,
        }
    }

    /// runs one round and commits it, returns the nodes that changed
    pub fn tick(&mut self) -> Vec<NodeId> {
        let StepReport { tables, changed_nodes } = step_with(&self.tables, &self.topology, self.tie_break);
        self.tables = tables;
        self.rounds += 1;
        changed_nodes
    }

    pub fn tick_n(&mut self, times: usize) {
        for _ in 0..times {
            self.tick();
        }
    }

    /// ticks until a round changes nothing, returns the number of rounds taken
    pub fn converge(&mut self) -> usize {
        for round in 1..=1000 {
            if self.tick().is_empty() {
                return round;
            }
        }
        panic!("network did not converge within 1000 rounds");
    }

    pub fn get_entry(&self, cur: NodeId, dest: NodeId) -> RoutingTableEntry {
        *self
            .tables
            .entry(cur, dest)
            .unwrap_or_else(|| panic!("No entry for {dest} at {cur}"))
    }

    pub fn get_metric_to(&self, cur: NodeId, dest: NodeId) -> Cost {
        self.get_entry(cur, dest).cost
    }

    pub fn get_next_hop(&self, cur: NodeId, dest: NodeId) -> Option<NodeId> {
        self.get_entry(cur, dest).next_hop
    }
}
