use crate::concepts::table::TableState;
use crate::concepts::topology::{CostUpdate, Topology};
use crate::engine::{initialize, step_with};
use crate::feedback::{PathError, SimulationError, TopologyError};
use crate::framework::{Cost, NodeId, SimulationParams};
use crate::oracle::all_pairs_shortest_paths;
use crate::path::resolve_path;
use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Convergence {
    /// the last round changed something, no round ran yet, or the topology was edited since
    Active,
    /// the last round changed nothing
    Converged,
}

/// Owns a topology and the tables computed over it, and advances them one round at a time.
///
/// Timing is left to the caller: a front-end that animates rounds calls `step` at its own pace and
/// can stop between any two calls.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Simulation {
    initial: Topology,
    topology: Topology,
    tables: TableState,
    step_count: u64,
    state: Convergence,
    last_changed: Vec<NodeId>,
    params: SimulationParams,
}

impl Simulation {
    pub fn new(mut topology: Topology, params: SimulationParams) -> Self {
        topology.take_dirty();
        let tables = initialize(&topology);
        Self {
            initial: topology.clone(),
            topology,
            tables,
            step_count: 0,
            state: Convergence::Active,
            last_changed: Vec::new(),
            params,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn tables(&self) -> &TableState {
        &self.tables
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// rounds committed since creation or the last reset
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn state(&self) -> Convergence {
        self.state
    }

    pub fn is_converged(&self) -> bool {
        self.state == Convergence::Converged
    }

    /// nodes whose table changed in the last committed round
    pub fn last_changed_nodes(&self) -> &[NodeId] {
        &self.last_changed
    }

    /// Runs and commits one round, returns whether any table changed. Does nothing once converged.
    pub fn step(&mut self) -> bool {
        if self.is_converged() {
            debug!("already converged, skipping round");
            return false;
        }
        let report = step_with(&self.tables, &self.topology, self.params.tie_break);
        let changed = report.changed();
        self.tables = report.tables;
        self.last_changed = report.changed_nodes;
        self.step_count += 1;

        if changed {
            debug!("round {} changed nodes {:?}", self.step_count, self.last_changed);
        } else {
            self.state = Convergence::Converged;
            info!("converged after round {}", self.step_count);
        }
        changed
    }

    /// Steps until converged, returns how many rounds it took
    pub fn run_until_converged(&mut self) -> Result<usize, SimulationError> {
        let mut rounds = 0;
        while !self.is_converged() {
            if rounds == self.params.max_rounds {
                return Err(SimulationError::RoundLimit { rounds });
            }
            self.step();
            rounds += 1;
        }
        Ok(rounds)
    }

    fn reactivate_if_edited(&mut self) {
        if self.topology.take_dirty() {
            self.state = Convergence::Active;
        }
    }

    pub fn add_link(&mut self, a: NodeId, b: NodeId, cost: Cost) -> Result<(), TopologyError> {
        self.topology.add_link(a, b, cost)?;
        info!("link added: {a} <-> {b} (cost {cost})");
        self.reactivate_if_edited();
        Ok(())
    }

    pub fn remove_link(&mut self, a: NodeId, b: NodeId) -> Result<(), TopologyError> {
        self.topology.remove_link(a, b)?;
        info!("link removed: {a} <-> {b}");
        self.reactivate_if_edited();
        Ok(())
    }

    pub fn update_cost(&mut self, a: NodeId, b: NodeId, cost: Cost) -> Result<CostUpdate, TopologyError> {
        let update = self.topology.update_cost(a, b, cost)?;
        match update {
            CostUpdate::Updated { old } => info!("link cost updated: {a} <-> {b} ({old} -> {cost})"),
            CostUpdate::Unchanged => info!("link {a} <-> {b} already costs {cost}"),
        }
        self.reactivate_if_edited();
        Ok(update)
    }

    /// Back to the initial topology and round-0 tables
    pub fn reset(&mut self) {
        self.topology = self.initial.clone();
        self.tables = initialize(&self.topology);
        self.step_count = 0;
        self.state = Convergence::Active;
        self.last_changed.clear();
        info!("simulation reset");
    }

    /// Walks the current tables, which may still be mid-convergence
    pub fn resolve_path(&self, source: NodeId, destination: NodeId) -> Result<Vec<NodeId>, PathError> {
        resolve_path(&self.tables, source, destination)
    }

    /// What the tables will look like once converged on the current topology
    pub fn oracle_tables(&self) -> TableState {
        all_pairs_shortest_paths(&self.topology)
    }
}
