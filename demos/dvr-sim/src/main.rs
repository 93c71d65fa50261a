mod graph_parse;
mod sample;

use std::fs;
use std::io::{self, ErrorKind};
use std::str::FromStr;

use anyhow::{anyhow, Context};
use dvr::concepts::topology::CostUpdate;
use dvr::framework::SimulationParams;
use dvr::simulation::Simulation;
use log::{error, info, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use simplelog::*;

const CONFIG_PATH: &str = "./dvr-sim.json";

fn parse_params(read: io::Result<String>) -> anyhow::Result<SimulationParams> {
    match read {
        Ok(file) => serde_json::from_str(&file).with_context(|| format!("failed to parse {CONFIG_PATH}")),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(SimulationParams::default()),
        Err(err) => Err(err).with_context(|| format!("unable to read {CONFIG_PATH}")),
    }
}

fn load_params() -> anyhow::Result<SimulationParams> {
    parse_params(fs::read_to_string(CONFIG_PATH))
}

fn arg<T>(split: &[&str], i: usize) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = split.get(i).ok_or_else(|| anyhow!("Missing argument {i} for {}", split[0]))?;
    value.parse().with_context(|| format!("{value:?} is not a valid number"))
}

fn print_tables(sim: &Simulation, node: Option<usize>) -> anyhow::Result<()> {
    match node {
        Some(id) => {
            let table = sim.tables().table(id).ok_or_else(|| anyhow!("Node {id} does not exist"))?;
            println!("{table}");
        }
        None => {
            for table in sim.tables().iter() {
                println!("{table}");
            }
        }
    }
    Ok(())
}

/// runs a single command, returns false when the user asked to exit
fn handle_command(sim: &mut Simulation, split: &[&str]) -> anyhow::Result<bool> {
    match split[0] {
        "help" => {
            info!(
                r#"Help:
                - help -- shows this page
                - exit -- exits the simulator
                [simulation]
                - step -- runs one round of vector exchange
                - run -- runs rounds until the tables converge
                - reset -- restores the starting topology and tables
                - table [node] -- prints one or all routing tables
                - check -- compares the current tables with Bellman-Ford
                [links]
                - links -- lists all links
                - add <a> <b> <cost> -- adds a link
                - remove <a> <b> -- removes a link
                - update <a> <b> <cost> -- changes the cost of a link
                [routing]
                - path <src> <dest> -- follows next hops through the current tables
                "#
            );
        }
        "exit" => return Ok(false),
        "step" => {
            if sim.is_converged() {
                info!("Already converged.");
            } else if sim.step() {
                info!(
                    "Step {} completed, changed nodes: {:?}",
                    sim.step_count(),
                    sim.last_changed_nodes()
                );
            } else {
                info!("No changes in step {}, DVR converged!", sim.step_count());
            }
        }
        "run" => match sim.run_until_converged() {
            Ok(rounds) => info!("DVR converged after {rounds} more rounds (step {})", sim.step_count()),
            Err(err) => warn!("{err}, stopped at step {}", sim.step_count()),
        },
        "reset" => {
            sim.reset();
            info!("Simulation reset.");
        }
        "table" => {
            let node = if split.len() > 1 { Some(arg(split, 1)?) } else { None };
            print_tables(sim, node)?;
        }
        "check" => {
            let oracle = sim.oracle_tables();
            let mut mismatches = 0;
            for (table, expected) in sim.tables().iter().zip(oracle.iter()) {
                for (entry, best) in table.entries().iter().zip(expected.entries()) {
                    if entry.cost != best.cost {
                        mismatches += 1;
                        info!("{} -> {}: {entry} (best cost {})", table.owner(), entry.destination, best.cost);
                    }
                }
            }
            if mismatches == 0 {
                info!("All costs match Bellman-Ford.");
            } else {
                warn!("{mismatches} entries differ from Bellman-Ford, keep stepping.");
            }
        }
        "links" => {
            for edge in sim.topology().edges().iter().filter(|e| e.src < e.dest) {
                info!("{} <-> {} cost {}", edge.src, edge.dest, edge.cost);
            }
        }
        "add" => {
            let (a, b, cost) = (arg(split, 1)?, arg(split, 2)?, arg(split, 3)?);
            sim.add_link(a, b, cost)?;
        }
        "remove" => {
            let (a, b) = (arg(split, 1)?, arg(split, 2)?);
            sim.remove_link(a, b)?;
        }
        "update" => {
            let (a, b, cost) = (arg(split, 1)?, arg(split, 2)?, arg(split, 3)?);
            if sim.update_cost(a, b, cost)? == CostUpdate::Unchanged {
                info!("Cost is already {cost}.");
            }
        }
        "path" => {
            let (src, dest): (usize, usize) = (arg(split, 1)?, arg(split, 2)?);
            let path = sim.resolve_path(src, dest)?;
            if let Some((u, v)) = sim.topology().missing_segment(&path) {
                warn!("Path segment {u}-{v} no longer exists!");
            }
            let hops: Vec<String> = path.iter().map(|x| x.to_string()).collect();
            info!("Path: {}", hops.join(" -> "));
        }
        &_ => {
            error!("Unknown command, please try again or type \"help\" for help.")
        }
    }
    Ok(true)
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v");
    args.retain(|a| a != "-v");

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    info!("Starting Distance Vector Routing Simulator");

    let params = load_params()?;
    let topology = match args.first() {
        Some(path) => {
            let file = fs::read_to_string(path).with_context(|| format!("unable to read {path}"))?;
            graph_parse::load(&file)?
        }
        None => {
            info!("No graph file given, using the sample topology");
            sample::sample_topology()?
        }
    };
    info!(
        "Loaded {} nodes and {} links",
        topology.node_count(),
        topology.edges().len() / 2
    );

    let mut sim = Simulation::new(topology, params);
    info!("Type \"help\" for help");

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline("dvr> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let _ = rl.add_history_entry(line.as_str());

        let split: Vec<&str> = line.split_whitespace().collect();
        if split.is_empty() {
            continue;
        }
        match handle_command(&mut sim, &split) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => error!("{err:#}"),
        }
    }

    Ok(())
}
