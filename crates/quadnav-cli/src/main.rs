// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Quadnav developer CLI.
//!
//! `quadnav route` answers the queries of a scenario file, one JSON object
//! per line on stdout. `quadnav tree` prints the quadtree outline. Both take
//! `--config <file>` to replace the scenario's embedded config with a
//! standalone `NavConfig` JSON file. Logs go to stderr and are filtered by
//! `RUST_LOG`.

mod scenario;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quadnav_geom::Point;
use quadnav_nav::{polyline_length, Algorithm, NavConfig, QuadPathfinder};
use quadnav_space::QuadTree;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "quadnav", version, about = "Quadtree navigation scenarios")]
struct Cli {
    /// Log at debug level (overridable with RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// `NavConfig` JSON file that replaces the scenario's config.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Route every query in a scenario.
    Route(RouteArgs),
    /// Print the quadtree built from a scenario.
    Tree(TreeArgs),
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Scenario JSON file.
    scenario: PathBuf,
    /// Override the scenario's algorithm (dijkstra, floyd, A*, Theta*).
    #[arg(long, short)]
    algorithm: Option<Algorithm>,
}

#[derive(Args, Debug)]
struct TreeArgs {
    /// Scenario JSON file.
    scenario: PathBuf,
}

#[derive(Serialize)]
struct RouteLine {
    start: [f64; 2],
    goal: [f64; 2],
    algorithm: String,
    found: bool,
    length: f64,
    points: Vec<[f64; 2]>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Route(args) => run_route(&args, config),
        Commands::Tree(args) => run_tree(&args, config),
    }
}

fn load_scenario(path: &Path, config: Option<&Path>) -> Result<Scenario> {
    let mut scenario = Scenario::load(path)?;
    if let Some(config) = config {
        scenario.config = NavConfig::from_path(config)
            .with_context(|| format!("read config {}", config.display()))?;
        info!(config = %config.display(), "scenario config replaced");
    }
    Ok(scenario)
}

fn run_route(args: &RouteArgs, config: Option<&Path>) -> Result<()> {
    let scenario = load_scenario(&args.scenario, config)?;
    let world = scenario.world()?;
    let algorithm = args.algorithm.unwrap_or(scenario.config.algorithm);
    let mut finder = QuadPathfinder::new(
        world.tree(),
        world.store(),
        algorithm,
        &scenario.config.build,
    )
    .context("build navigation graph")?;
    info!(
        %algorithm,
        waypoints = finder.graph().vertex_count(),
        edges = finder.graph().edge_count(),
        queries = scenario.queries.len(),
        "navigation graph ready"
    );

    let mut out = io::stdout().lock();
    for query in &scenario.queries {
        let route = finder
            .find_path(Point::from(query.start), Point::from(query.goal))
            .with_context(|| format!("route {:?} -> {:?}", query.start, query.goal))?;
        let line = RouteLine {
            start: query.start,
            goal: query.goal,
            algorithm: algorithm.to_string(),
            found: !route.is_empty(),
            length: polyline_length(&route),
            points: route.iter().map(|p| [p.x, p.y]).collect(),
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }
    Ok(())
}

fn run_tree(args: &TreeArgs, config: Option<&Path>) -> Result<()> {
    let scenario = load_scenario(&args.scenario, config)?;
    let world = scenario.world()?;
    let mut out = io::stdout().lock();
    write_tree(&mut out, world.tree())?;
    Ok(())
}

fn write_tree(out: &mut impl Write, tree: &QuadTree) -> io::Result<()> {
    for id in tree.dfs() {
        let Some(node) = tree.node(id) else { continue };
        let rect = node.rect();
        writeln!(
            out,
            "{:indent$}{id} depth={} {} {} sprites={}",
            "",
            node.depth(),
            rect.bottom_left(),
            rect.top_right(),
            node.sprites().len(),
            indent = 2 * node.depth() as usize,
        )?;
    }
    Ok(())
}
