/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Command-line front end for inspecting and converting mind maps.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::Bpaf;
use log::info;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, EditorConfig};
use crate::model::graph::{GraphSnapshot, NodeKind, seeded_snapshot};
use crate::persistence::MapStore;
use crate::search::SearchState;
use crate::services::persistence::{PersistenceError, export_json, import_json};

const DEFAULT_LOG_FILTER: &str = "warn";

/// Inspect, search and convert mind maps
#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
pub struct CliOptions {
    /// TOML config file (defaults to the platform config directory)
    #[bpaf(long, argument("PATH"))]
    pub config: Option<PathBuf>,

    #[bpaf(external(map_source), fallback(MapSource::Example))]
    pub source: MapSource,

    /// Directory of the named-map store
    #[bpaf(long, argument("DIR"))]
    pub store: Option<PathBuf>,

    #[bpaf(external(cli_command))]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Bpaf)]
pub enum MapSource {
    /// Read the map from a JSON file
    Input {
        #[bpaf(short, long, argument("PATH"))]
        input: PathBuf,
    },
    /// Read a map saved in the store
    Named {
        #[bpaf(long("map"), argument("NAME"))]
        name: String,
    },
    /// Use the built-in example map (default)
    Example,
}

#[derive(Debug, Clone, PartialEq, Eq, Bpaf)]
pub enum CliCommand {
    /// Print the map as an indented tree
    #[bpaf(command)]
    Outline,

    /// List nodes whose label contains QUERY (case-insensitive)
    #[bpaf(command)]
    Search {
        #[bpaf(positional("QUERY"))]
        query: String,
    },

    /// Write the map as JSON
    #[bpaf(command)]
    Export {
        #[bpaf(positional("PATH"))]
        path: PathBuf,
    },

    /// Print node and edge counts
    #[bpaf(command)]
    Stats,

    /// Save the map into the store under NAME
    #[bpaf(command)]
    Save {
        #[bpaf(positional("NAME"))]
        name: String,
    },

    /// List maps saved in the store
    #[bpaf(command("maps"))]
    ListMaps,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("no map named '{0}' in the store")]
    UnknownMap(String),

    #[error("no data directory available; pass --store")]
    NoStoreDir,

    #[error("output: {0}")]
    Io(#[from] io::Error),
}

pub fn main() -> ExitCode {
    let options = cli_options().fallback_to_usage().run();
    let config = match EditorConfig::load(options.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mindgraph: {e}");
            return ExitCode::FAILURE;
        },
    };
    if let Err(e) = init_tracing(config.log_filter.as_deref()) {
        eprintln!("mindgraph: {e}");
    }

    let stdout = io::stdout();
    match run(&options, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mindgraph: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the config filter.
fn init_tracing(config_filter: Option<&str>) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .map_err(|e| format!("invalid log filter: {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| format!("failed to set subscriber: {e}"))
}

pub fn run(options: &CliOptions, out: &mut impl Write) -> Result<(), CliError> {
    let snapshot = load_source(options)?;
    match &options.command {
        CliCommand::Outline => write_outline(&snapshot, out)?,
        CliCommand::Search { query } => write_search(&snapshot, query, out)?,
        CliCommand::Export { path } => {
            export_json(path, &snapshot)?;
            writeln!(out, "wrote {}", path.display())?;
        },
        CliCommand::Stats => write_stats(&snapshot, out)?,
        CliCommand::Save { name } => {
            open_store(options)?.save(name, &snapshot)?;
            writeln!(out, "saved '{}'", name.trim())?;
        },
        CliCommand::ListMaps => {
            for name in open_store(options)?.list()? {
                writeln!(out, "{name}")?;
            }
        },
    }
    Ok(())
}

fn load_source(options: &CliOptions) -> Result<GraphSnapshot, CliError> {
    match &options.source {
        MapSource::Input { input } => Ok(import_json(input)?),
        MapSource::Named { name } => open_store(options)?
            .load(name)?
            .ok_or_else(|| CliError::UnknownMap(name.clone())),
        MapSource::Example => Ok(seeded_snapshot()),
    }
}

fn open_store(options: &CliOptions) -> Result<MapStore, CliError> {
    let dir = match &options.store {
        Some(dir) => dir.clone(),
        None => MapStore::default_data_dir().ok_or(CliError::NoStoreDir)?,
    };
    info!("using map store in {}", dir.display());
    Ok(MapStore::open(&dir)?)
}

fn write_outline(snapshot: &GraphSnapshot, out: &mut impl Write) -> io::Result<()> {
    for entry in snapshot.outline() {
        let Some(node) = snapshot.node(&entry.id) else {
            continue;
        };
        writeln!(out, "{}- {}", "  ".repeat(entry.depth), node.label)?;
    }
    Ok(())
}

fn write_search(snapshot: &GraphSnapshot, query: &str, out: &mut impl Write) -> io::Result<()> {
    let state = SearchState::search(snapshot, query);
    if state.matches().is_empty() {
        writeln!(out, "no matches for '{query}'")?;
        return Ok(());
    }
    for id in state.matches() {
        if let Some(node) = snapshot.node(id) {
            writeln!(out, "{id}\t{}", node.label)?;
        }
    }
    Ok(())
}

fn write_stats(snapshot: &GraphSnapshot, out: &mut impl Write) -> io::Result<()> {
    let count = |kind: NodeKind| snapshot.nodes().iter().filter(|n| n.kind == kind).count();
    let outline = snapshot.outline();
    let roots = outline.iter().filter(|entry| entry.depth == 0).count();
    let depth = outline.iter().map(|entry| entry.depth).max().unwrap_or(0);

    writeln!(out, "nodes: {}", snapshot.node_count())?;
    writeln!(
        out,
        "  topics: {}, subtopics: {}, notes: {}",
        count(NodeKind::Topic),
        count(NodeKind::Subtopic),
        count(NodeKind::Note)
    )?;
    writeln!(out, "edges: {}", snapshot.edge_count())?;
    writeln!(out, "roots: {roots}")?;
    writeln!(out, "depth: {depth}")?;
    Ok(())
}
