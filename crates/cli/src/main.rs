//! Propagator CLI - watershed drainage-network analysis

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use propagator_algorithms::network::{
    find_edges, find_tops, mark_edges, propagate_scores, remove_orphan_subcatchments,
    trace_upstream,
};
use propagator_core::io::{read_attribute_table, write_attribute_table, TableMapping};
use propagator_core::{AttributeValue, SubcatchmentTable};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "propagator")]
#[command(author, version, about = "Watershed drainage-network analysis", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Column mapping between the external attribute table and the engine
#[derive(Args)]
struct MappingArgs {
    /// Name of the unique-id column
    #[arg(long, default_value = "ID")]
    id_col: String,

    /// Name of the downstream-reference column
    #[arg(long, default_value = "DS_ID")]
    ds_col: String,
}

impl MappingArgs {
    fn to_mapping(&self) -> TableMapping {
        TableMapping::new(&self.id_col, &self.ds_col)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about an attribute table
    Info {
        /// Input attribute table (JSON)
        input: PathBuf,
        /// Terminal sentinel marking the network outfall
        #[arg(short, long, default_value = "Ocean")]
        outfall: String,
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// Select all subcatchments upstream of a starting subcatchment
    Trace {
        /// Input attribute table (JSON)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Id of the subcatchment to trace upstream from
        #[arg(short, long)]
        start: String,
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// Select subcatchments draining directly to the outfall
    Edges {
        /// Input attribute table (JSON)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Terminal sentinel marking the network outfall
        #[arg(short, long, default_value = "Ocean")]
        outfall: String,
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// Select headwater subcatchments that nothing drains into
    Tops {
        /// Input attribute table (JSON)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// Fill no-data cells from the nearest valid downstream measurement
    Propagate {
        /// Input attribute table (JSON)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Value column to propagate (repeat for several columns)
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,
        /// Ignored-value sentinel as a JSON literal: null, 0, -99.9, "None"
        #[arg(short, long, default_value = "null")]
        ignored: String,
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// Remove subcatchments whose path to the outfall is broken
    Prune {
        /// Input attribute table (JSON)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Terminal sentinel every retained row must reach
        #[arg(short, long, default_value = "Ocean")]
        outfall: String,
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// Relabel downstream references that point outside the table
    MarkEdges {
        /// Input attribute table (JSON)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Sentinel written over every dangling downstream reference
        #[arg(short, long, default_value = "EDGE")]
        edge: String,
        #[command(flatten)]
        mapping: MappingArgs,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_table(path: &PathBuf, mapping: &MappingArgs) -> Result<SubcatchmentTable> {
    let pb = spinner("Reading table...");
    let table = read_attribute_table(path, &mapping.to_mapping())
        .with_context(|| format!("Failed to read attribute table {}", path.display()))?;
    pb.finish_and_clear();
    info!(
        "Input: {} records, value columns: {}",
        table.len(),
        table.columns().join(", ")
    );
    Ok(table)
}

fn write_result(table: &SubcatchmentTable, path: &PathBuf, mapping: &MappingArgs) -> Result<()> {
    let pb = spinner("Writing output...");
    write_attribute_table(table, path, &mapping.to_mapping())
        .with_context(|| format!("Failed to write attribute table {}", path.display()))?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

/// Parse the ignored sentinel as a JSON literal so numeric sentinels keep
/// their type; anything that is not valid JSON is taken as plain text.
fn parse_ignored(s: &str) -> AttributeValue {
    serde_json::from_str(s).unwrap_or_else(|_| AttributeValue::Text(s.to_string()))
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info {
            input,
            outfall,
            mapping,
        } => {
            let table = read_table(&input, &mapping)?;
            let edges = find_edges(&table, &outfall);
            let tops = find_tops(&table);

            println!("File: {}", input.display());
            println!("Records: {}", table.len());
            println!("Value columns: {}", table.columns().join(", "));
            println!("Outfall sentinel: {}", outfall);
            println!("  Edges (draining to outfall): {}", edges.len());
            println!("  Tops (headwaters): {}", tops.len());
        }

        Commands::Trace {
            input,
            output,
            start,
            mapping,
        } => {
            let table = read_table(&input, &mapping)?;
            let started = Instant::now();
            let upstream = trace_upstream(&table, &start)
                .with_context(|| format!("Failed to trace upstream of {}", start))?;
            info!("{} of {} records upstream of {}", upstream.len(), table.len(), start);
            write_result(&upstream, &output, &mapping)?;
            done("Upstream trace", &output, started.elapsed());
        }

        Commands::Edges {
            input,
            output,
            outfall,
            mapping,
        } => {
            let table = read_table(&input, &mapping)?;
            let started = Instant::now();
            let edges = find_edges(&table, &outfall);
            info!("{} edge records", edges.len());
            write_result(&edges, &output, &mapping)?;
            done("Edges", &output, started.elapsed());
        }

        Commands::Tops {
            input,
            output,
            mapping,
        } => {
            let table = read_table(&input, &mapping)?;
            let started = Instant::now();
            let tops = find_tops(&table);
            info!("{} headwater records", tops.len());
            write_result(&tops, &output, &mapping)?;
            done("Tops", &output, started.elapsed());
        }

        Commands::Propagate {
            input,
            output,
            columns,
            ignored,
            mapping,
        } => {
            let table = read_table(&input, &mapping)?;
            let sentinel = parse_ignored(&ignored);
            let started = Instant::now();

            // Columns are independent, so they propagate one at a time
            let mut result = table;
            for column in &columns {
                let pb = spinner(&format!("Propagating {}...", column));
                result = propagate_scores(&result, column, &sentinel)
                    .with_context(|| format!("Failed to propagate column {}", column))?;
                pb.finish_and_clear();
                info!("Propagated {}", column);
            }

            write_result(&result, &output, &mapping)?;
            done("Propagated scores", &output, started.elapsed());
        }

        Commands::Prune {
            input,
            output,
            outfall,
            mapping,
        } => {
            let table = read_table(&input, &mapping)?;
            let started = Instant::now();
            let pruned = remove_orphan_subcatchments(&table, &outfall)
                .context("Failed to remove orphan subcatchments")?;
            info!(
                "{} of {} records still reach {}",
                pruned.len(),
                table.len(),
                outfall
            );
            write_result(&pruned, &output, &mapping)?;
            done("Pruned table", &output, started.elapsed());
        }

        Commands::MarkEdges {
            input,
            output,
            edge,
            mapping,
        } => {
            let table = read_table(&input, &mapping)?;
            let started = Instant::now();
            let marked = mark_edges(&table, &edge);
            write_result(&marked, &output, &mapping)?;
            done("Marked table", &output, started.elapsed());
        }
    }

    Ok(())
}
