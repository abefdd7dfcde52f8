//! kgprep CLI
//!
//! Converts recommendation datasets into tabular form:
//! - Adjacency lists (`<user> <item>...`) -> `user,item,rating` triplets
//! - Knowledge-graph triples (`<head> <relation> <tail>`) -> entity/relation
//!   id mappings plus an integer-indexed edge table

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use kgprep_ingest::{convert_triplets, index_graph, GraphOutputs};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod pipeline;

use config::{graph_options, triplet_options, Overrides, PipelineConfig};

#[derive(Parser)]
#[command(name = "kgprep")]
#[command(
    author,
    version,
    about = "kgprep: interaction-list and knowledge-graph dataset conversion"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full conversion: train + test triplets, then the knowledge graph.
    Run(RunArgs),

    /// Convert one adjacency-list file into a `user,item,rating` table.
    Triplets {
        /// Input adjacency list (`<user> <item_1> <item_2> ...` per line)
        input: PathBuf,
        /// Output CSV
        #[arg(short, long)]
        out: PathBuf,
        /// Drop repeated (user, item) pairs
        #[arg(long)]
        dedup: bool,
        /// Fail on empty lines instead of skipping them
        #[arg(long)]
        strict_blank_lines: bool,
    },

    /// Index one triple file into entities.csv, relations.csv and `<stem>_processed.csv`.
    Index {
        /// Input triples (`<head> <relation> <tail>` per line)
        input: PathBuf,
        /// Output directory (created if missing)
        #[arg(long)]
        out_dir: PathBuf,
        /// Skip lines without exactly three tokens instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// JSON config file; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding train/test/kg inputs
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// Directory for all outputs
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Drop repeated (user, item) pairs
    #[arg(long)]
    dedup: bool,
    /// Fail on empty adjacency lines instead of skipping them
    #[arg(long)]
    strict_blank_lines: bool,
    /// Skip triple lines without exactly three tokens instead of failing
    #[arg(long)]
    skip_malformed: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => cmd_run(args)?,
        Commands::Triplets {
            input,
            out,
            dedup,
            strict_blank_lines,
        } => cmd_triplets(&input, &out, dedup, strict_blank_lines)?,
        Commands::Index {
            input,
            out_dir,
            skip_malformed,
        } => cmd_index(&input, &out_dir, skip_malformed)?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let overrides = Overrides {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        dedup: args.dedup,
        strict_blank_lines: args.strict_blank_lines,
        skip_malformed: args.skip_malformed,
    };
    let config = PipelineConfig::load(args.config.as_deref(), &overrides)?;

    println!(
        "{} {} -> {}",
        "Converting".green().bold(),
        config.input_dir.display(),
        config.output_dir.display()
    );

    let summary = pipeline::run(&config)?;

    println!(
        "  {} train: {} triplets, test: {} triplets",
        "✓".green(),
        summary.train.records,
        summary.test.records
    );
    println!(
        "  {} graph: {} entities, {} relations, {} edges",
        "✓".green(),
        summary.graph.entities,
        summary.graph.relations,
        summary.graph.edges
    );
    if summary.graph.skipped > 0 {
        println!(
            "  {} skipped {} malformed triple line(s)",
            "!".yellow(),
            summary.graph.skipped
        );
    }
    Ok(())
}

fn cmd_triplets(
    input: &PathBuf,
    out: &PathBuf,
    dedup: bool,
    strict_blank_lines: bool,
) -> Result<()> {
    println!("{} {}", "Converting".green().bold(), input.display());

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let report = convert_triplets(input, out, &triplet_options(dedup, strict_blank_lines))
        .with_context(|| format!("converting {}", input.display()))?;

    println!(
        "  {} {} triplets from {} lines -> {}",
        "✓".green(),
        report.records,
        report.lines,
        out.display()
    );
    Ok(())
}

fn cmd_index(input: &PathBuf, out_dir: &PathBuf, skip_malformed: bool) -> Result<()> {
    println!("{} {}", "Indexing".green().bold(), input.display());

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let outputs = GraphOutputs::in_dir(out_dir, input);
    let report = index_graph(input, &outputs, &graph_options(skip_malformed))
        .with_context(|| format!("indexing {}", input.display()))?;

    println!(
        "  {} {} entities, {} relations, {} edges -> {}",
        "✓".green(),
        report.entities,
        report.relations,
        report.edges,
        outputs.edges.display()
    );
    if report.skipped > 0 {
        println!(
            "  {} skipped {} malformed line(s)",
            "!".yellow(),
            report.skipped
        );
    }
    Ok(())
}
