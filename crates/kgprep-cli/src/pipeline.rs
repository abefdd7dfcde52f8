//! The full conversion run: train triplets, test triplets, then the graph.

use crate::config::PipelineConfig;
use anyhow::{Context, Result};
use kgprep_ingest::{convert_triplets, index_graph, GraphReport, TripletReport};
use std::fs;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct PipelineSummary {
    pub train: TripletReport,
    pub test: TripletReport,
    pub graph: GraphReport,
}

pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    info!(output_dir = %config.output_dir.display(), "starting conversion");

    let triplet_options = config.triplet_options();

    let train_input = config.train_input();
    let train = convert_triplets(&train_input, &config.train_output_path(), &triplet_options)
        .with_context(|| format!("converting train split {}", train_input.display()))?;

    let test_input = config.test_input();
    let test = convert_triplets(&test_input, &config.test_output_path(), &triplet_options)
        .with_context(|| format!("converting test split {}", test_input.display()))?;

    let kg_input = config.kg_input();
    let graph = index_graph(&kg_input, &config.graph_outputs(), &config.graph_options())
        .with_context(|| format!("indexing knowledge graph {}", kg_input.display()))?;

    Ok(PipelineSummary { train, test, graph })
}
