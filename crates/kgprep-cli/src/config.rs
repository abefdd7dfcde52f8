//! Pipeline configuration.
//!
//! Resolution order: built-in defaults, then an optional JSON file (fields it
//! omits keep their defaults), then explicit command-line flags.

use anyhow::{Context, Result};
use kgprep_ingest::{BlankLines, GraphOptions, GraphOutputs, MalformedLines, TripletOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory the input file names are resolved against.
    pub input_dir: PathBuf,
    pub train_file: PathBuf,
    pub test_file: PathBuf,
    pub kg_file: PathBuf,

    /// Created if missing.
    pub output_dir: PathBuf,
    pub train_output: PathBuf,
    pub test_output: PathBuf,
    pub entity_output: PathBuf,
    pub relation_output: PathBuf,

    pub dedup: bool,
    pub strict_blank_lines: bool,
    pub skip_malformed: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            train_file: PathBuf::from("train_1.txt"),
            test_file: PathBuf::from("test_1.txt"),
            kg_file: PathBuf::from("kg.txt"),
            output_dir: PathBuf::from("processed_dataset"),
            train_output: PathBuf::from("train_triplets.csv"),
            test_output: PathBuf::from("test_triplets.csv"),
            entity_output: PathBuf::from("entities.csv"),
            relation_output: PathBuf::from("relations.csv"),
            dedup: false,
            strict_blank_lines: false,
            skip_malformed: false,
        }
    }
}

/// Command-line overrides; `None`/`false` leaves the configured value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub dedup: bool,
    pub strict_blank_lines: bool,
    pub skip_malformed: bool,
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.input_dir {
            self.input_dir = dir.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        self.dedup |= overrides.dedup;
        self.strict_blank_lines |= overrides.strict_blank_lines;
        self.skip_malformed |= overrides.skip_malformed;
    }

    pub fn train_input(&self) -> PathBuf {
        self.input_dir.join(&self.train_file)
    }

    pub fn test_input(&self) -> PathBuf {
        self.input_dir.join(&self.test_file)
    }

    pub fn kg_input(&self) -> PathBuf {
        self.input_dir.join(&self.kg_file)
    }

    pub fn train_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.train_output)
    }

    pub fn test_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.test_output)
    }

    pub fn graph_outputs(&self) -> GraphOutputs {
        let mut outputs = GraphOutputs::in_dir(&self.output_dir, &self.kg_input());
        outputs.entities = self.output_dir.join(&self.entity_output);
        outputs.relations = self.output_dir.join(&self.relation_output);
        outputs
    }

    pub fn triplet_options(&self) -> TripletOptions {
        triplet_options(self.dedup, self.strict_blank_lines)
    }

    pub fn graph_options(&self) -> GraphOptions {
        graph_options(self.skip_malformed)
    }
}

pub fn triplet_options(dedup: bool, strict_blank_lines: bool) -> TripletOptions {
    TripletOptions {
        blank_lines: if strict_blank_lines {
            BlankLines::Fail
        } else {
            BlankLines::Skip
        },
        dedup,
    }
}

pub fn graph_options(skip_malformed: bool) -> GraphOptions {
    GraphOptions {
        malformed: if skip_malformed {
            MalformedLines::Skip
        } else {
            MalformedLines::Fail
        },
    }
}
