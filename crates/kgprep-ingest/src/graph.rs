//! Knowledge-graph triples -> entity/relation mappings + indexed edges.
//!
//! One pass over the input collects the raw triples (in input order) together
//! with the distinct entity labels (heads and tails) and relation labels. Each
//! label set gets its own [`IdMapping`]; edges are then resolved against those
//! mappings.
//!
//! Everything is computed before any table is opened for writing, so a
//! malformed input never produces partial output.

use crate::error::{IngestError, Result};
use crate::mapping::IdMapping;
use crate::tables::{lines, read_input, write_mapping, write_table};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const EDGE_HEADER: [&str; 3] = ["head", "relation", "tail"];

pub const ENTITIES_FILE: &str = "entities.csv";
pub const RELATIONS_FILE: &str = "relations.csv";

const PROCESSED_SUFFIX: &str = "_processed.csv";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawTriple {
    pub head: String,
    pub relation: String,
    pub tail: String,
}

impl RawTriple {
    pub fn new(
        head: impl Into<String>,
        relation: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IndexedEdge {
    pub head: u32,
    pub relation: u32,
    pub tail: u32,
}

/// Policy for lines that do not split into exactly three tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLines {
    /// Abort the run with [`IngestError::Format`].
    #[default]
    Fail,
    /// Log and skip the line.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphOptions {
    pub malformed: MalformedLines,
}

/// Result of scanning a triple file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleScan {
    pub triples: Vec<RawTriple>,
    /// Lines dropped under [`MalformedLines::Skip`].
    pub skipped: usize,
}

/// Split triple-file text into raw triples, in input order.
///
/// `source` is only used to label errors and warnings.
pub fn parse_triples(source: &Path, text: &str, options: &GraphOptions) -> Result<TripleScan> {
    let mut scan = TripleScan::default();

    for (idx, line) in lines(text).enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [head, relation, tail] => scan.triples.push(RawTriple::new(*head, *relation, *tail)),
            _ => match options.malformed {
                MalformedLines::Fail => {
                    return Err(IngestError::Format {
                        path: source.to_path_buf(),
                        line: idx + 1,
                        found: tokens.len(),
                    })
                }
                MalformedLines::Skip => {
                    warn!(
                        path = %source.display(),
                        line = idx + 1,
                        found = tokens.len(),
                        "skipping malformed triple line"
                    );
                    scan.skipped += 1;
                }
            },
        }
    }

    Ok(scan)
}

/// Entity + relation mappings and the edges resolved through them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedGraph {
    pub entities: IdMapping,
    pub relations: IdMapping,
    /// One edge per raw triple, in input order.
    pub edges: Vec<IndexedEdge>,
}

impl IndexedGraph {
    pub fn build(triples: &[RawTriple]) -> Result<Self> {
        let mut entity_labels: BTreeSet<&str> = BTreeSet::new();
        let mut relation_labels: BTreeSet<&str> = BTreeSet::new();
        for t in triples {
            entity_labels.insert(&t.head);
            entity_labels.insert(&t.tail);
            relation_labels.insert(&t.relation);
        }

        let entities = IdMapping::from_labels(entity_labels)?;
        let relations = IdMapping::from_labels(relation_labels)?;

        let edges = triples
            .iter()
            .map(|t| -> Result<IndexedEdge> {
                Ok(IndexedEdge {
                    head: lookup(&entities, &t.head)?,
                    relation: lookup(&relations, &t.relation)?,
                    tail: lookup(&entities, &t.tail)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entities,
            relations,
            edges,
        })
    }

    /// Map an edge back to its labels. `None` if any id is out of range.
    pub fn resolve(&self, edge: &IndexedEdge) -> Option<RawTriple> {
        Some(RawTriple::new(
            self.entities.label(edge.head)?,
            self.relations.label(edge.relation)?,
            self.entities.label(edge.tail)?,
        ))
    }
}

fn lookup(mapping: &IdMapping, label: &str) -> Result<u32> {
    mapping.id(label).ok_or_else(|| IngestError::UnmappedLabel {
        label: label.to_string(),
    })
}

/// Edge table name for a triple file: `kg.txt` -> `kg_processed.csv`.
pub fn edges_file_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("{stem}{PROCESSED_SUFFIX}"))
}

/// Where [`index_graph`] writes its three tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOutputs {
    pub entities: PathBuf,
    pub relations: PathBuf,
    pub edges: PathBuf,
}

impl GraphOutputs {
    /// Default layout inside `dir`: `entities.csv`, `relations.csv` and the
    /// edge table named after `input`.
    pub fn in_dir(dir: &Path, input: &Path) -> Self {
        Self {
            entities: dir.join(ENTITIES_FILE),
            relations: dir.join(RELATIONS_FILE),
            edges: dir.join(edges_file_name(input)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphReport {
    pub entities: usize,
    pub relations: usize,
    pub edges: usize,
    pub skipped: usize,
}

/// Read a triple file, index it, and write entity, relation and edge tables.
pub fn index_graph(
    input: &Path,
    outputs: &GraphOutputs,
    options: &GraphOptions,
) -> Result<GraphReport> {
    let text = read_input(input)?;
    let scan = parse_triples(input, &text, options)?;
    let graph = IndexedGraph::build(&scan.triples)?;

    write_mapping(&outputs.entities, &graph.entities)?;
    info!(
        path = %outputs.entities.display(),
        count = graph.entities.len(),
        "saved entities"
    );

    write_mapping(&outputs.relations, &graph.relations)?;
    info!(
        path = %outputs.relations.display(),
        count = graph.relations.len(),
        "saved relations"
    );

    write_table(&outputs.edges, Some(&EDGE_HEADER[..]), &graph.edges)?;
    info!(
        path = %outputs.edges.display(),
        count = graph.edges.len(),
        "saved indexed edges"
    );

    Ok(GraphReport {
        entities: graph.entities.len(),
        relations: graph.relations.len(),
        edges: graph.edges.len(),
        skipped: scan.skipped,
    })
}
