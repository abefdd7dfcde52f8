//! Dataset conversion for recommendation + knowledge-graph corpora.
//!
//! Two independent, stateless transformations:
//!
//! - [`triplets`]: adjacency lists (`<user> <item_1> ... <item_k>`) become a
//!   flat `user,item,rating` table with implicit rating `1`.
//! - [`graph`]: raw `<head> <relation> <tail>` triples become two dense id
//!   mappings (entities, relations) plus an integer-indexed edge table.
//!
//! Ids are assigned in sorted label order (see [`IdMapping`]), so the same
//! input always produces byte-identical outputs.
//!
//! Every operation fails fast: the first malformed line aborts the run with a
//! typed [`IngestError`]. Tables are written atomically, so a failed run never
//! leaves a truncated file behind.

pub mod error;
pub mod graph;
pub mod mapping;
pub mod tables;
pub mod triplets;

pub use error::{IngestError, Result};
pub use graph::{
    edges_file_name, index_graph, parse_triples, GraphOptions, GraphOutputs, GraphReport,
    IndexedEdge, IndexedGraph, MalformedLines, RawTriple, TripleScan,
};
pub use mapping::IdMapping;
pub use triplets::{
    convert_triplets, parse_adjacency, BlankLines, Triplet, TripletOptions, TripletReport,
    IMPLICIT_RATING,
};
