//! Adjacency lists -> `(user, item, rating)` triplets.
//!
//! Input lines look like `<user> <item_1> <item_2> ... <item_k>` and are split
//! on arbitrary whitespace. Each `(user, item)` pair becomes one triplet with
//! the implicit rating [`IMPLICIT_RATING`], in line order then item order.

use crate::error::{IngestError, Result};
use crate::tables::{lines, read_input, write_table};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Rating assigned to every observed interaction (implicit feedback).
pub const IMPLICIT_RATING: u8 = 1;

pub const TRIPLET_HEADER: [&str; 3] = ["user", "item", "rating"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Triplet {
    pub user: String,
    pub item: String,
    pub rating: u8,
}

/// What to do with an empty (or whitespace-only) adjacency line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLines {
    #[default]
    Skip,
    /// Abort with [`IngestError::EmptyLine`].
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripletOptions {
    pub blank_lines: BlankLines,
    /// Drop repeated `(user, item)` pairs, keeping the first occurrence.
    pub dedup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripletReport {
    pub lines: usize,
    pub records: usize,
}

/// Convert adjacency-list text into triplets.
///
/// `source` is only used to label errors.
pub fn parse_adjacency(
    source: &Path,
    text: &str,
    options: &TripletOptions,
) -> Result<Vec<Triplet>> {
    let mut triplets = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for (idx, line) in lines(text).enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(user) = tokens.next() else {
            match options.blank_lines {
                BlankLines::Skip => continue,
                BlankLines::Fail => {
                    return Err(IngestError::EmptyLine {
                        path: source.to_path_buf(),
                        line: idx + 1,
                    })
                }
            }
        };

        for item in tokens {
            if options.dedup && !seen.insert((user, item)) {
                continue;
            }
            triplets.push(Triplet {
                user: user.to_string(),
                item: item.to_string(),
                rating: IMPLICIT_RATING,
            });
        }
    }

    Ok(triplets)
}

/// Read `input`, convert it, and write the `user,item,rating` table to `output`.
pub fn convert_triplets(
    input: &Path,
    output: &Path,
    options: &TripletOptions,
) -> Result<TripletReport> {
    let text = read_input(input)?;
    let triplets = parse_adjacency(input, &text, options)?;
    write_table(output, Some(&TRIPLET_HEADER[..]), &triplets)?;

    let report = TripletReport {
        lines: lines(&text).count(),
        records: triplets.len(),
    };
    info!(
        input = %input.display(),
        output = %output.display(),
        records = report.records,
        "converted adjacency list to triplets"
    );
    Ok(report)
}
