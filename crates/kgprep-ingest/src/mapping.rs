//! Dense label -> id mappings.
//!
//! Ids are assigned in lexicographic (byte) order of the labels, never in
//! first-seen order. The mapping for a given label set is therefore a pure
//! function of that set.

use crate::error::{IngestError, Result};
use std::collections::{BTreeSet, HashMap};

/// Bijection between string labels and contiguous ids `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMapping {
    /// Sorted labels; position is the id.
    labels: Vec<String>,
    ids: HashMap<String, u32>,
}

impl IdMapping {
    /// Build a mapping over the distinct labels yielded by `labels`.
    ///
    /// Duplicates collapse to a single entry. Ids are `u32`, so at most
    /// `u32::MAX + 1` distinct labels fit; more is [`IngestError::TooManyLabels`].
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        check_capacity(sorted.len())?;
        let labels: Vec<String> = sorted.into_iter().collect();
        let ids = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.clone(), idx as u32))
            .collect();
        Ok(Self { labels, ids })
    }

    pub fn id(&self, label: &str) -> Option<u32> {
        self.ids.get(label).copied()
    }

    pub fn label(&self, id: u32) -> Option<&str> {
        self.labels.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(label, id)` pairs in id order (equivalently, label order).
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.labels
            .iter()
            .enumerate()
            // Fits: `from_labels` bounded the count.
            .map(|(idx, label)| (label.as_str(), idx as u32))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Every id in `0..count` must fit in a `u32`.
fn check_capacity(count: usize) -> Result<()> {
    match count.checked_sub(1).map(u32::try_from) {
        Some(Err(_)) => Err(IngestError::TooManyLabels { count }),
        _ => Ok(()),
    }
}
