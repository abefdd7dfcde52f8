//! File access for inputs and CSV tables.
//!
//! Tables are written to a sibling `<name>.tmp` file and renamed over the
//! target once fully flushed, so readers only ever observe complete outputs.

use crate::error::{IngestError, Result};
use crate::mapping::IdMapping;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a whole input file as UTF-8 text.
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| IngestError::read(path, e))
}

/// Split `text` into lines ending in `\n`, `\r\n` or a lone `\r`.
///
/// Like [`str::lines`], a final line terminator does not start an extra
/// empty line.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(pos) = rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..pos];
        let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + skip..];
        Some(line)
    })
}

/// Write `records` as a CSV table, preceded by `header` when given.
///
/// The header is written even if `records` is empty.
pub fn write_table<T, I>(path: &Path, header: Option<&[&str]>, records: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let tmp = tmp_path(path);

    let written = (|| -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(&tmp)
            .map_err(|e| IngestError::csv(path, e))?;

        if let Some(header) = header {
            writer
                .write_record(header)
                .map_err(|e| IngestError::csv(path, e))?;
        }
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| IngestError::csv(path, e))?;
        }
        writer.flush().map_err(|e| IngestError::io(path, e))
    })();

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    fs::rename(&tmp, path).map_err(|e| IngestError::io(path, e))
}

/// Write a mapping as headerless `label,id` rows in id order.
pub fn write_mapping(path: &Path, mapping: &IdMapping) -> Result<()> {
    write_table(path, None, mapping.iter())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
