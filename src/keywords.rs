//! Loading keyword lists into a table.
//!
//! Keyword files hold one keyword per line. A trailing `\r` is stripped and
//! blank lines are skipped; everything else is inserted verbatim, so
//! punctuation inside a keyword is skipped by the table itself.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use memmap2::Mmap;
use thiserror::Error;

use crate::error::TableError;
use crate::table::TransitionTable;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Table {
        line: usize,
        #[source]
        source: TableError,
    },
}

/// Outcome of loading a keyword list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Every non-blank line, in file order, with the identifier it got.
    pub keywords: Vec<(String, u32)>,
    /// Lines read, blank ones included
    pub lines: usize,
    /// Blank lines skipped
    pub blank: usize,
    /// Lines that resolved to an identifier handed out earlier
    pub repeated: usize,
}

impl LoadReport {
    fn push_line(&mut self, table: &mut TransitionTable, raw: &[u8]) -> Result<(), LoadError> {
        self.lines += 1;
        let line = trim_line(raw);
        if line.is_empty() {
            self.blank += 1;
            return Ok(());
        }

        let before = table.len();
        let id = table.insert(line).map_err(|source| LoadError::Table {
            line: self.lines,
            source,
        })?;
        if table.len() == before {
            self.repeated += 1;
        }
        self.keywords
            .push((String::from_utf8_lossy(line).into_owned(), id));
        Ok(())
    }
}

#[inline]
fn trim_line(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

/// Memory-map `path` and insert every keyword in it.
pub fn load_keywords(
    table: &mut TransitionTable,
    path: impl AsRef<Path>,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut report = LoadReport::default();

    if file.metadata()?.len() == 0 {
        tracing::debug!(path = %path.display(), "keyword file is empty");
        return Ok(report);
    }

    // SAFETY: the map is read-only and dropped before returning; the file is
    // not expected to be truncated while it is being loaded.
    let map = unsafe { Mmap::map(&file)? };
    for raw in map.split_inclusive(|&b| b == b'\n') {
        report.push_line(table, raw)?;
    }

    tracing::debug!(
        path = %path.display(),
        lines = report.lines,
        keywords = report.keywords.len(),
        repeated = report.repeated,
        "loaded keyword file"
    );
    Ok(report)
}

/// Insert every keyword read from `reader`.
pub fn load_keywords_from<R: BufRead>(
    table: &mut TransitionTable,
    mut reader: R,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        report.push_line(table, &buf)?;
    }
    Ok(report)
}
