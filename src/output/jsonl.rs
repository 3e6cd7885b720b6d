//! JSONL record writer
//!
//! Serializes dataset records to a line-delimited JSON file: one compact
//! object per line, UTF-8, non-ASCII characters verbatim. Each write is
//! flushed, so a run interrupted after N records leaves exactly N valid
//! lines behind.

use crate::crawler::DatasetRecord;
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes records to a JSONL file
pub struct JsonlWriter {
    inner: BufWriter<File>,
}

impl JsonlWriter {
    /// Opens the output file in truncate mode
    ///
    /// A fresh run replaces prior output entirely.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
        })
    }

    /// Appends one record as a single JSON line
    pub fn write(&mut self, record: &DatasetRecord) -> OutputResult<()> {
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes any buffered output
    pub fn flush(&mut self) -> OutputResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}
