//! Record sinks: where completed records go.
//!
//! Sinks are append-only and single-writer; `prepare` runs exactly once with
//! the ordered column list before the first record, and any failure from
//! either call aborts the run. No partial-record retry or rollback happens
//! here; that discipline, if needed, belongs to the sink implementation.

pub mod schema;

use std::io::Write;

use crate::error::{Result, StitchError};
use crate::template::{Dot, Record};

pub trait RecordSink {
    /// Receive the ordered column list before any record arrives.
    fn prepare(&mut self, columns: &[Dot]) -> Result<()>;

    /// Persist one completed record.
    fn write(&mut self, record: &Record) -> Result<()>;
}

/// Collects records in memory. Used in tests and by embedders that want the
/// records themselves rather than a serialized stream.
#[derive(Debug, Default)]
pub struct MemorySink {
    columns: Vec<Dot>,
    records: Vec<Record>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Dot] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl RecordSink for MemorySink {
    fn prepare(&mut self, columns: &[Dot]) -> Result<()> {
        self.columns = columns.to_vec();
        Ok(())
    }

    fn write(&mut self, record: &Record) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON object per record. The binary points this at stdout.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn prepare(&mut self, _columns: &[Dot]) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)
            .map_err(|e| StitchError::Sink(format!("serialize record: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| StitchError::Sink(format!("write record: {e}")))?;
        Ok(())
    }
}
