//! Progress reporting for long parse runs.
//!
//! An explicit reporter object handed to the pipeline, not process-global
//! console state, so runs can be observed, silenced, or tested in isolation.

use std::io::{self, Write};
use std::time::Duration;

/// Receives periodic row-count updates from the pipeline.
pub trait ProgressReporter {
    /// Called every progress interval while the run is in flight.
    fn report(&mut self, records: u64, elapsed: Duration);

    /// Called once when the run ends, whatever the record count.
    fn finish(&mut self, records: u64, elapsed: Duration);
}

/// Discards all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn report(&mut self, _records: u64, _elapsed: Duration) {}
    fn finish(&mut self, _records: u64, _elapsed: Duration) {}
}

/// Rewrites a single console line in place, tracking how many characters the
/// previous update printed so it can erase them with backspaces.
#[derive(Debug)]
pub struct ConsoleProgress<W: Write = io::Stderr> {
    out: W,
    printed: usize,
}

impl ConsoleProgress<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }

    fn rewrite(&mut self, line: &str) {
        let mut buf = String::with_capacity(self.printed + line.len());
        for _ in 0..self.printed {
            buf.push('\u{8}');
        }
        buf.push_str(line);
        self.printed = line.chars().count();
        // Console progress is cosmetic; a failed write never aborts the run.
        let _ = self.out.write_all(buf.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write> ProgressReporter for ConsoleProgress<W> {
    fn report(&mut self, records: u64, elapsed: Duration) {
        self.rewrite(&format!("Records {records} stored, cost {elapsed:?}"));
    }

    fn finish(&mut self, records: u64, elapsed: Duration) {
        self.rewrite(&format!("Records {records} stored, cost {elapsed:?}"));
        let _ = self.out.write_all(b"\n");
        let _ = self.out.flush();
        self.printed = 0;
    }
}
