//! Composition root: wires source, boundary scanner, template sequence
//! engine, and sink into one pull-based loop.
//!
//! Fully single-threaded and synchronous. Chunks flow in strict FIFO order;
//! the only suspension point is the tokenizer blocking on the byte source.
//! Cancellation is cooperative and coarse-grained: the flag is checked once
//! before each chunk, and a cancelled run stops cleanly without emitting a
//! partial record.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::boundary::{AnchorPattern, BoundarySplitter, Tokenizer};
use crate::error::Result;
use crate::progress::ProgressReporter;
use crate::sink::RecordSink;
use crate::template::{CycleOutcome, CycleState, TemplateSequence};

/// Records stored between progress updates.
const PROGRESS_EVERY: u64 = 1000;

/// Cooperative cancellation flag shared with the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters for one pipeline run. Line mismatches land here instead of
/// surfacing as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Chunks produced by the boundary scanner.
    pub chunks: u64,
    /// Chunks that matched the template they were tried against.
    pub matched: u64,
    /// Chunks that matched nothing and reset the cycle.
    pub mismatched: u64,
    /// Completed records handed to the sink.
    pub records: u64,
}

/// The assembled pipeline: anchor-driven boundary scanning feeding the
/// template cycle, completed records feeding the sink.
pub struct Pipeline<K: RecordSink> {
    anchor: AnchorPattern,
    sequence: TemplateSequence,
    sink: K,
    cancel: CancelToken,
}

impl<K: RecordSink> Pipeline<K> {
    pub fn new(anchor: AnchorPattern, sequence: TemplateSequence, sink: K) -> Self {
        Self {
            anchor,
            sequence,
            sink,
            cancel: CancelToken::new(),
        }
    }

    /// Handle for cancelling a run from outside the loop.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Run the pipeline until end of stream or cancellation.
    ///
    /// Forward-only and non-restartable: replaying records means re-running
    /// from the start of a fresh source. Source and sink failures abort with
    /// an error; mismatched lines only show up in the returned counters.
    pub fn run<R: Read>(
        &mut self,
        source: R,
        progress: &mut dyn ProgressReporter,
    ) -> Result<RunStats> {
        self.sink.prepare(&self.sequence.columns())?;

        let tokenizer = Tokenizer::new(source, BoundarySplitter::new(self.anchor.clone()));
        let mut state = CycleState::new();
        let mut stats = RunStats::default();
        let started = Instant::now();

        for token in tokenizer {
            if self.cancel.is_cancelled() {
                tracing::info!(records = stats.records, "run cancelled, stopping");
                break;
            }

            let token = token?;
            let chunk = token.trim_ascii();
            stats.chunks += 1;

            match state.advance(&self.sequence, chunk) {
                CycleOutcome::Mismatch => {
                    stats.mismatched += 1;
                    tracing::trace!(len = chunk.len(), "chunk matched no template, cycle reset");
                }
                CycleOutcome::Advanced => {
                    stats.matched += 1;
                }
                CycleOutcome::Completed(record) => {
                    stats.matched += 1;
                    self.sink.write(&record)?;
                    stats.records += 1;
                    if stats.records % PROGRESS_EVERY == 0 {
                        progress.report(stats.records, started.elapsed());
                    }
                }
            }
        }

        progress.finish(stats.records, started.elapsed());
        Ok(stats)
    }
}
