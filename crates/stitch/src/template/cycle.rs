//! Cycle automaton: stitches consecutive chunks into logical records.
//!
//! Holds the only mutable parse state (`pos` plus the field accumulator) and
//! performs no I/O, so tests drive it with synthetic chunk sequences.

use super::model::Record;
use super::spec::TemplateSequence;

/// Outcome of feeding one chunk to the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Chunk matched an intermediate template; the cycle stays open.
    Advanced,
    /// Chunk matched the final template; one record is complete.
    Completed(Record),
    /// Chunk matched nothing; any open cycle was discarded with it.
    Mismatch,
}

/// Mutable per-run state of the template sequence engine.
///
/// `pos` strictly increases within a cycle and resets to zero only on a
/// mismatch or a completed record, never partially.
#[derive(Debug, Default)]
pub struct CycleState {
    pos: usize,
    acc: Record,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle position in `[0, sequence.len())`.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Feed the next chunk.
    ///
    /// A chunk that fails the current template is dropped outright and the
    /// cycle resets; the chunk is NOT retried against template zero. On a
    /// match the captured fields merge into the accumulator, later values
    /// overwriting earlier ones for the same name.
    pub fn advance(&mut self, sequence: &TemplateSequence, chunk: &[u8]) -> CycleOutcome {
        match sequence.template(self.pos).match_line(chunk) {
            None => {
                self.reset();
                CycleOutcome::Mismatch
            }
            Some(values) => {
                for (name, value) in values {
                    self.acc.insert(name, value);
                }
                self.pos += 1;
                if self.pos == sequence.len() {
                    let record = std::mem::take(&mut self.acc);
                    self.pos = 0;
                    CycleOutcome::Completed(record)
                } else {
                    CycleOutcome::Advanced
                }
            }
        }
    }

    fn reset(&mut self) {
        self.pos = 0;
        self.acc = Record::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::extract::{AlignTemplateBuilder, ExtractOptions};

    /// Two-line cycle: a request line, then a result line.
    fn two_line_sequence() -> TemplateSequence {
        TemplateSequence::parse(
            "GET /health\n\
             verb path\n\
             status 200 cost 1.52\n\
             #      status #   cost\n",
            &AlignTemplateBuilder,
            &ExtractOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_record_emitted_after_full_cycle() {
        let sequence = two_line_sequence();
        let mut state = CycleState::new();

        assert_eq!(
            state.advance(&sequence, b"POST /orders"),
            CycleOutcome::Advanced
        );
        assert_eq!(state.pos(), 1);

        let outcome = state.advance(&sequence, b"status 201 cost 0.87");
        let record = match outcome {
            CycleOutcome::Completed(record) => record,
            other => panic!("expected completed record, got {other:?}"),
        };
        assert_eq!(record.get("verb"), Some("POST"));
        assert_eq!(record.get("path"), Some("/orders"));
        assert_eq!(record.get("status"), Some("201"));
        assert_eq!(record.get("cost"), Some("0.87"));
        assert_eq!(state.pos(), 0);
    }

    #[test]
    fn test_mismatch_resets_and_discards_fields() {
        let sequence = two_line_sequence();
        let mut state = CycleState::new();

        assert_eq!(
            state.advance(&sequence, b"POST /orders"),
            CycleOutcome::Advanced
        );
        // Second line of the cycle fails; the accumulated verb/path are gone.
        assert_eq!(
            state.advance(&sequence, b"unrelated noise"),
            CycleOutcome::Mismatch
        );
        assert_eq!(state.pos(), 0);

        // The next full cycle carries no leakage from the discarded one.
        state.advance(&sequence, b"GET /health");
        let outcome = state.advance(&sequence, b"status 200 cost 1.00");
        match outcome {
            CycleOutcome::Completed(record) => {
                assert_eq!(record.get("verb"), Some("GET"));
                assert_eq!(record.len(), 4);
            }
            other => panic!("expected completed record, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_chunk_not_retried_as_cycle_start() {
        let sequence = two_line_sequence();
        let mut state = CycleState::new();

        state.advance(&sequence, b"GET /health");
        // This chunk would match template 0, but it arrives while the cycle
        // expects template 1: it is dropped, not reinterpreted.
        assert_eq!(
            state.advance(&sequence, b"PUT /things"),
            CycleOutcome::Mismatch
        );
        assert_eq!(state.pos(), 0);
    }

    #[test]
    fn test_duplicate_name_takes_later_template_value() {
        let sequence = TemplateSequence::parse(
            "phase start detail alpha\n\
             #     tag   #      note\n\
             phase end detail omega\n\
             #     tag #      note\n",
            &AlignTemplateBuilder,
            &ExtractOptions::default(),
        )
        .unwrap();
        let mut state = CycleState::new();

        state.advance(&sequence, b"phase start detail alpha");
        let outcome = state.advance(&sequence, b"phase end detail omega");
        match outcome {
            CycleOutcome::Completed(record) => {
                assert_eq!(record.get("tag"), Some("end"));
                assert_eq!(record.get("note"), Some("omega"));
            }
            other => panic!("expected completed record, got {other:?}"),
        }
    }

    #[test]
    fn test_single_template_cycle_completes_every_match() {
        let sequence = TemplateSequence::parse(
            "status 200\n\
             #      status\n",
            &AlignTemplateBuilder,
            &ExtractOptions::default(),
        )
        .unwrap();
        let mut state = CycleState::new();

        for status in ["200", "404", "500"] {
            let chunk = format!("status {status}");
            match state.advance(&sequence, chunk.as_bytes()) {
                CycleOutcome::Completed(record) => {
                    assert_eq!(record.get("status"), Some(status));
                }
                other => panic!("expected completed record, got {other:?}"),
            }
        }
    }
}
