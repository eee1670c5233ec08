//! Incremental split function: cuts the byte stream at anchor positions.

use super::anchor::AnchorPattern;

/// Bytes of the current record skipped before re-searching when the anchor
/// matches at offset zero. Without the skip, a record beginning with its own
/// anchor would split itself into an endless run of empty tokens. Assumes no
/// legitimate second record starts within the first `LOOKAHEAD` bytes of the
/// current one.
pub const LOOKAHEAD: usize = 20;

/// Decision made by one step of an incremental split function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Not enough buffered input to decide; the driver must supply more bytes
    /// before retrying. This is the pipeline's backpressure point.
    Incomplete,
    /// Emit `buffer[..advance]` as the next token and consume `advance` bytes.
    Token { advance: usize },
    /// Clean end of stream, nothing left to emit.
    Finished,
}

/// Incremental tokenizer step: inspect a progressively growing `buffer` and
/// decide how much of it forms the next token. Implementations are stateless
/// between calls; all progress lives in the driver's buffer.
pub trait Splitter {
    fn split(&self, buffer: &[u8], at_end: bool) -> Split;
}

/// Splits a raw byte stream into record-candidate chunks wherever the anchor
/// pattern marks the start of the next logical record.
#[derive(Debug, Clone)]
pub struct BoundarySplitter {
    anchor: AnchorPattern,
}

impl BoundarySplitter {
    pub fn new(anchor: AnchorPattern) -> Self {
        Self { anchor }
    }
}

impl Splitter for BoundarySplitter {
    fn split(&self, buffer: &[u8], at_end: bool) -> Split {
        if at_end && buffer.is_empty() {
            return Split::Finished;
        }

        if let Some(p) = self.anchor.find(buffer) {
            if p > 0 {
                // Everything before the next record's start belongs to the
                // record already open.
                return Split::Token { advance: p };
            }
            if buffer.len() >= LOOKAHEAD {
                // The leading anchor is the current record's own start.
                // Re-search past the lookahead window for the next one.
                if let Some(q) = self.anchor.find(&buffer[LOOKAHEAD..]) {
                    return Split::Token { advance: LOOKAHEAD + q };
                }
            }
        }

        if at_end {
            // Final, unterminated record.
            return Split::Token {
                advance: buffer.len(),
            };
        }

        Split::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "2021/05/29 13:09:46";

    fn splitter() -> BoundarySplitter {
        BoundarySplitter::new(AnchorPattern::from_sample(SAMPLE).unwrap())
    }

    #[test]
    fn test_no_anchor_waits_for_more_input() {
        let s = splitter();
        assert_eq!(s.split(b"no timestamps here at all", false), Split::Incomplete);
    }

    #[test]
    fn test_no_anchor_at_end_emits_whole_buffer() {
        let s = splitter();
        let buf = b"no timestamps here at all";
        assert_eq!(
            s.split(buf, true),
            Split::Token { advance: buf.len() }
        );
    }

    #[test]
    fn test_mid_buffer_match_splits_before_it() {
        let s = splitter();
        let buf = b"tail of open record\n2021/06/01 08:00:00 next";
        assert_eq!(s.split(buf, false), Split::Token { advance: 20 });
    }

    #[test]
    fn test_self_anchor_skips_lookahead_window() {
        let s = splitter();
        // Anchor at 0 belongs to the current record; the next record starts
        // at byte 22, i.e. LOOKAHEAD + 2.
        let buf = b"2021/06/01 08:00:00 a\n2021/06/01 08:00:01 b";
        assert_eq!(s.split(buf, false), Split::Token { advance: 22 });
    }

    #[test]
    fn test_self_anchor_without_followup_waits() {
        let s = splitter();
        let buf = b"2021/06/01 08:00:00 still growing";
        assert_eq!(s.split(buf, false), Split::Incomplete);
    }

    #[test]
    fn test_self_anchor_at_end_emits_whole_buffer() {
        let s = splitter();
        let buf = b"2021/06/01 08:00:00 last record";
        assert_eq!(
            s.split(buf, true),
            Split::Token { advance: buf.len() }
        );
    }

    #[test]
    fn test_buffer_shorter_than_lookahead_waits() {
        let s = splitter();
        // Match at 0 but fewer than LOOKAHEAD bytes buffered: undecidable.
        let buf = b"2021/06/01 08:00:00";
        assert!(buf.len() < LOOKAHEAD);
        assert_eq!(s.split(buf, false), Split::Incomplete);
    }

    #[test]
    fn test_empty_buffer_at_end_terminates_cleanly() {
        let s = splitter();
        assert_eq!(s.split(b"", true), Split::Finished);
    }
}
