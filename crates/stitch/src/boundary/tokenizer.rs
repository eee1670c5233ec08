//! Generic incremental tokenizer: drives a [`Splitter`] over a blocking
//! byte source.

use std::io::Read;

use bytes::{Bytes, BytesMut};

use super::scan::{Split, Splitter};
use crate::error::Result;

/// Bytes requested from the source per refill.
const READ_CHUNK: usize = 8 * 1024;

/// Pull-based driver that grows an internal buffer from `source` until the
/// splitter can cut the next token, then yields it as a zero-copy [`Bytes`]
/// slice. A source that stops producing simply blocks the pipeline inside
/// `read`; that stall is the intended backpressure, not an error.
///
/// End of stream is a distinguished, non-error terminal condition: the
/// iterator ends after the splitter reports [`Split::Finished`] (or refuses
/// to make progress once no more input can arrive).
pub struct Tokenizer<R: Read, S: Splitter> {
    source: R,
    splitter: S,
    buffer: BytesMut,
    at_end: bool,
    finished: bool,
}

impl<R: Read, S: Splitter> Tokenizer<R, S> {
    pub fn new(source: R, splitter: S) -> Self {
        Self {
            source,
            splitter,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            at_end: false,
            finished: false,
        }
    }

    fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = self.source.read(&mut chunk)?;
        if n == 0 {
            self.at_end = true;
        } else {
            self.buffer.extend_from_slice(&chunk[..n]);
        }
        Ok(())
    }
}

impl<R: Read, S: Splitter> Iterator for Tokenizer<R, S> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.splitter.split(&self.buffer, self.at_end) {
                Split::Token { advance } => {
                    let token = self.buffer.split_to(advance).freeze();
                    if self.at_end && self.buffer.is_empty() {
                        self.finished = true;
                    }
                    return Some(Ok(token));
                }
                Split::Finished => {
                    self.finished = true;
                    return None;
                }
                Split::Incomplete => {
                    if self.at_end {
                        // No more input will ever arrive; stop rather than
                        // spin on an undecidable buffer.
                        self.finished = true;
                        return None;
                    }
                    if let Err(e) = self.fill() {
                        self.finished = true;
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}
