//! Record boundary detection.
//!
//! Turns a raw byte stream into a lazy sequence of record-candidate chunks:
//!
//! - `anchor.rs`: the digit-wildcard matcher that recognises record starts
//! - `scan.rs`: the incremental split function and its lookahead algorithm
//! - `tokenizer.rs`: the generic driver that grows a buffer from a blocking
//!   reader and yields tokens

pub mod anchor;
pub mod scan;
pub mod tokenizer;

// Re-export commonly used types
pub use anchor::AnchorPattern;
pub use scan::{BoundarySplitter, Split, Splitter, LOOKAHEAD};
pub use tokenizer::Tokenizer;
