//! Error taxonomy for the stitch pipeline.
//!
//! Three fatal categories: configuration errors (detected at startup, before
//! any record processing), source I/O errors other than clean end-of-stream,
//! and sink failures. A line that matches no template is NOT an error; the
//! pipeline absorbs it into its run counters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StitchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source I/O error: {0}")]
    Source(#[from] std::io::Error),

    #[error("Sink error: {0}")]
    Sink(String),
}

// Convenience type alias
pub type Result<T> = std::result::Result<T, StitchError>;
