// Module structure for the logstitch record-stitching engine.

// Core pipeline stages
pub mod boundary;
pub mod template;
pub mod sink;

// Wiring and runtime concerns
pub mod pipeline;
pub mod progress;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{Result, StitchError};
pub use pipeline::{CancelToken, Pipeline, RunStats};
pub use template::Record;
