//! Line templates and the template sequence engine.
//!
//! - `model.rs`: dots, compiled line templates, and completed records
//! - `extract.rs`: the field-extraction capability (column alignment)
//! - `spec.rs`: pattern-spec file loading and the template cycle
//! - `cycle.rs`: the cycle automaton that stitches chunks into records

pub mod model;
pub mod extract;
pub mod spec;
pub mod cycle;

// Re-export commonly used types
pub use cycle::{CycleOutcome, CycleState};
pub use extract::{AlignTemplateBuilder, ExtractOptions, TemplateBuilder};
pub use model::{Dot, DotKind, LineTemplate, Record};
pub use spec::TemplateSequence;
