//! Pattern-spec loading: the ordered cycle of line templates.

use std::fs;
use std::path::Path;

use crate::error::{Result, StitchError};

use super::extract::{ExtractOptions, TemplateBuilder};
use super::model::{Dot, LineTemplate};

/// Lines starting with this marker are ignored in the pattern spec.
pub const COMMENT: &str = "--";

/// Ordered, fixed-length cycle of line templates describing the physical
/// lines that compose one logical record. Built once at startup; immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct TemplateSequence {
    templates: Vec<LineTemplate>,
}

impl TemplateSequence {
    /// Load a pattern-spec file and build the template cycle.
    pub fn from_file(
        path: impl AsRef<Path>,
        builder: &dyn TemplateBuilder,
        options: &ExtractOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            StitchError::Config(format!("read pattern spec {}: {e}", path.display()))
        })?;
        Self::parse(&data, builder, options)
    }

    /// Parse pattern-spec text: blank lines and `--` comments are dropped,
    /// the rest must form (sample, pattern) pairs. An odd or zero count
    /// fails fast, before any record processing.
    ///
    /// Lines keep their leading whitespace: pattern alignment is
    /// column-sensitive. Only a trailing carriage return is stripped.
    pub fn parse(
        input: &str,
        builder: &dyn TemplateBuilder,
        options: &ExtractOptions,
    ) -> Result<Self> {
        let lines: Vec<&str> = input
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with(COMMENT))
            .collect();

        if lines.is_empty() {
            return Err(StitchError::Config(
                "pattern spec holds no sample/pattern lines".into(),
            ));
        }
        if lines.len() % 2 != 0 {
            return Err(StitchError::Config(format!(
                "pattern spec must hold sample/pattern line pairs, got {} effective lines",
                lines.len()
            )));
        }

        let mut templates = Vec::with_capacity(lines.len() / 2);
        for pair in lines.chunks(2) {
            templates.push(builder.build(pair[0], pair[1], options)?);
        }

        Ok(Self { templates })
    }

    /// Number of physical lines in one cycle.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn template(&self, pos: usize) -> &LineTemplate {
        &self.templates[pos]
    }

    pub fn templates(&self) -> &[LineTemplate] {
        &self.templates
    }

    /// Distinct valid dots across the whole cycle, in first-seen order.
    /// The first occurrence of a name fixes its column kind.
    pub fn columns(&self) -> Vec<Dot> {
        let mut seen = std::collections::HashSet::new();
        let mut columns = Vec::new();
        for template in &self.templates {
            for dot in template.dots().iter().filter(|d| d.valid) {
                if seen.insert(dot.name.clone()) {
                    columns.push(dot.clone());
                }
            }
        }
        columns
    }
}
