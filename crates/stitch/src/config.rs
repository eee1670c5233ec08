//! Runtime configuration for the stitch binary.
//!
//! Environment variables with defaults; there is deliberately no
//! CLI-framework surface. Library embedders construct the pipeline's
//! collaborators directly and never touch this module.

use crate::error::{Result, StitchError};

/// Default anchor sample: the timestamp shape that opens each record.
pub const DEFAULT_LINE_START: &str = "2021/05/29 13:09:46";

/// Default table name used for the derived SQL statements.
pub const DEFAULT_TABLE: &str = "logstitch";

#[derive(Debug, Clone)]
pub struct StitchConfig {
    /// Log file to parse.
    pub input: String,
    /// Pattern-spec file holding sample/pattern line pairs.
    pub pattern_file: String,
    /// Literal sample the anchor pattern is derived from.
    pub line_start: String,
    /// Stand-in string normalized to `"` in captured values.
    pub quote_replace: String,
    /// Table name for the derived SQL statements.
    pub table: String,
}

impl StitchConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for everything but the two required paths.
    pub fn from_env() -> Self {
        Self {
            input: std::env::var("STITCH_INPUT").unwrap_or_default(),
            pattern_file: std::env::var("STITCH_PATTERN_FILE").unwrap_or_default(),
            line_start: std::env::var("STITCH_LINE_START")
                .unwrap_or_else(|_| DEFAULT_LINE_START.to_string()),
            quote_replace: std::env::var("STITCH_QUOTE").unwrap_or_else(|_| "\"".to_string()),
            table: std::env::var("STITCH_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.is_empty() {
            return Err(StitchError::Config("STITCH_INPUT is not set".into()));
        }
        if self.pattern_file.is_empty() {
            return Err(StitchError::Config("STITCH_PATTERN_FILE is not set".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_paths() {
        let mut config = StitchConfig {
            input: String::new(),
            pattern_file: "p.spec".into(),
            line_start: DEFAULT_LINE_START.into(),
            quote_replace: "\"".into(),
            table: DEFAULT_TABLE.into(),
        };
        assert!(config.validate().is_err());

        config.input = "app.log".into();
        assert!(config.validate().is_ok());

        config.pattern_file.clear();
        assert!(config.validate().is_err());
    }
}
