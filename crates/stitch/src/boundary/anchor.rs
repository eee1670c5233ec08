//! Anchor pattern: recognises where a new logical record begins.

use regex::bytes::Regex;

use crate::error::{Result, StitchError};

/// Matcher compiled from a literal sample string (e.g. `2021/05/29 13:09:46`)
/// by replacing every ASCII digit with a digit wildcard and keeping all other
/// characters literal. Used only to locate record starts in the byte stream,
/// never to extract data.
#[derive(Debug, Clone)]
pub struct AnchorPattern {
    regex: Regex,
}

impl AnchorPattern {
    /// Compile an anchor matcher from a sample string.
    ///
    /// Non-digit characters are embedded in the matcher unescaped, so a
    /// sample containing regex metacharacters (`.`, `(`, `[`, ...) alters
    /// matching semantics. Kept that way deliberately: samples are declared
    /// timestamp shapes, and escaping would silently change established
    /// behaviour for samples that rely on it.
    pub fn from_sample(sample: &str) -> Result<Self> {
        if sample.is_empty() {
            return Err(StitchError::Config("anchor sample is empty".into()));
        }

        let mut pattern = String::with_capacity(sample.len() * 2);
        for c in sample.chars() {
            if c.is_ascii_digit() {
                pattern.push_str(r"\d");
            } else {
                pattern.push(c);
            }
        }

        let regex = Regex::new(&pattern).map_err(|e| {
            StitchError::Config(format!("anchor pattern failed to compile: {e}"))
        })?;

        Ok(Self { regex })
    }

    /// Byte offset of the first anchor occurrence in `haystack`, if any.
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        self.regex.find(haystack).map(|m| m.start())
    }
}
