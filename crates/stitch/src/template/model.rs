//! Data model for line templates and completed records.

use std::collections::BTreeMap;

use serde::Serialize;

/// Storage kind of a captured field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DotKind {
    /// Whole decimal number
    Digits,
    /// Decimal number with a fractional part
    Float,
    /// Anything else
    Text,
}

/// One named field slot defined by a line template.
#[derive(Debug, Clone, Serialize)]
pub struct Dot {
    pub name: String,
    pub kind: DotKind,
    /// `false` marks a placeholder column: it participates in matching but
    /// captures no value and gets no storage column.
    pub valid: bool,
}

/// Field layout for one physical line, compiled from a (sample, pattern)
/// alignment pair. Matching a raw line yields the captured raw values for
/// every valid dot, in dot order.
#[derive(Debug, Clone)]
pub struct LineTemplate {
    dots: Vec<Dot>,
    matcher: regex::bytes::Regex,
    /// Stand-in string normalized to `"` in captured values, if configured.
    quote_replace: Option<String>,
}

impl LineTemplate {
    pub(crate) fn new(
        dots: Vec<Dot>,
        matcher: regex::bytes::Regex,
        quote_replace: Option<String>,
    ) -> Self {
        Self {
            dots,
            matcher,
            quote_replace,
        }
    }

    /// Ordered dots this template defines, placeholders included.
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Match a raw line against this template.
    ///
    /// Returns `(name, raw value)` pairs for every valid dot on success, or
    /// `None` when the line does not fit the layout. Capture groups are
    /// addressed positionally, so dot names never have to be legal regex
    /// group names.
    pub fn match_line(&self, line: &[u8]) -> Option<Vec<(String, String)>> {
        let caps = self.matcher.captures(line)?;

        let mut values = Vec::with_capacity(self.dots.len());
        for (i, dot) in self.dots.iter().enumerate() {
            if !dot.valid {
                continue;
            }
            if let Some(m) = caps.get(i + 1) {
                let mut value = String::from_utf8_lossy(m.as_bytes()).into_owned();
                if let Some(stand_in) = &self.quote_replace {
                    if value.contains(stand_in.as_str()) {
                        value = value.replace(stand_in.as_str(), "\"");
                    }
                }
                values.push((dot.name.clone(), value));
            }
        }
        Some(values)
    }
}

/// Fully merged field-value map emitted when a template cycle completes.
///
/// Keys are the union of valid dot names across the cycle; a key written by
/// more than one template within the cycle holds the later template's value.
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, String>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: String, value: String) {
        self.values.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_as_flat_object() {
        let mut record = Record::default();
        record.insert("status".into(), "200".into());
        record.insert("cost".into(), "1.52".into());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"cost":"1.52","status":"200"}"#);
    }

    #[test]
    fn test_record_insert_overwrites() {
        let mut record = Record::default();
        record.insert("status".into(), "200".into());
        record.insert("status".into(), "500".into());
        assert_eq!(record.get("status"), Some("500"));
        assert_eq!(record.len(), 1);
    }
}
