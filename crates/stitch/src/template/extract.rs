//! Field-extraction capability: compiles a (sample, pattern) alignment pair
//! into a [`LineTemplate`].
//!
//! The engine consumes this through the [`TemplateBuilder`] trait so the
//! alignment algorithm stays swappable. The builder shipped here reads the
//! pattern line as named tokens sitting under the sample columns they
//! capture:
//!
//! ```text
//! 2021/05/29 13:09:46 GET /health 200 1.52
//! time                #   path    status cost
//! ```
//!
//! A token's region runs from its column (snapped to the start of the sample
//! word under it) to the next token's column, trailing whitespace trimmed.
//! Tokens starting with `#` are placeholders: matched but never captured.
//! Each region's sample text fixes its kind and its shape matcher; a region
//! of free text containing spaces only matches reliably in final position.

use crate::error::{Result, StitchError};

use super::model::{Dot, DotKind, LineTemplate};

/// Options for template construction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Stand-in string normalized to `"` in captured values.
    pub quote_replace: Option<String>,
}

/// Builds one [`LineTemplate`] from a sample line and its pattern line.
pub trait TemplateBuilder {
    fn build(&self, sample: &str, pattern: &str, options: &ExtractOptions)
        -> Result<LineTemplate>;
}

/// Column-alignment template builder (see module docs).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignTemplateBuilder;

impl TemplateBuilder for AlignTemplateBuilder {
    fn build(
        &self,
        sample: &str,
        pattern: &str,
        options: &ExtractOptions,
    ) -> Result<LineTemplate> {
        let tokens = tokenize(pattern);
        if tokens.is_empty() {
            return Err(StitchError::Config(format!(
                "pattern line defines no fields: {pattern:?}"
            )));
        }

        let mut starts = Vec::with_capacity(tokens.len());
        for (col, name) in &tokens {
            let start = snap_to_word_start(sample, *col).ok_or_else(|| {
                StitchError::Config(format!(
                    "pattern token {name:?} at column {col} is not aligned under the sample"
                ))
            })?;
            if let Some(&prev) = starts.last() {
                if start <= prev {
                    return Err(StitchError::Config(format!(
                        "pattern token {name:?} overlaps the previous token's sample region"
                    )));
                }
            }
            starts.push(start);
        }

        let mut dots = Vec::with_capacity(tokens.len());
        let mut regex_src = String::from("^");
        for (i, ((_, name), &start)) in tokens.iter().zip(&starts).enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(sample.len());
            let region = &sample[start..end];
            let value = region.trim_end();
            if value.is_empty() {
                return Err(StitchError::Config(format!(
                    "pattern token {name:?} covers no sample text"
                )));
            }

            let kind = infer_kind(value);
            let last = i + 1 == tokens.len();
            regex_src.push('(');
            regex_src.push_str(&shape_for(value, kind, last));
            regex_src.push(')');
            if !last && region.len() > value.len() {
                regex_src.push_str(r"\s+");
            }

            dots.push(Dot {
                name: (*name).to_string(),
                kind,
                valid: !name.starts_with('#'),
            });
        }
        regex_src.push_str(r"\s*$");

        let matcher = regex::bytes::Regex::new(&regex_src).map_err(|e| {
            StitchError::Config(format!("line template failed to compile: {e}"))
        })?;

        Ok(LineTemplate::new(dots, matcher, options.quote_replace.clone()))
    }
}

/// Whitespace-delimited pattern tokens with their starting byte columns.
fn tokenize(pattern: &str) -> Vec<(usize, &str)> {
    let bytes = pattern.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        out.push((start, &pattern[start..i]));
    }
    out
}

/// Snap a pattern column to the start of the sample word under it. A column
/// landing on whitespace moves right to the next word; a column landing
/// mid-word moves left to the word's first byte. Returns `None` when the
/// column is past the sample's content.
fn snap_to_word_start(sample: &str, col: usize) -> Option<usize> {
    let bytes = sample.as_bytes();
    if col >= bytes.len() {
        return None;
    }
    let mut i = col;
    if bytes[i].is_ascii_whitespace() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i == bytes.len() {
            return None;
        }
        return Some(i);
    }
    while i > 0 && !bytes[i - 1].is_ascii_whitespace() {
        i -= 1;
    }
    Some(i)
}

fn infer_kind(value: &str) -> DotKind {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        return DotKind::Digits;
    }
    if let Some((int, frac)) = value.split_once('.') {
        if !int.is_empty()
            && !frac.is_empty()
            && int.bytes().all(|b| b.is_ascii_digit())
            && frac.bytes().all(|b| b.is_ascii_digit())
        {
            return DotKind::Float;
        }
    }
    DotKind::Text
}

fn shape_for(value: &str, kind: DotKind, last: bool) -> String {
    match kind {
        DotKind::Digits => r"\d+".to_string(),
        DotKind::Float => r"\d+\.\d+".to_string(),
        DotKind::Text => text_shape(value, last),
    }
}

fn text_shape(value: &str, last: bool) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return r#""[^"]*""#.to_string();
    }
    let has_space = value.chars().any(char::is_whitespace);
    if !has_space {
        return r"\S+".to_string();
    }
    if value.chars().any(|c| c.is_ascii_digit()) {
        return digit_shape(value);
    }
    // Free text with spaces carries no internal anchors.
    if last {
        ".*".to_string()
    } else {
        ".+".to_string()
    }
}

/// Keep the value's punctuation literal and widen every digit run to `\d+`,
/// so e.g. `2021/05/29 13:09:46` matches any timestamp of that shape.
fn digit_shape(value: &str) -> String {
    let mut out = String::new();
    let mut literal = String::new();
    let mut in_digits = false;
    for c in value.chars() {
        if c.is_ascii_digit() {
            if !literal.is_empty() {
                out.push_str(&regex::escape(&literal));
                literal.clear();
            }
            if !in_digits {
                out.push_str(r"\d+");
                in_digits = true;
            }
        } else {
            in_digits = false;
            literal.push(c);
        }
    }
    if !literal.is_empty() {
        out.push_str(&regex::escape(&literal));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(sample: &str, pattern: &str) -> LineTemplate {
        AlignTemplateBuilder
            .build(sample, pattern, &ExtractOptions::default())
            .unwrap()
    }

    // ─── Construction ───────────────────────────────────────────

    #[test]
    fn test_kinds_inferred_from_sample() {
        let template = build(
            "2021/05/29 13:09:46 GET /health 200 1.52",
            "time                verb path   status cost",
        );
        let kinds: Vec<DotKind> = template.dots().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DotKind::Text,
                DotKind::Text,
                DotKind::Text,
                DotKind::Digits,
                DotKind::Float,
            ]
        );
        assert!(template.dots().iter().all(|d| d.valid));
    }

    #[test]
    fn test_placeholder_tokens_are_invalid_dots() {
        let template = build("cost 1.52 status 200", "#    cost #      status");
        let valid: Vec<bool> = template.dots().iter().map(|d| d.valid).collect();
        assert_eq!(valid, vec![false, true, false, true]);
    }

    #[test]
    fn test_empty_pattern_is_config_error() {
        let err = AlignTemplateBuilder
            .build("sample text", "   ", &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, StitchError::Config(_)));
    }

    #[test]
    fn test_token_past_sample_end_is_config_error() {
        let err = AlignTemplateBuilder
            .build("short", "field                        extra", &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, StitchError::Config(_)));
    }

    #[test]
    fn test_overlapping_tokens_are_config_error() {
        // Both tokens snap to the start of "value".
        let err = AlignTemplateBuilder
            .build("value", "a  b", &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, StitchError::Config(_)));
    }

    #[test]
    fn test_token_snaps_left_into_sample_word() {
        // "level" ends past the column where "server" begins; "msg" starts
        // one column into "server" and must snap back to its first byte.
        let template = build(
            "2021/05/29 13:09:46 INFO server started",
            "time                level msg",
        );
        let values = template
            .match_line(b"2021/08/12 09:01:02 WARN disk nearly full")
            .unwrap();
        assert_eq!(
            values,
            vec![
                ("time".to_string(), "2021/08/12 09:01:02".to_string()),
                ("level".to_string(), "WARN".to_string()),
                ("msg".to_string(), "disk nearly full".to_string()),
            ]
        );
    }

    // ─── Matching ───────────────────────────────────────────────

    #[test]
    fn test_digit_fields_match_other_widths() {
        let template = build("status 200 cost 1.52", "#      status #   cost");
        let values = template.match_line(b"status 65535 cost 12.0625").unwrap();
        assert_eq!(
            values,
            vec![
                ("status".to_string(), "65535".to_string()),
                ("cost".to_string(), "12.0625".to_string()),
            ]
        );
    }

    #[test]
    fn test_layout_mismatch_returns_none() {
        let template = build("status 200", "#      status");
        assert!(template.match_line(b"status two-hundred").is_none());
        assert!(template.match_line(b"totally different line").is_none());
    }

    #[test]
    fn test_quoted_field_spans_spaces() {
        let template = build(
            r#"said "hello there" 42"#,
            r#"#    quote         n"#,
        );
        let values = template
            .match_line(br#"said "general kenobi" 7"#)
            .unwrap();
        assert_eq!(values[0].1, r#""general kenobi""#);
        assert_eq!(values[1].1, "7");
    }

    #[test]
    fn test_quote_stand_in_replaced_in_values() {
        let options = ExtractOptions {
            quote_replace: Some("'".to_string()),
        };
        let template = AlignTemplateBuilder
            .build("msg 'hi'", "#   msg", &options)
            .unwrap();
        let values = template.match_line(b"msg 'bye'").unwrap();
        assert_eq!(values[0].1, "\"bye\"");
    }

    #[test]
    fn test_trailing_whitespace_tolerated() {
        let template = build("status 200", "#      status");
        let values = template.match_line(b"status 404   ").unwrap();
        assert_eq!(values[0].1, "404");
    }
}
