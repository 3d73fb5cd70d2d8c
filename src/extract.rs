use regex::Regex;
use serde::Serialize;

use crate::fields::{FieldKind, FieldSpec};

pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Field label must not be blank")]
    BlankLabel,
    #[error("Duplicate field label: {0}")]
    DuplicateLabel(String),
    #[error("Invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Extracted,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedValue {
    pub label: String,
    pub value: String,
    pub source: ValueSource,
}

/// Pulls labelled fields out of loosely formatted model output.
///
/// A label is recognised either in brackets anywhere in the text (`[TITLE]`,
/// `[ title ]:`) or bare at the start of a line when followed by a colon
/// (`Title:`, `**TITLE**:`). A field's value runs from the end of its label to
/// the next recognised label of any field, or the end of the text.
#[derive(Debug, Clone)]
pub struct Extractor {
    specs: Vec<FieldSpec>,
    pattern: Option<Regex>,
}

struct LabelMatch {
    label: String,
    start: usize,
    end: usize,
}

impl Extractor {
    pub fn new(specs: &[FieldSpec]) -> Result<Self, ExtractError> {
        let mut seen: Vec<String> = Vec::new();
        for spec in specs {
            let normalized = normalize_label(&spec.label);
            if normalized.is_empty() {
                return Err(ExtractError::BlankLabel);
            }
            if seen.contains(&normalized) {
                return Err(ExtractError::DuplicateLabel(spec.label.clone()));
            }
            seen.push(normalized);
        }

        // Longest first so a label that prefixes another never shadows it.
        let mut alternatives: Vec<String> =
            specs.iter().map(|s| label_pattern(&s.label)).collect();
        alternatives.sort_by_key(|alt| std::cmp::Reverse(alt.len()));
        let alternation = alternatives.join("|");

        let pattern = if alternation.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?im)\[[ \t]*(?P<bracketed>{alternation})[ \t]*\][ \t*]*:?|^[ \t>*#]*(?P<bare>{alternation})[ \t*]*:"
            ))?)
        };

        Ok(Self {
            specs: specs.to_vec(),
            pattern,
        })
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Raw span following `label`, or `None` when the label is absent or its span
    /// is blank.
    pub fn find<'t>(&self, text: &'t str, label: &str) -> Option<&'t str> {
        let target = normalize_label(label);
        let matches = self.label_matches(text);
        let idx = matches.iter().position(|m| m.label == target)?;
        let end = matches.get(idx + 1).map(|m| m.start).unwrap_or(text.len());
        let value = clean_value(&text[matches[idx].end..end]);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// One value per spec, in spec order. `None` input resolves every field to
    /// its fallback without looking for labels.
    pub fn extract(&self, raw_text: Option<&str>) -> Vec<ExtractedValue> {
        let text = raw_text.filter(|t| !t.trim().is_empty());
        if text.is_none() {
            log::warn!("no usable generated text, using fallbacks for every field");
        }

        self.specs
            .iter()
            .map(|spec| {
                let found = text.and_then(|t| self.find(t, &spec.label));
                let (value, source) = match found {
                    Some(value) => (value.to_string(), ValueSource::Extracted),
                    None => {
                        if text.is_some() {
                            if spec.required {
                                log::warn!("required field {} missing, using fallback", spec.label);
                            } else {
                                log::debug!("field {} missing, using fallback", spec.label);
                            }
                        }
                        (spec.fallback.clone(), ValueSource::Fallback)
                    }
                };

                let value = match (spec.kind, spec.max_words) {
                    (FieldKind::Narrative, Some(max)) => match truncate_words(&value, max) {
                        Some(truncated) => {
                            log::info!("{} exceeds {} words, truncating", spec.label, max);
                            truncated
                        }
                        None => value,
                    },
                    _ => value,
                };

                ExtractedValue {
                    label: spec.label.clone(),
                    value,
                    source,
                }
            })
            .collect()
    }

    fn label_matches(&self, text: &str) -> Vec<LabelMatch> {
        let Some(pattern) = self.pattern.as_ref() else {
            return Vec::new();
        };
        pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = caps.name("bracketed").or_else(|| caps.name("bare"))?;
                Some(LabelMatch {
                    label: normalize_label(label.as_str()),
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect()
    }
}

/// Cut `text` down to `max_words` words and append the truncation marker.
/// Returns `None` when the text is already within the limit.
pub fn truncate_words(text: &str, max_words: usize) -> Option<String> {
    let mut words = 0usize;
    let mut last_word_end = 0usize;
    let mut in_word = false;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if in_word {
                in_word = false;
                last_word_end = idx;
            }
        } else if !in_word {
            in_word = true;
            words += 1;
            if words > max_words {
                return Some(format!(
                    "{}{}",
                    text[..last_word_end].trim_end(),
                    TRUNCATION_MARKER
                ));
            }
        }
    }
    None
}

fn label_pattern(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[\s_]+")
}

fn normalize_label(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn clean_value(span: &str) -> &str {
    span.trim_matches(|c: char| c.is_whitespace() || c == '*')
}
