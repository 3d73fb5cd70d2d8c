use chrono::NaiveDateTime;
use serde::Serialize;

use crate::extract::{ExtractError, Extractor, ValueSource};
use crate::fields::{FieldKind, FieldSpec};
use crate::sanitize::{sanitize, ChannelText};
use crate::schedule::{resolve, ScheduleError, ScheduleReference};

/// Leading letter used when the narrative has nothing to split.
pub const DEFAULT_INITIAL: char = 'T';

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Fields(#[from] ExtractError),
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExtractedField {
    pub label: String,
    pub kind: FieldKind,
    pub source: ValueSource,
    pub raw_value: String,
    #[serde(flatten)]
    pub text: ChannelText,
}

/// First letter split off for first-letter emphasis. Punctuation ahead of the
/// first letter (an opening quote, say) stays in `lead` so it is not enlarged.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DropCap {
    pub lead: String,
    pub initial: char,
    pub rest: String,
}

impl DropCap {
    pub fn split(value: &str) -> Self {
        let trimmed = value.trim_start();
        let first_letter = trimmed.char_indices().find(|(_, c)| c.is_alphanumeric());
        if let Some((idx, initial)) = first_letter {
            return Self {
                lead: trimmed[..idx].to_string(),
                initial,
                rest: trimmed[idx + initial.len_utf8()..].to_string(),
            };
        }

        // Nothing alphanumeric: enlarge whatever comes first.
        let mut chars = trimmed.chars();
        match chars.next() {
            Some(initial) => Self {
                lead: String::new(),
                initial,
                rest: chars.as_str().to_string(),
            },
            None => Self {
                lead: String::new(),
                initial: DEFAULT_INITIAL,
                rest: String::new(),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NarrativeSplit {
    pub rich: DropCap,
    pub constrained: DropCap,
}

/// Everything one run produces. Built once by [`assemble`] and read-only after.
#[derive(Serialize, Debug, Clone)]
pub struct ContentBundle {
    reference: ScheduleReference,
    fields: Vec<ExtractedField>,
    narrative: Option<NarrativeSplit>,
    degraded: bool,
}

impl ContentBundle {
    pub fn reference(&self) -> ScheduleReference {
        self.reference
    }

    pub fn fields(&self) -> &[ExtractedField] {
        &self.fields
    }

    pub fn field(&self, label: &str) -> Option<&ExtractedField> {
        self.fields
            .iter()
            .find(|f| f.label.eq_ignore_ascii_case(label))
    }

    /// First field of the given kind.
    pub fn field_of_kind(&self, kind: FieldKind) -> Option<&ExtractedField> {
        self.fields.iter().find(|f| f.kind == kind)
    }

    pub fn narrative(&self) -> Option<&NarrativeSplit> {
        self.narrative.as_ref()
    }

    /// True when any required field fell back to its placeholder text.
    pub fn degraded(&self) -> bool {
        self.degraded
    }
}

pub fn assemble(
    now: NaiveDateTime,
    epoch: NaiveDateTime,
    section_lengths: &[u32],
    raw_generation_result: Option<&str>,
    specs: &[FieldSpec],
) -> Result<ContentBundle, AssembleError> {
    let reference = resolve(now, epoch, section_lengths)?;
    let extractor = Extractor::new(specs)?;
    Ok(assemble_for(reference, raw_generation_result, &extractor))
}

/// Assemble against an already resolved reference.
pub fn assemble_for(
    reference: ScheduleReference,
    raw_generation_result: Option<&str>,
    extractor: &Extractor,
) -> ContentBundle {
    let extracted = extractor.extract(raw_generation_result);

    let mut degraded = false;
    let fields: Vec<ExtractedField> = extractor
        .specs()
        .iter()
        .zip(extracted)
        .map(|(spec, value)| {
            if spec.required && value.source == ValueSource::Fallback {
                degraded = true;
            }
            ExtractedField {
                text: sanitize(&spec.label, &value.value),
                label: value.label,
                kind: spec.kind,
                source: value.source,
                raw_value: value.value,
            }
        })
        .collect();

    let narrative = fields
        .iter()
        .find(|f| f.kind == FieldKind::Narrative)
        .map(|f| NarrativeSplit {
            rich: DropCap::split(&f.text.rich),
            constrained: DropCap::split(f.text.constrained.as_str()),
        });

    if degraded {
        log::warn!(
            "day {} bundle is degraded, required fields fell back",
            reference.day_index
        );
    }

    ContentBundle {
        reference,
        fields,
        narrative,
        degraded,
    }
}
