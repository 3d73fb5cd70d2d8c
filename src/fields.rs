use serde::Serialize;

/// Label the delivery collaborators use for headlines and subjects.
pub const TITLE_LABEL: &str = "TITLE";

/// How the assembler and delivery collaborators treat a field beyond plain text.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    /// Long-form story; word-limited and split for the drop-cap.
    Narrative,
    /// Visual description fed to the illustration URL builder.
    Illustration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: String,
    pub fallback: String,
    pub required: bool,
    pub kind: FieldKind,
    pub max_words: Option<usize>,
    /// What the model is asked to put under the label.
    pub instruction: String,
}

impl FieldSpec {
    pub fn new(label: &str, fallback: &str) -> Self {
        Self {
            label: label.to_string(),
            fallback: fallback.to_string(),
            required: false,
            kind: FieldKind::Text,
            max_words: None,
            instruction: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn max_words(mut self, max_words: usize) -> Self {
        self.max_words = Some(max_words);
        self
    }

    pub fn instruction(mut self, instruction: &str) -> Self {
        self.instruction = instruction.to_string();
        self
    }
}

pub fn default_fields(story_max_words: usize) -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("SHLOKA", "Shloka unavailable today.")
            .required()
            .instruction("The original Sanskrit verse."),
        FieldSpec::new("TRANSLATION", "Translation unavailable today.")
            .instruction("A faithful Hindi and English translation of the verse."),
        FieldSpec::new(TITLE_LABEL, "Today's Reflection")
            .required()
            .instruction("A short evocative title for today's story, at most eight words."),
        FieldSpec::new("SUMMARY", "Take a quiet moment with today's verse.")
            .instruction("One or two sentences summarising the verse's teaching."),
        FieldSpec::new(
            "STORY",
            "Today's story could not be prepared. Sit with the verse and let it speak to you.",
        )
        .required()
        .kind(FieldKind::Narrative)
        .max_words(story_max_words)
        .instruction("A modern-day story that brings the verse to life."),
        FieldSpec::new("CHALLENGE", "Reflect on today's verse for five quiet minutes.")
            .instruction("One small, concrete action the reader can take today."),
        FieldSpec::new("VIBE", "serene sunrise over a calm river, soft watercolor")
            .kind(FieldKind::Illustration)
            .instruction("A short visual description for an illustration, no text or letters."),
    ]
}
