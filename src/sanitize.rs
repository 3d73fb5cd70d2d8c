use serde::Serialize;

/// Text limited to printable ASCII plus newlines that is never blank.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ConstrainedText {
    text: String,
    #[serde(skip)]
    placeholder: bool,
}

impl ConstrainedText {
    /// Rejects values that are blank or hold characters outside the constrained set.
    pub fn new(value: String) -> Option<Self> {
        if value.trim().is_empty() || !value.chars().all(is_constrained_char) {
            return None;
        }
        Some(Self {
            text: value,
            placeholder: false,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when nothing of the source value survived and this holds the
    /// "see rich channel" stand-in.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

impl std::fmt::Display for ConstrainedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// One field in both output channels.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChannelText {
    /// Full character set with typographic variants flattened; for the message body.
    pub rich: String,
    /// Printable ASCII only; for the document renderer.
    pub constrained: ConstrainedText,
}

/// Produce both channel representations of `value`. When nothing survives the
/// ASCII filter the constrained side is a placeholder naming `label`.
pub fn sanitize(label: &str, value: &str) -> ChannelText {
    let rich = normalize_typography(value);
    let constrained = ConstrainedText::new(strip_to_ascii(&rich)).unwrap_or_else(|| {
        log::debug!("{} has no printable ASCII content, using placeholder", label);
        placeholder(label)
    });
    ChannelText { rich, constrained }
}

/// Replace curly quotes, dashes, bullets and the ellipsis glyph with ASCII.
pub fn normalize_typography(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => out.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' => {
                out.push('-')
            }
            '\u{2022}' | '\u{2023}' | '\u{2043}' | '\u{25E6}' | '\u{00B7}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{202F}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

fn strip_to_ascii(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch == '\t' { ' ' } else { ch })
        .filter(|&ch| is_constrained_char(ch))
        .collect()
}

fn is_constrained_char(ch: char) -> bool {
    ch == '\n' || (' '..='~').contains(&ch)
}

fn placeholder(label: &str) -> ConstrainedText {
    let label = strip_to_ascii(label);
    let label = label.trim();
    let text = if label.is_empty() {
        "See rich channel".to_string()
    } else {
        format!("{}: see rich channel", label)
    };
    ConstrainedText {
        text,
        placeholder: true,
    }
}
