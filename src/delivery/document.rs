use crate::bundle::{ContentBundle, DropCap};
use crate::config::ScheduleConfig;
use crate::fields::{FieldKind, TITLE_LABEL};
use crate::sanitize::sanitize;

pub const LINE_WIDTH: usize = 78;

/// Render the plain-text document from the constrained channel only.
///
/// The output never contains non-ASCII characters and every field block holds
/// at least one line of text.
pub fn render(bundle: &ContentBundle, catalog: &ScheduleConfig) -> String {
    let reference = bundle.reference();
    let catalog_name = sanitize("CATALOG", &catalog.catalog_name.to_uppercase());
    let section_noun = sanitize("SECTION", &catalog.section_noun);
    let position_noun = sanitize("POSITION", &catalog.position_noun);

    let mut doc = String::new();
    doc.push_str(&format!(
        "{} JOURNEY - DAY {}\n",
        catalog_name.constrained, reference.day_index
    ));
    doc.push_str(&format!(
        "{} {}, {} {}\n",
        section_noun.constrained,
        reference.section_index,
        position_noun.constrained,
        reference.position_in_section
    ));
    doc.push_str(&"=".repeat(LINE_WIDTH));
    doc.push('\n');

    if let Some(title) = bundle.field(TITLE_LABEL) {
        doc.push('\n');
        doc.push_str(&wrap(title.text.constrained.as_str(), LINE_WIDTH));
        doc.push('\n');
    }

    for field in bundle.fields() {
        if field.label.eq_ignore_ascii_case(TITLE_LABEL) || field.kind == FieldKind::Illustration
        {
            continue;
        }
        doc.push('\n');
        doc.push_str(&sanitize(&field.label, &field.label.to_uppercase()).constrained.to_string());
        doc.push('\n');
        doc.push_str(&"-".repeat(field.label.chars().count().clamp(1, LINE_WIDTH)));
        doc.push('\n');

        let body = if field.kind == FieldKind::Narrative {
            let split = bundle
                .narrative()
                .map(|n| n.constrained.clone())
                .unwrap_or_else(|| DropCap::split(field.text.constrained.as_str()));
            format!("{}[{}]{}", split.lead, split.initial, split.rest)
        } else {
            field.text.constrained.to_string()
        };
        doc.push_str(&wrap(&body, LINE_WIDTH));
        doc.push('\n');
    }

    doc
}

/// Greedy word wrap that keeps existing line breaks.
pub fn wrap(text: &str, width: usize) -> String {
    let mut out = Vec::new();
    for line in text.lines() {
        let mut current = String::new();
        for word in line.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > width {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        out.push(current);
    }
    out.join("\n")
}
