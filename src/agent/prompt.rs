use crate::config::ScheduleConfig;
use crate::fields::{FieldKind, FieldSpec};
use crate::schedule::ScheduleReference;

pub const PREAMBLE: &str = r#"
You are a warm, thoughtful teacher of scripture writing a short daily email for busy modern
readers. You explain each verse faithfully, without inventing doctrine, and you connect it to
everyday life through a grounded, original story. Your tone is calm, hopeful and practical.
Never use markdown headings, tables or code blocks.
"#;

pub fn build_prompt(
    reference: &ScheduleReference,
    catalog: &ScheduleConfig,
    specs: &[FieldSpec],
) -> String {
    let mut prompt = format!(
        "Today is day {} of a daily journey through the {}.\nExplain {} {} {}, {} {}.",
        reference.day_index,
        catalog.catalog_name,
        catalog.catalog_name,
        catalog.section_noun.to_uppercase(),
        reference.section_index,
        catalog.position_noun.to_uppercase(),
        reference.position_in_section,
    );

    prompt.push_str(
        "\n\nReply using exactly these labels, each starting a new line, in this order:\n",
    );
    for spec in specs {
        let instruction = spec.instruction.trim();
        let instruction = if instruction.is_empty() {
            spec.label.to_lowercase()
        } else {
            instruction.to_string()
        };
        prompt.push_str(&format!("[{}]: {}", spec.label, instruction));
        if let (FieldKind::Narrative, Some(max)) = (spec.kind, spec.max_words) {
            prompt.push_str(&format!(" Keep it under {} words.", max));
        }
        prompt.push('\n');
    }
    prompt.push_str("\nDo not write anything before the first label or after the last one.");

    prompt
}
