use serde::Serialize;

use crate::bundle::{ContentBundle, DropCap};
use crate::config::ScheduleConfig;
use crate::fields::{FieldKind, TITLE_LABEL};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub html: String,
}

pub fn subject(bundle: &ContentBundle, catalog: &ScheduleConfig) -> String {
    let reference = bundle.reference();
    let mut subject = format!(
        "Day {} | {} {}, {} {}",
        reference.day_index,
        catalog.section_noun,
        reference.section_index,
        catalog.position_noun,
        reference.position_in_section
    );
    if let Some(title) = bundle.field(TITLE_LABEL) {
        let title = title.text.rich.lines().next().unwrap_or_default().trim();
        if !title.is_empty() {
            subject.push_str(" | ");
            subject.push_str(title);
        }
    }
    subject
}

/// Build the HTML email from the rich channel only.
pub fn compose(
    bundle: &ContentBundle,
    catalog: &ScheduleConfig,
    illustration_url: Option<&str>,
) -> Message {
    let reference = bundle.reference();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n");
    html.push_str("<body style=\"font-family: Georgia, serif; max-width: 640px; margin: auto; color: #2d2a26;\">\n");
    html.push_str(&format!(
        "<p style=\"letter-spacing: 2px; color: #b5651d;\">{} JOURNEY - DAY {}</p>\n",
        escape_html(&catalog.catalog_name.to_uppercase()),
        reference.day_index
    ));
    if let Some(title) = bundle.field(TITLE_LABEL) {
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(&title.text.rich)));
    }
    html.push_str(&format!(
        "<p><em>{} {}, {} {}</em></p>\n",
        escape_html(&catalog.section_noun),
        reference.section_index,
        escape_html(&catalog.position_noun),
        reference.position_in_section
    ));

    if let Some(url) = illustration_url {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Illustration\" style=\"width: 100%; border-radius: 8px;\">\n",
            escape_html(url)
        ));
    }

    for field in bundle.fields() {
        if field.label.eq_ignore_ascii_case(TITLE_LABEL) {
            continue;
        }
        match field.kind {
            FieldKind::Illustration => continue,
            FieldKind::Narrative => {
                html.push_str(&format!("<h2>{}</h2>\n", heading(&field.label)));
                let split = bundle
                    .narrative()
                    .map(|n| n.rich.clone())
                    .unwrap_or_else(|| DropCap::split(&field.text.rich));
                // `rest` keeps its leading space after a one-letter first word.
                html.push_str(&format!(
                    "<p>{}<span style=\"float: left; font-size: 3em; line-height: 0.9; padding-right: 6px; color: #b5651d;\">{}</span>{}</p>\n",
                    escape_html(&split.lead),
                    escape_html(&split.initial.to_string()),
                    escape_html(split.rest.trim_end()).replace('\n', "<br>\n")
                ));
            }
            FieldKind::Text => {
                html.push_str(&format!("<h2>{}</h2>\n", heading(&field.label)));
                html.push_str(&format!("<p>{}</p>\n", paragraphs(&field.text.rich)));
            }
        }
    }

    html.push_str("</body></html>\n");

    Message {
        subject: subject(bundle, catalog),
        html,
    }
}

fn heading(label: &str) -> String {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut titled: String = first.to_uppercase().collect();
    titled.push_str(&chars.as_str().to_lowercase());
    escape_html(&titled)
}

fn paragraphs(text: &str) -> String {
    escape_html(text.trim()).replace('\n', "<br>\n")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
