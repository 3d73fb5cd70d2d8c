#[path = "../common/mod.rs"]
mod common;

use common::{gita_catalog, SAMPLE_RESPONSE};
use dailyverse::bundle::assemble_for;
use dailyverse::delivery::message::{compose, escape_html, subject};
use dailyverse::extract::Extractor;
use dailyverse::fields::default_fields;
use dailyverse::schedule::ScheduleReference;

fn reference() -> ScheduleReference {
    ScheduleReference {
        day_index: 3,
        section_index: 1,
        position_in_section: 3,
    }
}

#[test]
fn subject_includes_day_reference_and_title() {
    let extractor = Extractor::new(&default_fields(400)).expect("valid specs");
    let bundle = assemble_for(reference(), Some(SAMPLE_RESPONSE), &extractor);

    assert_eq!(
        subject(&bundle, &gita_catalog()),
        "Day 3 | Chapter 1, Verse 3 | The Question We Ask"
    );
}

#[test]
fn compose_renders_rich_fields_with_drop_cap() {
    let extractor = Extractor::new(&default_fields(400)).expect("valid specs");
    let bundle = assemble_for(reference(), Some(SAMPLE_RESPONSE), &extractor);

    let message = compose(
        &bundle,
        &gita_catalog(),
        Some("https://img.example/prompt/quiet-corridor"),
    );

    assert!(message.html.contains("BHAGAVAD GITA JOURNEY - DAY 3"));
    assert!(message.html.contains("<h1>The Question We Ask</h1>"));
    assert!(message.html.contains(">M</span>eera sat in the hospital corridor"));
    assert!(message.html.contains("<h2>Challenge</h2>"));
    assert!(message
        .html
        .contains("<img src=\"https://img.example/prompt/quiet-corridor\""));
    // The illustration description is not shown as text.
    assert!(!message.html.contains("warm golden light"));
}

#[test]
fn compose_keeps_non_latin_text_and_escapes_markup() {
    let extractor = Extractor::new(&default_fields(400)).expect("valid specs");
    let raw = "[TITLE]: <b>Dharma</b> & Duty\n[SHLOKA]: धर्मक्षेत्रे कुरुक्षेत्रे\n[STORY]: \u{201C}Wait,\u{201D} she said.";
    let bundle = assemble_for(reference(), Some(raw), &extractor);

    let message = compose(&bundle, &gita_catalog(), None);

    assert!(message.html.contains("&lt;b&gt;Dharma&lt;/b&gt; &amp; Duty"));
    assert!(message.html.contains("धर्मक्षेत्रे कुरुक्षेत्रे"));
    assert!(message.html.contains("<p>&quot;<span"));
    assert!(message.html.contains(">W</span>ait,&quot; she said."));
    assert!(!message.html.contains("<img"));
}

#[test]
fn compose_declares_utf8_charset() {
    let extractor = Extractor::new(&default_fields(400)).expect("valid specs");
    let raw = "[SHLOKA]: धर्मक्षेत्रे कुरुक्षेत्रे\n[VIBE]: शांत नदी पर सूर्योदय";
    let bundle = assemble_for(reference(), Some(raw), &extractor);

    let message = compose(&bundle, &gita_catalog(), None);

    assert!(message.html.starts_with("<!DOCTYPE html>"));
    assert!(message.html.contains("<head><meta charset=\"utf-8\"></head>"));
    let head = message.html.find("<meta charset").expect("charset present");
    let body = message.html.find("<body").expect("body present");
    assert!(head < body);
}

#[test]
fn compose_keeps_space_after_one_letter_first_word() {
    let extractor = Extractor::new(&default_fields(400)).expect("valid specs");
    let bundle = assemble_for(reference(), Some("[STORY]: A man walked home."), &extractor);

    let message = compose(&bundle, &gita_catalog(), None);

    assert!(message.html.contains(">A</span> man walked home.</p>"));
}

#[test]
fn compose_uses_fallbacks_when_generation_failed() {
    let extractor = Extractor::new(&default_fields(400)).expect("valid specs");
    let bundle = assemble_for(reference(), None, &extractor);

    let message = compose(&bundle, &gita_catalog(), None);

    assert_eq!(
        message.subject,
        "Day 3 | Chapter 1, Verse 3 | Today's Reflection"
    );
    assert!(message.html.contains("Shloka unavailable today."));
}

#[test]
fn escape_html_escapes_special_characters() {
    assert_eq!(
        escape_html(r#"<a href="x">'&'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
    );
}
