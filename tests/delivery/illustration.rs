use dailyverse::bundle::assemble_for;
use dailyverse::delivery::illustration::{
    field_token, illustration_token, illustration_url, IllustrationError, IllustrationFetcher,
    DEFAULT_TOKEN, MAX_TOKEN_WORDS,
};
use dailyverse::extract::Extractor;
use dailyverse::fields::{default_fields, FieldKind};
use dailyverse::sanitize::sanitize;
use dailyverse::schedule::ScheduleReference;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn token_is_lowercase_ascii_words_joined_by_dashes() {
    assert_eq!(
        illustration_token("Quiet corridor at dawn, warm golden light!", MAX_TOKEN_WORDS),
        "quiet-corridor-at-dawn-warm-golden-light"
    );
}

#[test]
fn token_is_limited_to_max_words() {
    assert_eq!(illustration_token("one two three four", 2), "one-two");
}

#[test]
fn token_falls_back_when_nothing_survives() {
    assert_eq!(illustration_token("?!  ...", MAX_TOKEN_WORDS), DEFAULT_TOKEN);
    assert_eq!(illustration_token("", MAX_TOKEN_WORDS), DEFAULT_TOKEN);
}

#[test]
fn non_latin_description_uses_default_token() {
    let extractor = Extractor::new(&default_fields(400)).expect("valid specs");
    let reference = ScheduleReference {
        day_index: 1,
        section_index: 1,
        position_in_section: 1,
    };
    let bundle = assemble_for(
        reference,
        Some("[VIBE]: शांत नदी पर सूर्योदय"),
        &extractor,
    );
    let vibe = bundle
        .field_of_kind(FieldKind::Illustration)
        .expect("illustration field");

    assert_eq!(field_token(&vibe.text, MAX_TOKEN_WORDS), DEFAULT_TOKEN);
}

#[test]
fn field_token_uses_ascii_description() {
    let text = sanitize("VIBE", "Calm river at dawn \u{2014} watercolor");

    assert_eq!(
        field_token(&text, MAX_TOKEN_WORDS),
        "calm-river-at-dawn-watercolor"
    );
}

#[test]
fn url_appends_token_to_base_path() {
    let url = illustration_url("https://image.pollinations.ai/prompt/", "calm-river")
        .expect("valid url");
    assert_eq!(url.as_str(), "https://image.pollinations.ai/prompt/calm-river");

    let url = illustration_url("https://img.example/render", "calm-river").expect("valid url");
    assert_eq!(url.as_str(), "https://img.example/render/calm-river");
}

#[test]
fn url_rejects_invalid_base() {
    match illustration_url("not a url", "calm-river") {
        Err(IllustrationError::InvalidBaseUrl(base)) => assert_eq!(base, "not a url"),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn fetches_image_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prompt/calm-river"))
        .and(header("user-agent", "dailyverse/0.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .mount(&server)
        .await;

    let fetcher = IllustrationFetcher::new(5).expect("Failed to create fetcher");
    let url = illustration_url(&format!("{}/prompt/", server.uri()), "calm-river")
        .expect("valid url");

    let bytes = fetcher.fetch(&url).await.expect("Illustration fetch failed");

    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[tokio::test]
async fn reports_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let fetcher = IllustrationFetcher::new(5).expect("Failed to create fetcher");
    let url = Url::parse(&format!("{}/prompt/x", server.uri())).expect("valid url");

    match fetcher.fetch(&url).await {
        Err(IllustrationError::ApiStatus { status }) => assert_eq!(status, 502),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn rejects_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let fetcher = IllustrationFetcher::new(5).expect("Failed to create fetcher");
    let url = Url::parse(&format!("{}/prompt/x", server.uri())).expect("valid url");

    assert!(matches!(
        fetcher.fetch(&url).await,
        Err(IllustrationError::EmptyBody)
    ));
}
