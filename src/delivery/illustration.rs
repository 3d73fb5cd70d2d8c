use anyhow::Context;
use std::time::Duration;
use url::Url;

use crate::sanitize::ChannelText;

pub const MAX_TOKEN_WORDS: usize = 12;
pub const DEFAULT_TOKEN: &str = "abstract-art";

#[derive(Debug, thiserror::Error)]
pub enum IllustrationError {
    #[error("Invalid illustration base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Illustration service error (status {status})")]
    ApiStatus { status: u16 },
    #[error("Illustration response was empty")]
    EmptyBody,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Reduce a description to a lowercase slug of ASCII words joined by `-`.
pub fn illustration_token(description: &str, max_words: usize) -> String {
    let cleaned: String = description
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    let token = cleaned
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join("-");
    if token.is_empty() {
        DEFAULT_TOKEN.to_string()
    } else {
        token
    }
}

/// Token for a sanitised illustration field. A placeholder constrained value
/// carries none of the description, so it maps to the default token.
pub fn field_token(text: &ChannelText, max_words: usize) -> String {
    if text.constrained.is_placeholder() {
        log::debug!("illustration description has no ASCII content, using default token");
        return DEFAULT_TOKEN.to_string();
    }
    illustration_token(text.constrained.as_str(), max_words)
}

/// Append `token` as the last path segment of `base`.
pub fn illustration_url(base: &str, token: &str) -> Result<Url, IllustrationError> {
    let mut url =
        Url::parse(base).map_err(|_| IllustrationError::InvalidBaseUrl(base.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| IllustrationError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .push(token);
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct IllustrationFetcher {
    client: reqwest::Client,
}

impl IllustrationFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, IllustrationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("dailyverse/0.1")
            .build()
            .context("Failed to build illustration HTTP client")?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, IllustrationError> {
        log::info!("fetching illustration {}...", url);
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .context("Illustration request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(IllustrationError::ApiStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .context("Illustration response body")?;
        if bytes.is_empty() {
            return Err(IllustrationError::EmptyBody);
        }
        log::debug!("illustration is {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
