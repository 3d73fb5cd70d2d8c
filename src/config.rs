use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

use crate::schedule;

/// Verse counts of the 18 chapters of the Bhagavad Gita.
pub const GITA_CHAPTER_LENGTHS: [u32; 18] = [
    47, 72, 43, 42, 29, 47, 30, 28, 34, 42, 55, 20, 35, 27, 20, 24, 28, 78,
];

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(flatten)]
    pub gemini: GeminiConfig,
    #[serde(flatten)]
    pub schedule: ScheduleConfig,
    #[serde(flatten)]
    pub output: OutputConfig,
    #[serde(flatten)]
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = envy::prefixed("DAILYVERSE_").from_env::<AppConfig>()?;
        schedule::validate(&config.schedule.section_lengths)
            .context("Invalid DAILYVERSE_SECTION_LENGTHS")?;
        Ok(config)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeminiConfig {
    #[serde(rename = "gemini_api_key")]
    pub api_key: String,
    #[serde(rename = "gemini_model", default = "default_gemini_model")]
    pub model: String,
    #[serde(
        rename = "gemini_timeout_secs",
        default = "default_gemini_timeout_secs",
        deserialize_with = "deserialize_parsed"
    )]
    pub timeout_secs: u64,
    #[serde(
        rename = "gemini_temperature",
        default,
        deserialize_with = "deserialize_parsed"
    )]
    pub temperature: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScheduleConfig {
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(
        default = "default_section_lengths",
        deserialize_with = "deserialize_section_lengths"
    )]
    pub section_lengths: Vec<u32>,
    /// Pretend the run happens on this date instead of today.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default = "default_catalog_name")]
    pub catalog_name: String,
    #[serde(default = "default_section_noun")]
    pub section_noun: String,
    #[serde(default = "default_position_noun")]
    pub position_noun: String,
}

impl ScheduleConfig {
    pub fn epoch(&self) -> NaiveDateTime {
        self.start_date.and_time(NaiveTime::MIN)
    }

    pub fn now(&self) -> NaiveDateTime {
        match self.today {
            Some(date) => date.and_time(NaiveTime::MIN),
            None => Local::now().naive_local(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(
        default = "default_story_max_words",
        deserialize_with = "deserialize_parsed"
    )]
    pub story_max_words: usize,
    #[serde(default = "default_illustration_base_url")]
    pub illustration_base_url: String,
    #[serde(default = "default_true", deserialize_with = "deserialize_parsed")]
    pub illustration_fetch: bool,
    #[serde(
        default = "default_illustration_timeout_secs",
        deserialize_with = "deserialize_parsed"
    )]
    pub illustration_timeout_secs: u64,
}

/// SMTP delivery. Mail is only sent when both credentials are set.
#[derive(Deserialize, Debug, Clone)]
pub struct MailConfig {
    #[serde(default)]
    pub email_user: Option<String>,
    #[serde(default)]
    pub email_pass: Option<String>,
    /// Defaults to the sender.
    #[serde(default)]
    pub email_to: Option<String>,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port", deserialize_with = "deserialize_parsed")]
    pub smtp_port: u16,
    #[serde(
        default = "default_smtp_timeout_secs",
        deserialize_with = "deserialize_parsed"
    )]
    pub smtp_timeout_secs: u64,
}

impl MailConfig {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let user = self.email_user.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let pass = self.email_pass.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((user, pass))
    }

    pub fn recipient(&self) -> Option<&str> {
        self.email_to
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| self.credentials().map(|(user, _)| user))
    }
}

// Flattened envy values always arrive as strings.
fn deserialize_parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<T>().map_err(serde::de::Error::custom)
}

fn deserialize_section_lengths<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.split(',')
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<u32>().map_err(|_| {
                serde::de::Error::custom(format!(
                    "invalid section length '{}': expected a positive integer",
                    entry
                ))
            })
        })
        .collect()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_timeout_secs() -> u64 {
    90
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 2).unwrap_or(NaiveDate::MIN)
}

fn default_section_lengths() -> Vec<u32> {
    GITA_CHAPTER_LENGTHS.to_vec()
}

fn default_catalog_name() -> String {
    "Bhagavad Gita".to_string()
}

fn default_section_noun() -> String {
    "Chapter".to_string()
}

fn default_position_noun() -> String {
    "Verse".to_string()
}

fn default_out_dir() -> String {
    "out".to_string()
}

fn default_story_max_words() -> usize {
    400
}

fn default_illustration_base_url() -> String {
    "https://image.pollinations.ai/prompt/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_illustration_timeout_secs() -> u64 {
    30
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout_secs() -> u64 {
    30
}
