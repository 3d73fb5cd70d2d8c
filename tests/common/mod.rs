#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dailyverse::config::{ScheduleConfig, GITA_CHAPTER_LENGTHS};
use std::env;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub struct EnvGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_env("DAILYVERSE_");
    }
}

pub fn with_dailyverse_env<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> EnvGuard {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    clear_env("DAILYVERSE_");
    for (k, v) in vars {
        env::set_var(k, v);
    }
    EnvGuard { _lock: guard }
}

fn clear_env(prefix: &str) {
    for (key, _) in env::vars() {
        if key.starts_with(prefix) {
            env::remove_var(key);
        }
    }
}

pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_time(NaiveTime::MIN)
}

pub fn gita_catalog() -> ScheduleConfig {
    ScheduleConfig {
        start_date: NaiveDate::from_ymd_opt(2026, 2, 2).expect("valid date"),
        section_lengths: GITA_CHAPTER_LENGTHS.to_vec(),
        today: None,
        catalog_name: "Bhagavad Gita".to_string(),
        section_noun: "Chapter".to_string(),
        position_noun: "Verse".to_string(),
    }
}

pub const SAMPLE_RESPONSE: &str = "\
[SHLOKA]: dhritarashtra uvacha dharma-kshetre kuru-kshetre
[TRANSLATION]: Dhritarashtra said: O Sanjaya, what did my sons do on the field of dharma?
[TITLE]: The Question We Ask
[SUMMARY]: A blind king asks what is happening, and in asking reveals his fears.
[STORY]: Meera sat in the hospital corridor and asked the nurse, again, what was happening.
She already knew. She simply could not bear to see it yet.
[CHALLENGE]: Ask one honest question today that you have been avoiding.
[VIBE]: quiet hospital corridor at dawn, warm golden light, watercolor
";
