use anyhow::Context;
use dailyverse::agent::prompt::build_prompt;
use dailyverse::agent::{generate_raw, GeminiGenerator};
use dailyverse::bundle::assemble_for;
use dailyverse::config::AppConfig;
use dailyverse::delivery::illustration::{
    field_token, illustration_url, IllustrationFetcher, MAX_TOKEN_WORDS,
};
use dailyverse::delivery::mail::Mailer;
use dailyverse::delivery::{document, message, output};
use dailyverse::extract::Extractor;
use dailyverse::fields::{default_fields, FieldKind};
use dailyverse::schedule::resolve;
use env_logger::Env;
use std::env;
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse the specified (or default) .env file
    let dotenv_path = env::var("DAILYVERSE_DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv_result = dotenvy::from_path(&dotenv_path);

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match dotenv_result {
        Ok(()) => log::info!("Loaded env from {}", dotenv_path),
        Err(err) => log::debug!("No .env loaded from {}: {}", dotenv_path, err),
    }

    let config = AppConfig::from_env().context("Reading configuration")?;
    let specs = default_fields(config.output.story_max_words);
    let extractor = Extractor::new(&specs).context("Building field extractor")?;

    let reference = resolve(
        config.schedule.now(),
        config.schedule.epoch(),
        &config.schedule.section_lengths,
    )
        .context("Resolving today's reference")?;
    log::info!(
        "day {}: {} {}, {} {}",
        reference.day_index,
        config.schedule.section_noun,
        reference.section_index,
        config.schedule.position_noun,
        reference.position_in_section
    );

    let prompt = build_prompt(&reference, &config.schedule, &specs);
    let raw = match GeminiGenerator::new(&config.gemini) {
        Ok(generator) => {
            let timeout = Duration::from_secs(config.gemini.timeout_secs);
            generate_raw(&generator, &prompt, timeout).await
        }
        Err(err) => {
            log::warn!("could not create Gemini client: {:#}", err);
            None
        }
    };

    let bundle = assemble_for(reference, raw.as_deref(), &extractor);

    let illustration = match bundle.field_of_kind(FieldKind::Illustration) {
        Some(field) => {
            let token = field_token(&field.text, MAX_TOKEN_WORDS);
            match illustration_url(&config.output.illustration_base_url, &token) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::warn!("skipping illustration: {}", err);
                    None
                }
            }
        }
        None => None,
    };

    let image = match (&illustration, config.output.illustration_fetch) {
        (Some(url), true) => {
            match IllustrationFetcher::new(config.output.illustration_timeout_secs) {
                Ok(fetcher) => match fetcher.fetch(url).await {
                    Ok(bytes) => Some(bytes),
                    Err(err) => {
                        log::warn!("illustration fetch failed: {}", err);
                        None
                    }
                },
                Err(err) => {
                    log::warn!("illustration fetch failed: {}", err);
                    None
                }
            }
        }
        _ => None,
    };

    let message = message::compose(
        &bundle,
        &config.schedule,
        illustration.as_ref().map(|u| u.as_str()),
    );
    let document = document::render(&bundle, &config.schedule);

    output::write_outputs(
        Path::new(&config.output.out_dir),
        &bundle,
        &message,
        &document,
        image.as_deref(),
    )
    .context("Writing outputs")?;

    if config.mail.credentials().is_some() {
        let sent = match Mailer::new(&config.mail) {
            Ok(mailer) => mailer.send(&message, &document, image.as_deref()).await,
            Err(err) => Err(err),
        };
        if let Err(err) = sent {
            log::warn!("email not sent: {}", err);
        }
    } else {
        log::info!("no email credentials set, skipping send");
    }

    println!("{}", message.subject);
    Ok(())
}
