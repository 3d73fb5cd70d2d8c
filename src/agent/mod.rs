pub mod prompt;

use anyhow::Error;
use std::future::Future;
use std::time::Duration;

use crate::config::GeminiConfig;
use prompt::PREAMBLE;

use rig::agent::Agent as RigAgent;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;
use rig::providers::gemini::completion::CompletionModel;

/// Anything that turns a prompt into raw model text.
pub trait Generator {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Error>>;
}

pub struct GeminiGenerator {
    agent: RigAgent<CompletionModel>,
    model: String,
}

impl GeminiGenerator {
    pub fn new(config: &GeminiConfig) -> Result<Self, Error> {
        let gemini_client = gemini::Client::new(&config.api_key)?;
        let agent = gemini_client
            .agent(&config.model)
            .preamble(PREAMBLE.trim())
            .temperature(config.temperature)
            .build();
        Ok(Self {
            agent,
            model: config.model.clone(),
        })
    }
}

impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        log::info!("sending prompt to {}", self.model);
        self.agent.prompt(prompt).await.map_err(Error::from)
    }
}

/// Run one bounded generation attempt. Errors, timeouts and blank replies all
/// come back as `None`; there is no retry.
pub async fn generate_raw<G: Generator>(
    generator: &G,
    prompt: &str,
    timeout: Duration,
) -> Option<String> {
    match tokio::time::timeout(timeout, generator.generate(prompt)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => {
            log::info!("received {} characters from model", text.len());
            Some(text)
        }
        Ok(Ok(_)) => {
            log::warn!("model returned an empty response");
            None
        }
        Ok(Err(err)) => {
            log::warn!("generation failed: {:#}", err);
            None
        }
        Err(_) => {
            log::warn!("generation timed out after {}s", timeout.as_secs());
            None
        }
    }
}
