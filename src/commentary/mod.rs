//! AI text generation for nicknames and match hype.
//!
//! These calls sit outside the bracket: they only read participant/match data and hand back
//! display text. Failures never surface as errors; they degrade to a fixed placeholder.

mod gemini;
mod prompts;

pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompts::{clean_nickname, compose_nickname, match_hype_prompt, nickname_prompt};

use crate::models::{MatchId, Tournament};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Returned when the generator could not be reached or answered with an error.
pub const UNAVAILABLE_PLACEHOLDER: &str = "The AI commentator is out for a snack. Try again!";
/// Returned when the generator answered but produced no text.
pub const EMPTY_PLACEHOLDER: &str = "AI is taking a nap...";

#[derive(Debug)]
pub enum GenerationError {
    Http(reqwest::Error),
    /// The response carried no candidate text.
    EmptyResponse,
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::Http(e) => write!(f, "text generation request failed: {}", e),
            GenerationError::EmptyResponse => write!(f, "text generation returned no text"),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Http(e)
    }
}

/// A prompt-in, text-out generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Hype text for one match.
#[derive(Clone, Debug, Serialize)]
pub struct Commentary {
    pub match_id: MatchId,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// Run a prompt; never fails.
pub async fn generate_text(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(GenerationError::EmptyResponse) => {
            log::warn!("Text generation returned nothing");
            EMPTY_PLACEHOLDER.to_string()
        }
        Err(e) => {
            log::error!("Text generation error: {}", e);
            UNAVAILABLE_PLACEHOLDER.to_string()
        }
    }
}

/// Suggest a nickname, already cleaned of surrounding quotes. None for a blank name.
///
/// A placeholder answer is still a nickname as far as the caller is concerned.
pub async fn generate_nickname(
    generator: &dyn TextGenerator,
    name: &str,
    affiliation: Option<&str>,
) -> Option<String> {
    let prompt = nickname_prompt(name, affiliation)?;
    let raw = generate_text(generator, &prompt).await;
    Some(clean_nickname(&raw))
}

/// Hype commentary for a match in `tournament`. None for byes and unknown matches, which are
/// never sent to the generator.
pub async fn generate_match_hype(
    generator: &dyn TextGenerator,
    tournament: &Tournament,
    match_id: MatchId,
) -> Option<Commentary> {
    let prompt = match_hype_prompt(tournament, match_id)?;
    Some(hype_from_prompt(generator, match_id, &prompt).await)
}

/// Second half of [`generate_match_hype`] for callers that build the prompt under a lock and
/// release it before awaiting.
pub async fn hype_from_prompt(
    generator: &dyn TextGenerator,
    match_id: MatchId,
    prompt: &str,
) -> Commentary {
    Commentary {
        match_id,
        text: generate_text(generator, prompt).await,
        generated_at: Utc::now(),
    }
}
