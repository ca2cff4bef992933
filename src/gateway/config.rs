//! Backend configuration from the process environment.
//!
//! - `MISTRAL_API_KEY` registers the primary backend (`MISTRAL_MODEL`, default `mistral-large-latest`).
//! - `GOOGLE_GENERATIVE_AI_API_KEY` or `GOOGLE_API_KEY` registers Gemini as a fallback
//!   (`GEMINI_MODEL`, default `gemini-2.0-flash-exp`).
use log::{debug, info};

use super::{Backend, ChatBackendBuilder};
use crate::error::Error;

const MISTRAL_URL: &str = "https://api.mistral.ai/v1";
const MISTRAL_MODEL: &str = "mistral-large-latest";
const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Build the ordered backend list using `lookup` to read variables.
pub fn backends_from_lookup<F>(lookup: F) -> Result<Vec<Box<dyn Backend>>, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let mut backends: Vec<Box<dyn Backend>> = Vec::new();

    if let Some(key) = var("MISTRAL_API_KEY") {
        let model = var("MISTRAL_MODEL").unwrap_or_else(|| MISTRAL_MODEL.to_string());
        let backend = ChatBackendBuilder::default()
            .provider("mistral")
            .model(&model)
            .base_url(MISTRAL_URL)
            .api_key(&key)
            .build()?;
        backends.push(Box::new(backend));
    } else {
        debug!("MISTRAL_API_KEY not set");
    }

    if let Some(key) = var("GOOGLE_GENERATIVE_AI_API_KEY").or_else(|| var("GOOGLE_API_KEY")) {
        let model = var("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string());
        let backend = ChatBackendBuilder::default()
            .provider("google")
            .model(&model)
            .base_url(GEMINI_URL)
            .api_key(&key)
            .build()?;
        backends.push(Box::new(backend));
    } else {
        debug!("no Google API key set");
    }

    if backends.is_empty() {
        return Err(Error::Config(
            "no backend configured: set MISTRAL_API_KEY or GOOGLE_GENERATIVE_AI_API_KEY".to_string(),
        ));
    }

    info!(
        "using backends: {}",
        backends
            .iter()
            .map(|b| b.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(backends)
}

/// Build the ordered backend list from the process environment.
pub fn backends_from_env() -> Result<Vec<Box<dyn Backend>>, Error> {
    backends_from_lookup(|name| std::env::var(name).ok())
}
