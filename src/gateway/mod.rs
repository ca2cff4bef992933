/*! Model gateway

The gateway turns an ordered batch of sayings into exactly as many records, or fails as a whole.

Gateways implement [Gateway]. The production one, [Fallback], walks an ordered list of
[Backend]s (a primary one and any registered fallbacks) and returns the first conforming answer.
!*/
mod chat;
mod config;
pub mod prompt;

pub use chat::{ChatBackend, ChatBackendBuilder};
pub use config::{backends_from_env, backends_from_lookup};

use log::{info, warn};

use crate::error::Error;
use crate::record::SayingRecord;

/// Batch in, positionally aligned records out.
///
/// A `None` item is a saying the model returned nothing for.
/// Implementations must either return exactly `sayings.len()` items or an error.
pub trait Gateway {
    fn call(
        &self,
        sayings: &[String],
        extra_instructions: Option<&str>,
    ) -> Result<Vec<Option<SayingRecord>>, Error>;
}

/// Fully built request, shared by every backend attempt of a call.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub system: String,
    pub prompt: String,
    pub len: usize,
}

impl BatchRequest {
    pub fn new(sayings: &[String], extra_instructions: Option<&str>) -> Self {
        Self {
            system: prompt::SYSTEM.to_string(),
            prompt: prompt::user_prompt(sayings, extra_instructions),
            len: sayings.len(),
        }
    }
}

/// A single backend configuration.
pub trait Backend {
    /// identifier used in logs, `provider/model`.
    fn name(&self) -> String;
    fn complete(&self, request: &BatchRequest) -> Result<Vec<Option<SayingRecord>>, Error>;
}

/// Tries backends in order, returning the first answer that has the right record count.
pub struct Fallback {
    backends: Vec<Box<dyn Backend>>,
}

impl Fallback {
    pub fn new(backends: Vec<Box<dyn Backend>>) -> Result<Self, Error> {
        if backends.is_empty() {
            return Err(Error::Config(
                "at least one backend must be configured".to_string(),
            ));
        }
        Ok(Self { backends })
    }

    pub fn backend_names(&self) -> Vec<String> {
        self.backends.iter().map(|b| b.name()).collect()
    }
}

impl Gateway for Fallback {
    fn call(
        &self,
        sayings: &[String],
        extra_instructions: Option<&str>,
    ) -> Result<Vec<Option<SayingRecord>>, Error> {
        let request = BatchRequest::new(sayings, extra_instructions);
        let mut last_error = None;

        for backend in &self.backends {
            info!(
                "Calling model: {} for {} sayings",
                backend.name(),
                sayings.len()
            );
            let result = backend.complete(&request).and_then(|records| {
                if records.len() == request.len {
                    Ok(records)
                } else {
                    Err(Error::Backend {
                        backend: backend.name(),
                        reason: format!(
                            "expected {} records, got {}",
                            request.len,
                            records.len()
                        ),
                    })
                }
            });

            match result {
                Ok(records) => return Ok(records),
                Err(e) => {
                    warn!("Error with model {}: {}", backend.name(), e);
                    last_error = Some(e);
                }
            }
        }

        // backends is never empty, see Fallback::new
        Err(Error::Gateway(Box::new(last_error.unwrap_or_else(|| {
            Error::Custom("no backend was tried".to_string())
        }))))
    }
}
