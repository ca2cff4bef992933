/*! Chat completions backend.

Talks to any OpenAI-compatible `/chat/completions` endpoint (Mistral, Gemini's compatibility layer...)
and requests a JSON answer following the [BatchData] schema.
!*/
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Backend, BatchRequest};
use crate::error::Error;
use crate::record::{BatchData, SayingRecord};

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    schema: schemars::schema::RootSchema,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<Message<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

/// Strip a surrounding markdown code fence, if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            // drop the info string (```json)
            let rest = rest.split_once('\n').map_or("", |(_, body)| body);
            rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

/// Parse the message content of a completion into records.
fn parse_content(content: &str) -> Result<Vec<Option<SayingRecord>>, Error> {
    let data: BatchData = serde_json::from_str(strip_code_fence(content))?;
    Ok(data.sayings)
}

/// OpenAI-compatible chat completions backend.
pub struct ChatBackend {
    provider: String,
    model: String,
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl ChatBackend {
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn backend_error(&self, reason: String) -> Error {
        Error::Backend {
            backend: self.name(),
            reason,
        }
    }
}

impl Backend for ChatBackend {
    fn name(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }

    fn complete(&self, request: &BatchRequest) -> Result<Vec<Option<SayingRecord>>, Error> {
        let body = CompletionRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "sayings",
                    schema: BatchData::schema(),
                },
            },
        };

        debug!("POST {} ({} sayings)", self.endpoint(), request.len);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(self.backend_error(format!("API request failed with status {status}: {text}")));
        }

        let completion: CompletionResponse = response.json()?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| self.backend_error("completion has no content".to_string()))?;
        debug!("{} answered:\n{}", self.name(), content);

        parse_content(&content)
            .map_err(|e| self.backend_error(format!("response does not follow the schema: {e}")))
    }
}

/// Chat backend builder.
///
/// `provider`, `model`, `base_url` and `api_key` are mandatory.
/// There is no request timeout unless one is set.
#[derive(Default)]
pub struct ChatBackendBuilder {
    provider: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl ChatBackendBuilder {
    pub fn provider(&mut self, provider: &str) -> &mut Self {
        self.provider = Some(provider.to_string());
        self
    }

    pub fn model(&mut self, model: &str) -> &mut Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn base_url(&mut self, base_url: &str) -> &mut Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn api_key(&mut self, api_key: &str) -> &mut Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(&self) -> Result<ChatBackend, Error> {
        fn required(field: &Option<String>, name: &str) -> Result<String, Error> {
            field
                .clone()
                .ok_or_else(|| Error::Config(format!("No {name} provided")))
        }

        let provider = required(&self.provider, "provider")?;
        let model = required(&self.model, "model")?;
        let base_url = required(&self.base_url, "base url")?;
        let api_key = required(&self.api_key, "api key")?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        Ok(ChatBackend {
            provider,
            model,
            base_url,
            api_key,
            client,
        })
    }
}
