//! Reconstruction client
//!
//! A synchronous chat-completions client used to turn a compact LOIR
//! document back into source text. The call is a plain request/response
//! with an explicit timeout and a typed result: transport failures,
//! timeouts, non-success statuses, and malformed bodies all come back as
//! [`RecreateError`] values, never as an unwind. Generation temperature
//! is pinned to zero so reconstruction is as deterministic as the
//! service allows.
//!
//! Credentials are handed in explicitly through [`ClientConfig`]; the
//! crate reads no environment and holds no global state.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use loir_codec::recreate_prompt;

/// Settings for one client instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the chat-completions API.
    pub api_base: String,
    /// Bearer token for the service.
    pub api_key: String,
    /// Model to request.
    pub model: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Failures of the reconstruction step. All of these are reportable and
/// non-fatal to the encoding pipeline: the fingerprint is already produced
/// by the time a reconstruction is attempted.
#[derive(Debug)]
pub enum RecreateError {
    /// The request did not complete within the configured timeout.
    Timeout(Duration),
    /// Connection, TLS, or protocol failure.
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Api { status: u16, body: String },
    /// The response parsed but carried no choices.
    EmptyResponse,
}

impl fmt::Display for RecreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecreateError::Timeout(limit) => {
                write!(f, "reconstruction timed out after {}s", limit.as_secs())
            }
            RecreateError::Transport(e) => write!(f, "reconstruction transport failed: {e}"),
            RecreateError::Api { status, body } => {
                write!(f, "reconstruction service returned HTTP {status}: {body}")
            }
            RecreateError::EmptyResponse => {
                write!(f, "reconstruction service returned no choices")
            }
        }
    }
}

impl std::error::Error for RecreateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecreateError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// The reconstruction client.
#[derive(Debug)]
pub struct RecreateClient {
    config: ClientConfig,
    client: reqwest::blocking::Client,
}

impl RecreateClient {
    pub fn new(config: ClientConfig) -> Result<Self, RecreateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RecreateError::Transport)?;
        Ok(Self { config, client })
    }

    /// Ask the service to reconstruct source text from a compact LOIR
    /// document. Returns the raw response text; de-fencing is the caller's
    /// concern (the fidelity scorer already does it).
    pub fn recreate(&self, loir: &str) -> Result<String, RecreateError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: recreate_prompt(loir),
            }],
            temperature: 0.0,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RecreateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().map_err(|e| self.classify(e))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(RecreateError::EmptyResponse)
    }

    fn classify(&self, e: reqwest::Error) -> RecreateError {
        if e.is_timeout() {
            RecreateError::Timeout(self.config.timeout)
        } else {
            RecreateError::Transport(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            api_base: "https://api.openai.com/v1/".to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-4o".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![Message {
                role: "user",
                content: recreate_prompt("M:demo|i:|C:|f:"),
            }],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "user");
        let content = json["messages"][0]["content"]
            .as_str()
            .expect("content string");
        assert!(content.contains("M:demo|i:|C:|f:"));
        assert!(content.contains("Legend:"));
    }

    #[test]
    fn test_response_body_shape() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"x = 1"}}]}"#,
        )
        .expect("deserialize");
        assert_eq!(parsed.choices[0].message.content, "x = 1");
    }

    #[test]
    fn test_timeout_error_display_names_limit() {
        let err = RecreateError::Timeout(Duration::from_secs(60));
        assert_eq!(err.to_string(), "reconstruction timed out after 60s");
    }

    #[test]
    fn test_client_builds_with_timeout() {
        assert!(RecreateClient::new(config()).is_ok());
    }
}
