//! Chat-completions client used to write commit messages.

use crate::error::{FlowError, Result};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are an expert software engineer who writes clear, concise git commit messages. Use imperative mood, keep the subject line under 72 characters, and include an optional body with bullet points if helpful. Never wrap the message in quotes. Never include secrets, credentials, or file contents from .env files, environment variables, keys, or other sensitive data, even if they appear in the diff.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for `<base_url>/chat/completions`.
pub struct CommitMessageClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl CommitMessageClient {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| FlowError::UserError("OPENAI_API_KEY contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FlowError::ApiError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_string(),
        })
    }

    /// Ask the model for a commit message describing `diff`.
    pub fn generate(&self, diff: &str, status: &str, truncated: bool) -> Result<String> {
        let user_prompt = build_user_prompt(diff, status, truncated);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
        };

        log::debug!("POST {} (model {})", self.endpoint, self.model);
        let response: ChatResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| FlowError::ApiError(e.to_string()))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            FlowError::ApiError("model returned no commit message choices".to_string())
        })?;

        let message = choice.message.content.unwrap_or_default().trim().to_string();
        if message.is_empty() {
            return Err(FlowError::ApiError(
                "model returned an empty commit message".to_string(),
            ));
        }
        Ok(message)
    }
}

fn build_user_prompt(diff: &str, status: &str, truncated: bool) -> String {
    let mut prompt = String::from("Write a git commit message for the staged changes.\n\nGit diff:\n");
    prompt.push_str(diff);
    if truncated {
        prompt.push_str("\n\n[Diff truncated to fit within prompt]");
    }
    let status = status.trim();
    if !status.is_empty() {
        prompt.push_str("\n\nGit status --short:\n");
        prompt.push_str(status);
    }
    prompt
}
