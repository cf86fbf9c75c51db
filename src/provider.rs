//! Shell-command generation provider.
//!
//! Isolated adapter around an OpenAI-compatible chat-completions endpoint
//! (OpenRouter by default). Converts a natural-language prompt into a single
//! shell command using a canned system prompt. Command safety is advisory
//! only; the rules live in the prompt, not in this crate.

use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model for command generation.
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1";

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

/// Chat message
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Completion options
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Completion response
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// Chat-completion client trait; one implementation per endpoint family.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ProviderError>;

    fn model_name(&self) -> &str;
}

// OpenAI-compatible request/response structures
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: WireMessage,
}

fn role_to_string(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
    }
}

fn map_http_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::RequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ProviderError::RequestFailed(format!("Connection error: {}", error))
    } else {
        ProviderError::RequestFailed(format!("HTTP error: {}", error))
    }
}

/// OpenRouter (OpenAI-compatible) client
pub struct OpenRouterClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenRouterClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self {
            client,
            model,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ProviderError> {
        let wire_messages: Vec<WireMessage> = messages
            .into_iter()
            .map(|msg| WireMessage {
                role: role_to_string(msg.role).to_string(),
                content: msg.content,
            })
            .collect();

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: wire_messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 => ProviderError::AuthFailed(error_text),
                429 => ProviderError::RateLimit(error_text),
                404 => ProviderError::ModelNotFound(error_text),
                _ => ProviderError::RequestFailed(format!(
                    "Request failed with status {}: {}",
                    status, error_text
                )),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            model: completion.model,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// System prompt for natural-language-to-shell-command conversion.
pub fn command_system_prompt() -> String {
    format!(
        r#"You are an expert in writing terminal commands. Your task is to convert natural language requests into shell commands.
Rules:
1. Only return the command itself, no explanations or comments
2. Use common Unix/Linux commands - the user is running {platform}
3. Ensure the command is safe and won't cause damage. If the command could be dangerous, return 'echo "Unsafe command"' unless the user explicitly asks for it
4. If unsure, return 'echo "Unable to generate safe command for this request"'
5. Don't use sudo unless explicitly requested
6. Prefer command chaining over scripts
7. Use relative paths when possible

Example inputs/outputs:
Input: "show all PDF files recursively"
Output: find . -name "*.pdf"

Input: "what's using port 8080"
Output: lsof -i :8080

Input: "zip all jpg files"
Output: find . -name "*.jpg" -exec zip images.zip {{}} +
"#,
        platform = std::env::consts::OS
    )
}

/// Generate a shell command for a natural-language prompt.
pub async fn generate_command(
    client: &dyn CompletionClient,
    prompt: &str,
    options: CompletionOptions,
) -> Result<String, ProviderError> {
    let messages = vec![
        ChatMessage {
            role: MessageRole::System,
            content: command_system_prompt(),
        },
        ChatMessage {
            role: MessageRole::User,
            content: prompt.to_string(),
        },
    ];

    let response = client.complete(messages, options).await?;
    Ok(response.content.trim().to_string())
}
