use crate::llm::client::LLMClient;
use crate::types::{AppError, GenerationOptions, Result};
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    models::ModelOptions,
    Ollama,
};

pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    pub async fn new(base_url: String, model: String) -> Result<Self> {
        let (host, port) = parse_base_url(&base_url);
        let client = Ollama::try_new(format!("{}:{}", host, port)).map_err(|e| {
            AppError::Configuration(format!("Invalid Ollama URL '{}': {}", base_url, e))
        })?;

        Ok(Self { client, model })
    }
}

/// Ollama takes a signed token budget; saturate instead of wrapping.
fn num_predict(max_tokens: u32) -> i32 {
    i32::try_from(max_tokens).unwrap_or(i32::MAX)
}

/// Split `scheme://host:port` into the `(scheme://host, port)` pair ollama-rs expects.
fn parse_base_url(base_url: &str) -> (String, u16) {
    let url_parts: Vec<&str> = base_url.split("://").collect();
    if url_parts.len() == 2 {
        let host_port: Vec<&str> = url_parts[1].trim_end_matches('/').split(':').collect();
        let host = format!("{}://{}", url_parts[0], host_port[0]);
        let port = if host_port.len() == 2 {
            host_port[1].parse().unwrap_or(11434)
        } else {
            11434
        };
        (host, port)
    } else {
        ("http://localhost".to_string(), 11434)
    }
}

/// Local model names carry an implicit `:latest` tag when none is given.
fn model_matches(local: &str, wanted: &str) -> bool {
    local == wanted || (!wanted.contains(':') && local == format!("{}:latest", wanted))
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let messages = vec![ChatMessage::user(prompt.to_string())];

        let model_options = ModelOptions::default()
            .temperature(options.temperature)
            .num_predict(num_predict(options.max_tokens));

        let request = ChatMessageRequest::new(self.model.clone(), messages).options(model_options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::LLM(format!("Ollama error: {}", e)))?;

        Ok(response.message.content.trim().to_string())
    }

    async fn health_check(&self) -> Result<()> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| AppError::LLM(format!("Ollama unreachable: {}", e)))?;

        if models.iter().any(|m| model_matches(&m.name, &self.model)) {
            Ok(())
        } else {
            Err(AppError::LLM(format!(
                "Model '{}' is not pulled on the Ollama server",
                self.model
            )))
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
