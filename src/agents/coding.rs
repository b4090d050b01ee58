//! Coding agent: code generation, review and debugging.

use crate::{
    agents::{into_payload, Agent, AgentInput},
    llm::TextCompletionService,
    types::{AppError, Capability, GenerationOptions, Payload, Result},
    utils::toml_config::CodingAgentConfig,
};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;
use tracing::info;

const AGENT_NAME: &str = "CodingAgent";

/// Fenced markdown block with an optional language tag.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_+#.-]*)[^\n]*\n(.*?)```").expect("code fence pattern is valid")
});

/// A fenced block pulled out of a model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// 1-based position in the response
    pub id: usize,
    pub language: String,
    pub code: String,
}

pub struct CodingAgent {
    model: String,
    options: GenerationOptions,
    language: String,
}

impl CodingAgent {
    pub fn new(config: &CodingAgentConfig) -> Self {
        Self {
            model: config.model.clone(),
            options: config.options(),
            language: config.language.clone(),
        }
    }

    pub fn format_prompt(&self, task: &str, language: &str, requirements: &str) -> String {
        let mut prompt = format!("{}\n\n", self.system_prompt());
        prompt.push_str(&format!("Coding Task: {}\n", task));
        prompt.push_str(&format!("Programming Language: {}\n", language));

        if !requirements.is_empty() {
            prompt.push_str(&format!("Requirements: {}\n", requirements));
        }

        prompt.push_str("\nPlease provide the complete code solution with explanations:");
        prompt
    }

    pub async fn generate_code(
        &self,
        task: &str,
        language: &str,
        requirements: &str,
        llm: &dyn TextCompletionService,
    ) -> Result<Payload> {
        info!("Generating {} code for: {}", language, task);

        let prompt = self.format_prompt(task, language, requirements);
        let response = llm.generate(&self.model, &prompt, &self.options).await?;

        let code_blocks = extract_code_blocks(&response);
        let explanation = extract_explanation(&response);

        info!(
            "Code generation completed for: {} ({} blocks)",
            task,
            code_blocks.len()
        );
        Ok(into_payload(json!({
            "agent": AGENT_NAME,
            "task": task,
            "language": language,
            "requirements": requirements,
            "code_blocks": code_blocks,
            "explanation": explanation,
            "full_response": response,
        })))
    }

    pub async fn review_code(
        &self,
        code: &str,
        language: &str,
        llm: &dyn TextCompletionService,
    ) -> Result<Payload> {
        let prompt = format!(
            "{}\n\nPlease review the following {lang} code and provide:\n\
             1. Code quality assessment\n\
             2. Optimization suggestions\n\
             3. Security considerations\n\
             4. Best practices recommendations\n\n\
             Code to review:\n```{lang}\n{code}\n```\n\n\
             Provide detailed code review:",
            self.system_prompt(),
            lang = language,
            code = code
        );

        let review = llm
            .generate(&self.model, &prompt, &GenerationOptions::new(768, 0.4))
            .await?;

        Ok(into_payload(json!({
            "agent": AGENT_NAME,
            "code_review": review,
            "language": language,
            "original_code": code,
        })))
    }

    pub async fn debug_code(
        &self,
        code: &str,
        error_message: &str,
        language: &str,
        llm: &dyn TextCompletionService,
    ) -> Result<Payload> {
        let prompt = format!(
            "{}\n\nDebug the following {lang} code that produces this error:\n\
             Error: {error}\n\n\
             Code:\n```{lang}\n{code}\n```\n\n\
             Please provide:\n1. Error explanation\n2. Fixed code\n3. Prevention suggestions",
            self.system_prompt(),
            lang = language,
            error = error_message,
            code = code
        );

        let debug_response = llm
            .generate(&self.model, &prompt, &GenerationOptions::new(768, 0.3))
            .await?;

        Ok(into_payload(json!({
            "agent": AGENT_NAME,
            "debug_response": debug_response,
            "original_code": code,
            "error_message": error_message,
            "language": language,
        })))
    }
}

pub fn extract_code_blocks(response: &str) -> Vec<CodeBlock> {
    CODE_FENCE
        .captures_iter(response)
        .enumerate()
        .map(|(i, caps)| {
            let language = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            CodeBlock {
                id: i + 1,
                language: if language.is_empty() {
                    "text".to_string()
                } else {
                    language.to_string()
                },
                code: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Response text with every fenced block removed.
pub fn extract_explanation(response: &str) -> String {
    CODE_FENCE.replace_all(response, "").trim().to_string()
}

#[async_trait]
impl Agent for CodingAgent {
    async fn execute(&self, input: AgentInput, llm: &dyn TextCompletionService) -> Result<Payload> {
        match input {
            AgentInput::Task(task) => self.generate_code(&task, &self.language, "", llm).await,
            other => Err(AppError::InvalidInput(format!(
                "{} expects a task, got {}",
                AGENT_NAME,
                other.kind()
            ))),
        }
    }

    fn system_prompt(&self) -> String {
        r#"You are a Coding Agent specialized in software development and code generation.
Your capabilities include:
- Writing clean, efficient code in multiple programming languages
- Code review and optimization suggestions
- Debugging and error resolution
- Creating complete project structures
- Generating documentation for code

Always provide:
1. Clean, well-commented code
2. Proper error handling
3. Best practices and conventions
4. Performance considerations
5. Security considerations when applicable

Programming languages you excel at: Python, JavaScript, Java, C++, Go, Rust, and more."#
            .to_string()
    }

    fn capability(&self) -> Capability {
        Capability::Coding
    }

    fn model(&self) -> &str {
        &self.model
    }
}
