//! Documentation agent: turns research output (or any payload) into a
//! structured markdown document.

use crate::{
    agents::{into_payload, Agent, AgentInput},
    llm::TextCompletionService,
    types::{AppError, Capability, GenerationOptions, Payload, Result},
    utils::toml_config::DocumentationAgentConfig,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

const AGENT_NAME: &str = "DocumentationAgent";
const FOOTER: &str = "\n\n---\n*Generated by DocumentationAgent*";

pub struct DocumentationAgent {
    model: String,
    options: GenerationOptions,
    doc_type: String,
}

impl DocumentationAgent {
    pub fn new(config: &DocumentationAgentConfig) -> Self {
        Self {
            model: config.model.clone(),
            options: config.options(),
            doc_type: config.doc_type.clone(),
        }
    }

    pub fn format_prompt(&self, task: &str, content: &str, doc_type: &str) -> String {
        format!(
            "{}\n\nDocumentation Task: {}\nDocument Type: {}\n\n\
             Source Content:\n{}\n\n\
             Please create comprehensive documentation:",
            self.system_prompt(),
            task,
            doc_type,
            content
        )
    }

    pub async fn create_documentation(
        &self,
        source: &Payload,
        llm: &dyn TextCompletionService,
    ) -> Result<Payload> {
        info!("Creating {} documentation", self.doc_type);

        let (content, sources) = extract_source(source);
        let task = format!("Create a {} document", self.doc_type);
        let prompt = self.format_prompt(&task, &content, &self.doc_type);
        let raw = llm.generate(&self.model, &prompt, &self.options).await?;

        let documentation = format_final_document(&raw, &self.doc_type, &sources);

        info!("Documentation created successfully");
        Ok(into_payload(json!({
            "agent": AGENT_NAME,
            "document_type": self.doc_type,
            "documentation": documentation,
            "source_research": source.get("query").cloned().unwrap_or_else(|| json!("")),
            "sources_used": sources.len(),
        })))
    }

    /// Condense `content` into a shorter summary of `summary_type` style.
    pub async fn summarize_content(
        &self,
        content: &str,
        summary_type: &str,
        llm: &dyn TextCompletionService,
    ) -> Result<Payload> {
        let prompt = format!(
            "{}\n\nCreate a {kind} summary of the following content:\n\n{}\n\n\
             Provide a clear, concise {kind} summary:",
            self.system_prompt(),
            content,
            kind = summary_type
        );

        let summary = llm
            .generate(&self.model, &prompt, &GenerationOptions::new(512, 0.4))
            .await?;

        Ok(into_payload(json!({
            "agent": AGENT_NAME,
            "summary_type": summary_type,
            "summary": summary,
            "original_length": content.chars().count(),
            "summary_length": summary.chars().count(),
        })))
    }
}

/// Text to document plus the source list to cite.
///
/// A research payload contributes its report and sources; anything else is
/// documented as its JSON rendering with no sources.
fn extract_source(source: &Payload) -> (String, Vec<Value>) {
    match source.get("research_report") {
        Some(report) => {
            let content = match report {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let sources = source
                .get("sources")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            (content, sources)
        }
        None => {
            let content = serde_json::to_string_pretty(source)
                .unwrap_or_else(|_| Value::Object(source.clone()).to_string());
            (content, Vec::new())
        }
    }
}

/// `research_report` -> `Research Report`
fn title_case(doc_type: &str) -> String {
    doc_type
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_final_document(content: &str, doc_type: &str, sources: &[Value]) -> String {
    let mut doc = format!("# {}\n\n{}", title_case(doc_type), content);

    if !sources.is_empty() {
        doc.push_str("\n\n## Sources\n\n");
        for (i, source) in sources.iter().enumerate() {
            let title = source
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Untitled");
            let url = source.get("url").and_then(Value::as_str).unwrap_or("#");
            doc.push_str(&format!("{}. [{}]({})\n", i + 1, title, url));
        }
    }

    doc.push_str(FOOTER);
    doc
}

#[async_trait]
impl Agent for DocumentationAgent {
    async fn execute(&self, input: AgentInput, llm: &dyn TextCompletionService) -> Result<Payload> {
        match input {
            AgentInput::Source(source) => self.create_documentation(&source, llm).await,
            other => Err(AppError::InvalidInput(format!(
                "{} expects a source payload, got {}",
                AGENT_NAME,
                other.kind()
            ))),
        }
    }

    fn system_prompt(&self) -> String {
        r#"You are a Documentation Agent specialized in creating comprehensive, well-structured documentation.
Your capabilities include:
- Converting research findings into clear documentation
- Creating technical documentation with proper formatting
- Summarizing complex information into digestible content
- Organizing information with clear hierarchies and sections

Always provide:
1. Well-structured documents with clear headings
2. Proper formatting (markdown when appropriate)
3. Executive summaries for complex topics
4. Clear, concise language
5. Logical information flow"#
            .to_string()
    }

    fn capability(&self) -> Capability {
        Capability::Documentation
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ModelInfo;
    use crate::utils::toml_config::AgentsConfig;
    use parking_lot::Mutex;

    struct EchoLlm {
        calls: Mutex<Vec<(String, GenerationOptions)>>,
    }

    #[async_trait]
    impl TextCompletionService for EchoLlm {
        async fn generate(
            &self,
            _model: &str,
            prompt: &str,
            options: &GenerationOptions,
        ) -> Result<String> {
            self.calls.lock().push((prompt.to_string(), *options));
            Ok("Body text".to_string())
        }

        fn model_info(&self) -> Vec<ModelInfo> {
            Vec::new()
        }
    }

    fn llm() -> EchoLlm {
        EchoLlm {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn agent() -> DocumentationAgent {
        DocumentationAgent::new(&AgentsConfig::default().documentation)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("research_report"), "Research Report");
        assert_eq!(title_case("API guide"), "Api Guide");
    }

    #[test]
    fn test_format_final_document_with_sources() {
        let sources = vec![
            json!({"title": "Rust Book", "url": "https://doc.rust-lang.org/book"}),
            json!({"snippet": "no title or url"}),
        ];
        let doc = format_final_document("Body", "research_report", &sources);

        assert!(doc.starts_with("# Research Report\n\nBody"));
        assert!(doc.contains("## Sources\n\n1. [Rust Book](https://doc.rust-lang.org/book)\n"));
        assert!(doc.contains("2. [Untitled](#)\n"));
        assert!(doc.ends_with("\n\n---\n*Generated by DocumentationAgent*"));
    }

    #[test]
    fn test_format_final_document_without_sources() {
        let doc = format_final_document("Body", "guide", &[]);
        assert_eq!(doc, "# Guide\n\nBody\n\n---\n*Generated by DocumentationAgent*");
    }

    #[tokio::test]
    async fn test_documents_research_payload() {
        let llm = llm();
        let source = into_payload(json!({
            "query": "rust",
            "research_report": "Rust is a systems language",
            "sources": [{"title": "Rust", "url": "https://rust-lang.org"}],
        }));

        let payload = agent().create_documentation(&source, &llm).await.unwrap();

        assert_eq!(payload["document_type"], "research_report");
        assert_eq!(payload["source_research"], "rust");
        assert_eq!(payload["sources_used"], 1);
        assert!(payload["documentation"]
            .as_str()
            .unwrap()
            .contains("1. [Rust](https://rust-lang.org)"));

        let calls = llm.calls.lock();
        assert!(calls[0]
            .0
            .contains("Documentation Task: Create a research_report document\nDocument Type: research_report"));
        assert!(calls[0].0.contains("Source Content:\nRust is a systems language"));
        assert!(calls[0].0.ends_with("Please create comprehensive documentation:"));
        assert_eq!(calls[0].1, GenerationOptions::new(1024, 0.5));
    }

    #[tokio::test]
    async fn test_documents_arbitrary_payload_as_json() {
        let llm = llm();
        let source = into_payload(json!({"notes": "loose data"}));

        let payload = agent().create_documentation(&source, &llm).await.unwrap();

        assert_eq!(payload["sources_used"], 0);
        assert_eq!(payload["source_research"], "");
        assert!(llm.calls.lock()[0].0.contains("\"notes\": \"loose data\""));
    }

    #[tokio::test]
    async fn test_summarize_content() {
        let llm = llm();
        let payload = agent()
            .summarize_content("a long text", "brief", &llm)
            .await
            .unwrap();

        assert_eq!(payload["summary_type"], "brief");
        assert_eq!(payload["summary"], "Body text");
        assert_eq!(payload["original_length"], 11);
        assert_eq!(payload["summary_length"], 9);
        let calls = llm.calls.lock();
        assert_eq!(calls[0].1, GenerationOptions::new(512, 0.4));
        assert!(calls[0].0.starts_with("You are a Documentation Agent"));
        assert!(calls[0].0.contains("Create a brief summary of the following content:\n\na long text"));
        assert!(calls[0].0.ends_with("Provide a clear, concise brief summary:"));
    }
}
