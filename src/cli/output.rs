//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the triad CLI.

use crate::agents::router::RoutingDecision;
use crate::types::{AgentResult, Capability, Payload, ProcessResponse, RunStatus};
use owo_colors::OwoColorize;
use serde_json::Value;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n   {}\n",
                "TRIAD".bright_cyan().bold(),
                version.dimmed(),
                "research · documentation · coding".bright_white()
            );
        } else {
            println!("\n   TRIAD {}\n   research / documentation / coding\n", version);
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print an indented block of body text
    pub fn body(&self, text: &str) {
        for line in text.lines() {
            println!("    {}", line);
        }
    }

    /// Print the router's decision for a request
    pub fn routing(&self, decision: &RoutingDecision) {
        self.kv("selected", &join(&decision.capabilities));
        self.kv(
            "coding gate",
            if decision.coding_gate { "open" } else { "closed" },
        );
        self.kv("would execute", &join(&decision.executed()));
    }

    /// Print a full pipeline response, one section per capability
    pub fn process_response(&self, response: &ProcessResponse) {
        match response.status {
            RunStatus::Completed => {
                if let Some(id) = response.conversation_id {
                    self.success(&format!("Conversation {} completed", id));
                }
            }
            RunStatus::Failed => {
                self.error(response.error.as_deref().unwrap_or("Request failed"));
                return;
            }
        }

        let Some(results) = &response.results else {
            return;
        };
        if results.is_empty() {
            self.warning("No capability produced output");
        }
        for (capability, result) in results.iter() {
            self.capability_result(*capability, result);
        }
    }

    /// Print one capability's outcome
    pub fn capability_result(&self, capability: Capability, result: &AgentResult) {
        self.subheader(&capitalize(capability.as_str()));
        match result {
            AgentResult::Failed { error } => self.error(error),
            AgentResult::Completed { payload } => match capability {
                Capability::Research => {
                    self.body(text_field(payload, "research_report"));
                    self.kv("sources", &count_field(payload, "source_count"));
                }
                Capability::Documentation => {
                    self.body(text_field(payload, "documentation"));
                }
                Capability::Coding => {
                    self.body(text_field(payload, "explanation"));
                    let blocks = payload
                        .get("code_blocks")
                        .and_then(Value::as_array)
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    for block in blocks {
                        let language = block
                            .get("language")
                            .and_then(Value::as_str)
                            .unwrap_or("text");
                        let code = block.get("code").and_then(Value::as_str).unwrap_or("");
                        if self.colored {
                            println!("\n    {}", format!("```{}", language).dimmed());
                            self.body(code);
                            println!("    {}", "```".dimmed());
                        } else {
                            println!("\n    ```{}", language);
                            self.body(code);
                            println!("    ```");
                        }
                    }
                }
            },
        }
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}

fn join(capabilities: &[Capability]) -> String {
    if capabilities.is_empty() {
        return "(none)".to_string();
    }
    capabilities
        .iter()
        .map(Capability::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn text_field<'a>(payload: &'a Payload, key: &str) -> &'a str {
    payload.get(key).and_then(Value::as_str).unwrap_or("")
}

fn count_field(payload: &Payload, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AggregatedResult;
    use serde_json::json;

    #[test]
    fn test_output_new() {
        assert!(Output::new().colored);
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_join_and_capitalize() {
        assert_eq!(join(&[]), "(none)");
        assert_eq!(
            join(&[Capability::Research, Capability::Coding]),
            "research, coding"
        );
        assert_eq!(capitalize("documentation"), "Documentation");
    }

    #[test]
    fn test_payload_fields() {
        let payload = match json!({"research_report": "text", "source_count": 3}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(text_field(&payload, "research_report"), "text");
        assert_eq!(text_field(&payload, "missing"), "");
        assert_eq!(count_field(&payload, "source_count"), "3");
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.success("test success");
            output.info("test info");
            output.warning("test warning");
            output.error("test error");
            output.header("Test Header");
            output.kv("key", "value");
            output.list_item("item");
            output.hint("hint message");
            output.routing(&RoutingDecision::for_request("debug this"));
            output.process_response(&ProcessResponse::completed(
                0,
                "req".to_string(),
                AggregatedResult::new(),
            ));
            output.process_response(&ProcessResponse::failed(
                "req".to_string(),
                "boom".to_string(),
            ));
            output.capability_result(
                Capability::Coding,
                &AgentResult::Completed {
                    payload: match json!({
                        "explanation": "done",
                        "code_blocks": [{"id": 1, "language": "rust", "code": "fn main() {}"}],
                    }) {
                        Value::Object(map) => map,
                        _ => unreachable!(),
                    },
                },
            );
            output.newline();
        }
    }
}
