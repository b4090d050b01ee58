//! TOML-based configuration for Triad
//!
//! This module provides declarative configuration for providers, models,
//! agents, search and the orchestrator via a TOML file (`triad.toml`).
//!
//! Every section has defaults, so an empty file (or no file at all) yields
//! the stock local setup: three Ollama-served model aliases `phi3`,
//! `mistral` and `qwen`, one per agent.

use crate::types::{Capability, GenerationOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from triad.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriadConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Named LLM provider configurations
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,

    /// Model aliases that reference providers
    #[serde(default = "default_models")]
    pub models: HashMap<String, ModelConfig>,

    /// Per-capability agent settings
    #[serde(default)]
    pub agents: AgentsConfig,

    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for TriadConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            providers: default_providers(),
            models: default_models(),
            agents: AgentsConfig::default(),
            orchestrator: OrchestratorConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        default_model: String,
    },
    OpenAI {
        /// Environment variable containing API key
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        default_model: String,
    },
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    HashMap::from([(
        "ollama-local".to_string(),
        ProviderConfig::Ollama {
            base_url: default_ollama_url(),
            default_model: "phi3:mini".to_string(),
        },
    )])
}

// ============= Model Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Reference to a provider name defined in [providers]
    pub provider: String,

    /// Model name/identifier to use with the provider
    pub model: String,

    /// Check that the model is reachable before marking it loaded
    #[serde(default = "default_true")]
    pub verify: bool,
}

fn default_true() -> bool {
    true
}

fn default_models() -> HashMap<String, ModelConfig> {
    [
        ("phi3", "phi3:mini"),
        ("mistral", "mistral:7b"),
        ("qwen", "qwen2.5:7b-instruct"),
    ]
    .into_iter()
    .map(|(alias, model)| {
        (
            alias.to_string(),
            ModelConfig {
                provider: "ollama-local".to_string(),
                model: model.to_string(),
                verify: true,
            },
        )
    })
    .collect()
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default = "default_research_agent")]
    pub research: ResearchAgentConfig,

    #[serde(default = "default_documentation_agent")]
    pub documentation: DocumentationAgentConfig,

    #[serde(default = "default_coding_agent")]
    pub coding: CodingAgentConfig,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            research: default_research_agent(),
            documentation: default_documentation_agent(),
            coding: default_coding_agent(),
        }
    }
}

impl AgentsConfig {
    /// Model alias and generation options for a capability.
    pub fn for_capability(&self, capability: Capability) -> (&str, GenerationOptions) {
        match capability {
            Capability::Research => (&self.research.model, self.research.options()),
            Capability::Documentation => (&self.documentation.model, self.documentation.options()),
            Capability::Coding => (&self.coding.model, self.coding.options()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchAgentConfig {
    pub model: String,
    #[serde(default = "default_agent_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_research_temperature")]
    pub temperature: f32,
    /// Search results fed into the research prompt
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
}

impl ResearchAgentConfig {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::new(self.max_tokens, self.temperature)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentationAgentConfig {
    pub model: String,
    #[serde(default = "default_agent_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_documentation_temperature")]
    pub temperature: f32,
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
}

impl DocumentationAgentConfig {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::new(self.max_tokens, self.temperature)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodingAgentConfig {
    pub model: String,
    #[serde(default = "default_agent_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_coding_temperature")]
    pub temperature: f32,
    #[serde(default = "default_language")]
    pub language: String,
}

impl CodingAgentConfig {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::new(self.max_tokens, self.temperature)
    }
}

fn default_agent_max_tokens() -> u32 {
    1024
}

fn default_research_temperature() -> f32 {
    0.7
}

fn default_documentation_temperature() -> f32 {
    0.5
}

fn default_coding_temperature() -> f32 {
    0.3
}

fn default_max_sources() -> usize {
    8
}

fn default_doc_type() -> String {
    "research_report".to_string()
}

fn default_language() -> String {
    "python".to_string()
}

fn default_research_agent() -> ResearchAgentConfig {
    ResearchAgentConfig {
        model: "phi3".to_string(),
        max_tokens: default_agent_max_tokens(),
        temperature: default_research_temperature(),
        max_sources: default_max_sources(),
    }
}

fn default_documentation_agent() -> DocumentationAgentConfig {
    DocumentationAgentConfig {
        model: "mistral".to_string(),
        max_tokens: default_agent_max_tokens(),
        temperature: default_documentation_temperature(),
        doc_type: default_doc_type(),
    }
}

fn default_coding_agent() -> CodingAgentConfig {
    CodingAgentConfig {
        model: "qwen".to_string(),
        max_tokens: default_agent_max_tokens(),
        temperature: default_coding_temperature(),
        language: default_language(),
    }
}

// ============= Orchestrator Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Model aliases to bind at startup, in order
    #[serde(default = "default_model_candidates")]
    pub model_candidates: Vec<String>,

    /// Default window for history queries
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_model_candidates() -> Vec<String> {
    vec!["phi3".to_string(), "mistral".to_string(), "qwen".to_string()]
}

fn default_history_limit() -> usize {
    crate::memory::DEFAULT_HISTORY_WINDOW
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model_candidates: default_model_candidates(),
            history_limit: default_history_limit(),
        }
    }
}

// ============= Search Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_search_max_results")]
    pub max_results: usize,
}

fn default_search_max_results() -> usize {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: default_search_max_results(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),

    #[error("Provider '{0}' referenced by model '{1}' does not exist")]
    MissingProvider(String, String),

    #[error("Model '{0}' referenced by '{1}' does not exist")]
    MissingModel(String, String),
}

impl TriadConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: TriadConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    ///
    /// Returns whether the file was found alongside the config.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, bool), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::FileNotFound(_)) => Ok((Self::default(), false)),
            Err(e) => Err(e),
        }
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        for provider in self.providers.values() {
            if let ProviderConfig::OpenAI { api_key_env, .. } = provider {
                self.validate_env_var(api_key_env)?;
            }
        }

        for (model_name, model_config) in &self.models {
            if !self.providers.contains_key(&model_config.provider) {
                return Err(ConfigError::MissingProvider(
                    model_config.provider.clone(),
                    model_name.clone(),
                ));
            }
        }

        for capability in Capability::ALL {
            let (model, options) = self.agents.for_capability(capability);
            if !self.models.contains_key(model) {
                return Err(ConfigError::MissingModel(
                    model.to_string(),
                    format!("agents.{}", capability),
                ));
            }
            if options.max_tokens == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "agents.{}.max_tokens must be positive",
                    capability
                )));
            }
            if !(0.0..=1.0).contains(&options.temperature) {
                return Err(ConfigError::ValidationError(format!(
                    "agents.{}.temperature must be within [0, 1], got {}",
                    capability, options.temperature
                )));
            }
        }

        if self.orchestrator.model_candidates.is_empty() {
            return Err(ConfigError::ValidationError(
                "orchestrator.model_candidates must list at least one model".to_string(),
            ));
        }
        for candidate in &self.orchestrator.model_candidates {
            if !self.models.contains_key(candidate) {
                return Err(ConfigError::MissingModel(
                    candidate.clone(),
                    "orchestrator.model_candidates".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[providers.ollama-local]
type = "ollama"
base_url = "http://localhost:11434"
default_model = "granite4:tiny-h"

[models.fast]
provider = "ollama-local"
model = "granite4:tiny-h"
verify = false

[agents.research]
model = "fast"
max_sources = 4

[agents.documentation]
model = "fast"
doc_type = "technical_guide"

[agents.coding]
model = "fast"
language = "rust"
temperature = 0.1

[orchestrator]
model_candidates = ["fast"]
history_limit = 25
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config: TriadConfig = toml::from_str(&create_test_config()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.providers.contains_key("ollama-local"));
        assert_eq!(config.agents.research.max_sources, 4);
        assert_eq!(config.agents.documentation.doc_type, "technical_guide");
        assert_eq!(config.agents.coding.language, "rust");
        assert_eq!(config.orchestrator.history_limit, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config: TriadConfig = toml::from_str("").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(
            config.orchestrator.model_candidates,
            vec!["phi3", "mistral", "qwen"]
        );
        assert_eq!(config.agents.research.model, "phi3");
        assert_eq!(config.agents.documentation.model, "mistral");
        assert_eq!(config.agents.coding.model, "qwen");
        assert_eq!(config.agents.research.temperature, 0.7);
        assert_eq!(config.agents.documentation.temperature, 0.5);
        assert_eq!(config.agents.coding.temperature, 0.3);
        assert_eq!(config.search.max_results, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_capability() {
        let config = TriadConfig::default();
        let (model, options) = config.agents.for_capability(Capability::Coding);
        assert_eq!(model, "qwen");
        assert_eq!(options, GenerationOptions::new(1024, 0.3));
    }

    #[test]
    fn test_validation_missing_provider() {
        let content = r#"
[models.phi3]
provider = "nonexistent"
model = "phi3"
"#;
        let config: TriadConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingProvider(_, _))
        ));
    }

    #[test]
    fn test_validation_missing_agent_model() {
        let content = r#"
[agents.coding]
model = "nonexistent"
"#;
        let config: TriadConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingModel(ref model, _)) if model == "nonexistent"
        ));
    }

    #[test]
    fn test_validation_temperature_range() {
        let content = r#"
[agents.research]
model = "phi3"
temperature = 1.5
"#;
        let config: TriadConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_zero_max_tokens() {
        let content = r#"
[agents.documentation]
model = "mistral"
max_tokens = 0
"#;
        let config: TriadConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_empty_candidates() {
        let content = r#"
[orchestrator]
model_candidates = []
"#;
        let config: TriadConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_missing_openai_key_env() {
        let content = r#"
[providers.hosted]
type = "openai"
api_key_env = "TRIAD_TEST_SURELY_UNSET_KEY"
default_model = "gpt-4o-mini"
"#;
        let config: TriadConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingEnvVar(ref name)) if name == "TRIAD_TEST_SURELY_UNSET_KEY"
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let (config, found) = TriadConfig::load_or_default("/nonexistent/triad.toml").unwrap();
        assert!(!found);
        assert_eq!(config.server.port, 3000);
    }
}
