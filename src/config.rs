//! Configuration management for the checker.
//!
//! Handles loading and parsing of the `sunhwa.toml` configuration file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM annotator settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Lexicon scanner settings
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// LLM annotator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider: "claude", "openai", or "none"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API key (can also be set via environment variable)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name (e.g., "claude-3-5-sonnet-20241022", "gpt-4o")
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL (for custom endpoints)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Maximum tokens for response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: None,
            base_url: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Lexicon scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Confidence assigned to exact lexicon matches
    #[serde(default = "default_match_confidence")]
    pub match_confidence: f64,

    /// Optional path to a user lexicon TOML file replacing the builtin table
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            match_confidence: default_match_confidence(),
            lexicon_path: None,
        }
    }
}

fn default_provider() -> String {
    "none".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_match_confidence() -> f64 {
    crate::scanner::DEFAULT_MATCH_CONFIDENCE
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sunhwa")
            .map(|dirs| dirs.config_dir().join("sunhwa.toml"))
    }

    /// Load configuration from default path or workspace
    pub fn load_from_default() -> Self {
        // Try workspace path first
        let workspace_path = PathBuf::from("sunhwa.toml");
        if workspace_path.exists() {
            if let Ok(config) = Self::load(&workspace_path) {
                return config;
            }
        }

        // Try user config directory
        if let Some(default_path) = Self::default_path() {
            if let Ok(config) = Self::load(&default_path) {
                return config;
            }
        }

        Config::default()
    }

    /// Get the effective API key (from config or environment)
    pub fn get_api_key(&self) -> Option<String> {
        // First check config file
        if let Some(ref key) = self.llm.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }

        // Then check environment variables
        match self.llm.provider.as_str() {
            "claude" => std::env::var("ANTHROPIC_API_KEY").ok(),
            "openai" => std::env::var("OPENAI_API_KEY").ok(),
            _ => None,
        }
    }

    /// Get the effective model name
    pub fn get_model(&self) -> String {
        self.llm
            .model
            .clone()
            .unwrap_or_else(|| match self.llm.provider.as_str() {
                "claude" => "claude-3-5-sonnet-20241022".to_string(),
                "openai" => "gpt-4o".to_string(),
                _ => String::new(),
            })
    }

    /// Check if LLM integration is enabled
    pub fn is_llm_enabled(&self) -> bool {
        self.llm.provider != "none" && self.get_api_key().is_some()
    }
}
