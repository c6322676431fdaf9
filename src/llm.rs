//! LLM client for the external annotator leg of the pipeline.
//!
//! Supports Claude (Anthropic) and OpenAI APIs. The client only transports
//! text: prompt in, raw model output out. Parsing and validation of the
//! output live in [`crate::merger`].

use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Output format description appended to every annotation prompt
const SCHEMA_DESCRIPTION: &str = r#"출력 형식(JSON, 공백은 상관 없음):

{
  "items": [
    {
      "type": "loanword" | "translationese" | "bureaucratese",
      "start": number,
      "end": number,
      "span": string,
      "suggestion": string,
      "note": string,
      "confidence": number
    }
  ]
}

반드시 위 구조의 **순수 JSON만** 출력해.
설명 문장, 코드블럭, 주석은 절대 출력하지 마."#;

/// LLM client for making annotation requests
pub struct LlmClient {
    client: Client,
    config: Config,
}

// Claude API types
#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    text: String,
}

// OpenAI API types
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessageResponse,
}

#[derive(Deserialize)]
struct OpenAiMessageResponse {
    content: String,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Check if LLM integration is available
    pub fn is_available(&self) -> bool {
        self.config.is_llm_enabled()
    }

    /// Ask the model for candidate annotations and return its raw output
    pub async fn annotate(&self, text: &str) -> Result<String> {
        if !self.is_available() {
            return Err(anyhow!("LLM integration is not configured"));
        }

        let prompt = self.build_prompt(text);
        match self.config.llm.provider.as_str() {
            "claude" => self.call_claude(&prompt).await,
            "openai" => self.call_openai(&prompt).await,
            _ => Err(anyhow!("Unknown LLM provider: {}", self.config.llm.provider)),
        }
    }

    /// Build the detection prompt for the given text
    fn build_prompt(&self, text: &str) -> String {
        let mut prompt = String::from(
            "너는 한국어 문체·어휘 점검 도우미다.\n한국어 텍스트에서\n\
             1) 일본어 기원어(노가다, 유도리, 호치키스 등),\n\
             2) 일본식 번역투(~에 있어서, ~을 실시하다, ~에 의거하여 등),\n\
             3) 관청체/행정체(과도하게 딱딱한 공문투)\n\
             를 찾아낸다.\n\n",
        );

        prompt.push_str(
            "각 항목에 대해:\n\
             - type: \"loanword\" | \"translationese\" | \"bureaucratese\"\n\
             - start / end: 입력 받은 전체 문자열에서 글자가 시작하고 끝나는 인덱스 (0부터 시작, end는 포함하지 않음)\n\
             - span: 해당 표현 그대로\n\
             - suggestion: 가능하면 자연스러운 대체 표현(없으면 빈 문자열)\n\
             - note: 왜 문제가 되는지(없으면 빈 문자열)\n\
             - confidence: 신뢰도 (0~1 숫자)\n\n\
             주의:\n\
             - 확실할 때만 loanword로 표기하고, 애매하면 translationese로 분류해라.\n\
             - 인덱스를 반드시 원문 text 기준으로 정확히 계산해라.\n\n",
        );

        prompt.push_str(SCHEMA_DESCRIPTION);
        prompt.push_str(&format!("\n\n<텍스트>\n{}\n</텍스트>", text));
        prompt
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.llm.timeout_secs)
    }

    /// Call Claude API
    async fn call_claude(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| anyhow!("Claude API key not found"))?;

        let base_url = self
            .config
            .llm
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.anthropic.com".to_string());

        let request = ClaudeRequest {
            model: self.config.get_model(),
            max_tokens: self.config.llm.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .timeout(self.timeout())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Claude API error: {} - {}", status, body));
        }

        let claude_response: ClaudeResponse = response.json().await?;
        claude_response
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| anyhow!("Empty response from Claude"))
    }

    /// Call OpenAI API
    async fn call_openai(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| anyhow!("OpenAI API key not found"))?;

        let base_url = self
            .config
            .llm
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        let request = OpenAiRequest {
            model: self.config.get_model(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.config.llm.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("content-type", "application/json")
            .timeout(self.timeout())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI API error: {} - {}", status, body));
        }

        let openai_response: OpenAiResponse = response.json().await?;
        openai_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| anyhow!("Empty response from OpenAI"))
    }
}
