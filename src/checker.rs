//! Check pipeline: scanner, external annotator, merge.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::annotation::AnnotationSet;
use crate::config::Config;
use crate::error::CheckError;
use crate::lexicon::Lexicon;
use crate::llm::LlmClient;
use crate::merger;
use crate::scanner::LexiconScanner;

/// Runs one text submission through both detectors and merges the results
pub struct Checker {
    scanner: LexiconScanner,
    llm: LlmClient,
}

impl Checker {
    pub fn new(scanner: LexiconScanner, llm: LlmClient) -> Self {
        Self { scanner, llm }
    }

    /// Build a checker from configuration, loading the lexicon once
    pub fn from_config(config: Config) -> Result<Self> {
        let lexicon = match &config.scanner.lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::builtin(),
        };
        tracing::info!(entries = lexicon.len(), "lexicon loaded");

        let scanner = LexiconScanner::new(Arc::new(lexicon), config.scanner.match_confidence);
        let llm = LlmClient::new(config);
        Ok(Self::new(scanner, llm))
    }

    /// Check one text and return the merged annotation set.
    ///
    /// The lexicon scan always runs first. When the LLM annotator is
    /// configured, its candidates are validated and merged in; any failure
    /// on that leg fails the whole request and the lexicon-only result is
    /// discarded. When no annotator is configured the lexicon-only set is
    /// returned as-is.
    pub async fn check(&self, text: &str) -> std::result::Result<AnnotationSet, CheckError> {
        if text.is_empty() {
            return Err(CheckError::InvalidInput);
        }

        let base = self.scanner.scan(text);
        tracing::debug!(matches = base.len(), "lexicon scan complete");

        if !self.llm.is_available() {
            tracing::debug!("LLM annotator not configured, returning lexicon matches only");
            return Ok(AnnotationSet { items: base });
        }

        let merged = self
            .annotate_and_merge(text, base)
            .await
            .map_err(CheckError::AnnotationFailure)?;

        tracing::debug!(items = merged.items.len(), "merge complete");
        Ok(merged)
    }

    async fn annotate_and_merge(
        &self,
        text: &str,
        base: Vec<crate::annotation::Annotation>,
    ) -> Result<AnnotationSet> {
        let raw = self
            .llm
            .annotate(text)
            .await
            .context("annotator call failed")?;
        tracing::trace!(raw = %raw, "raw annotator output");

        let candidates = merger::parse_candidates(&raw)?;
        Ok(merger::merge(base, candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Kind;
    use crate::scanner::DEFAULT_MATCH_CONFIDENCE;
    use pretty_assertions::assert_eq;

    fn setup_checker() -> Checker {
        // Default config: no LLM provider, builtin lexicon
        Checker::from_config(Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_input_is_client_error() {
        let checker = setup_checker();
        let err = checker.check("").await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_lexicon_only_when_llm_unconfigured() {
        let checker = setup_checker();
        let result = checker.check("오뎅 국물이 시원하다").await.unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].kind, Kind::Loanword);
        assert_eq!(result.items[0].span, "오뎅");
        assert_eq!(result.items[0].start, 0);
        assert_eq!(result.items[0].end, 2);
        assert_eq!(result.items[0].confidence, DEFAULT_MATCH_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_no_hits_yields_empty_set() {
        let checker = setup_checker();
        let result = checker.check("오늘 날씨가 좋다").await.unwrap();
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_result_serializes_as_items_object() {
        let checker = setup_checker();
        let result = checker.check("오늘 날씨가 좋다").await.unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "items": [] }));
    }

    #[tokio::test]
    async fn test_repeated_word_two_annotations() {
        let checker = setup_checker();
        let result = checker.check("오뎅 오뎅").await.unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!((result.items[0].start, result.items[0].end), (0, 2));
        assert_eq!((result.items[1].start, result.items[1].end), (3, 5));
    }

    #[tokio::test]
    async fn test_scan_does_not_run_llm_path_without_provider() {
        // A bogus base_url would fail instantly if the LLM leg were taken
        let mut config = Config::default();
        config.llm.base_url = Some("http://127.0.0.1:1".to_string());

        let checker = Checker::from_config(config).unwrap();
        assert!(checker.check("우동").await.is_ok());
    }

    fn llm_config(base_url: String) -> Config {
        let mut config = Config::default();
        config.llm.provider = "openai".to_string();
        config.llm.api_key = Some("test-key".to_string());
        config.llm.base_url = Some(base_url);
        config.llm.timeout_secs = 5;
        config
    }

    /// Minimal one-shot HTTP stub standing in for the OpenAI endpoint
    async fn spawn_stub(body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                // Stop once headers plus the announced body are in
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&request[..pos]).to_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= pos + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });

        format!("http://{}", addr)
    }

    fn openai_reply(content: String) -> String {
        serde_json::json!({
            "choices": [{ "message": { "content": content } }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_candidates_merged_after_lexicon_matches() {
        let annotator_output = serde_json::json!({
            "items": [{
                "type": "bureaucratese",
                "start": 4,
                "end": 9,
                "span": "제출하였다",
                "suggestion": "냈다",
                "note": "",
                "confidence": 0.7
            }]
        });
        let base_url = spawn_stub(openai_reply(annotator_output.to_string())).await;

        let checker = Checker::from_config(llm_config(base_url)).unwrap();
        let result = checker.check("시말서 제출하였다").await.unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].span, "시말서"); // lexicon first
        assert_eq!(result.items[1].span, "제출하였다");
        assert_eq!(result.items[1].kind, Kind::Bureaucratese);
    }

    #[tokio::test]
    async fn test_duplicate_candidate_keeps_lexicon_fields() {
        let annotator_output = serde_json::json!({
            "items": [{
                "type": "translationese",
                "start": 0,
                "end": 3,
                "span": "시말서",
                "suggestion": "사유서",
                "note": "",
                "confidence": 0.8
            }]
        });
        let base_url = spawn_stub(openai_reply(annotator_output.to_string())).await;

        let checker = Checker::from_config(llm_config(base_url)).unwrap();
        let result = checker.check("시말서를 제출했다").await.unwrap();

        let matches: Vec<_> = result.items.iter().filter(|a| a.span == "시말서").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].suggestion, "경위서");
        assert_eq!(matches[0].confidence, DEFAULT_MATCH_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_malformed_annotator_output_fails_whole_request() {
        // "우동" is a lexicon hit, but the broken payload must discard it too
        let base_url = spawn_stub(openai_reply("not json".to_string())).await;

        let checker = Checker::from_config(llm_config(base_url)).unwrap();
        let err = checker.check("우동 먹자").await.unwrap_err();

        assert!(!err.is_client_error());
        assert_eq!(err.code(), "analysis_failed");
    }

    #[tokio::test]
    async fn test_annotator_transport_failure_is_annotation_failure() {
        // Nothing listens on port 1; the connection is refused immediately
        let checker = Checker::from_config(llm_config("http://127.0.0.1:1".to_string())).unwrap();
        let err = checker.check("오뎅").await.unwrap_err();
        assert_eq!(err.code(), "analysis_failed");
    }
}
