//! GeminiApiClient - translation over the Gemini REST API.
//!
//! One `generateContent` call per translation, with a JSON response schema
//! so the model answers with `aikenCode`/`explanation`/`errors`.

use async_trait::async_trait;
use aikenize_core::config::ModelConfig;
use aikenize_core::{SourceLanguage, TranslationClient, TranslationResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::TranslationError;
use crate::prompt::{AIKEN_SYSTEM_PROMPT, render_user_prompt, response_schema};

const API_KEY_HEADER: &str = "x-goog-api-key";
const RESPONSE_MIME_TYPE: &str = "application/json";

/// [`TranslationClient`] backed by the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiApiClient {
    /// Creates a client with the default model settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(api_key, &ModelConfig::default())
    }

    /// Creates a client from the `[model]` section of `config.toml`.
    pub fn from_config(api_key: impl Into<String>, config: &ModelConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: config.name.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(
        &self,
        snippet: &str,
        language: SourceLanguage,
    ) -> Result<GenerateContentRequest, TranslationError> {
        let prompt = render_user_prompt(language, snippet)?;

        Ok(GenerateContentRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: AIKEN_SYSTEM_PROMPT.to_string(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: RESPONSE_MIME_TYPE.to_string(),
                response_schema: response_schema(),
            },
        })
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        extract_text_response(parsed)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> TranslationError {
        if err.is_timeout() {
            TranslationError::Timeout(self.timeout.as_secs())
        } else if err.is_decode() {
            TranslationError::InvalidPayload(err.to_string())
        } else {
            TranslationError::Transport(err.to_string())
        }
    }

    async fn try_translate(
        &self,
        snippet: &str,
        language: SourceLanguage,
    ) -> Result<TranslationResult, TranslationError> {
        let request = self.build_request(snippet, language)?;
        tracing::debug!(
            "[GeminiApiClient] POST {} (model={}, language={}, {} bytes)",
            self.endpoint(),
            self.model,
            language,
            snippet.len()
        );

        let text = self.send_request(&request).await?;
        parse_translation(&text)
    }
}

#[async_trait]
impl TranslationClient for GeminiApiClient {
    async fn translate(&self, snippet: &str, language: SourceLanguage) -> TranslationResult {
        match self.try_translate(snippet, language).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("[GeminiApiClient] Translation failed: {}", err);
                TranslationResult::failure(err.to_string())
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// The structured answer the response schema asks for.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationPayload {
    aiken_code: String,
    explanation: String,
    #[serde(default)]
    errors: Option<String>,
}

impl From<TranslationPayload> for TranslationResult {
    fn from(payload: TranslationPayload) -> Self {
        let result = TranslationResult::success(payload.aiken_code, payload.explanation);
        match payload.errors {
            Some(errors) if !errors.trim().is_empty() => result.with_errors(errors),
            _ => result,
        }
    }
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, TranslationError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(TranslationError::EmptyResponse)
}

/// Parses the model's JSON text into a result.
fn parse_translation(text: &str) -> Result<TranslationResult, TranslationError> {
    let payload: TranslationPayload = serde_json::from_str(strip_code_fence(text))
        .map_err(|err| TranslationError::InvalidPayload(err.to_string()))?;
    Ok(payload.into())
}

/// Removes a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

fn map_http_error(status: StatusCode, body: String) -> TranslationError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    TranslationError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn client() -> GeminiApiClient {
        GeminiApiClient::new("test-key")
    }

    /// Local HTTP server answering every request with the same response.
    struct CannedServer {
        base_url: String,
        hits: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl CannedServer {
        async fn start(status_line: &'static str, body: String) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let hits = Arc::new(AtomicUsize::new(0));
            let requests = Arc::new(Mutex::new(Vec::new()));

            tokio::spawn({
                let hits = hits.clone();
                let requests = requests.clone();
                async move {
                    while let Ok((mut stream, _)) = listener.accept().await {
                        hits.fetch_add(1, Ordering::SeqCst);
                        let request = read_request(&mut stream).await;
                        requests.lock().unwrap().push(request);
                        let response = format!(
                            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = stream.write_all(response.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    }
                }
            });

            Self {
                base_url: format!("http://{addr}/v1beta/models"),
                hits,
                requests,
            }
        }

        fn client(&self) -> GeminiApiClient {
            client()
                .with_base_url(&self.base_url)
                .with_model("gemini-test")
                .with_timeout(Duration::from_secs(5))
        }

        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    /// Reads the request head plus a `content-length` body.
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let head = text[..end].to_ascii_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn candidate_body(text: &str) -> String {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
    }

    #[test]
    fn test_request_body_shape() {
        let request = client()
            .build_request("x = 1", SourceLanguage::Python)
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Transpile the following python code into Aiken:\n\nx = 1"
        );
        assert!(
            body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Aiken")
        );
        assert!(body["systemInstruction"].get("role").is_none());

        let config = &body["generationConfig"];
        assert!((config["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["required"], json!(["aikenCode", "explanation"]));
    }

    #[test]
    fn test_endpoint_uses_model_and_strips_trailing_slash() {
        let client = client()
            .with_base_url("http://localhost:8080/v1beta/models/")
            .with_model("gemini-test");
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_debug_does_not_leak_api_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("test-key"));
    }

    #[test]
    fn test_parse_translation_success() {
        let result = parse_translation(
            r#"{"aikenCode":"validator check {}","explanation":"Mapped to a validator."}"#,
        )
        .unwrap();
        assert_eq!(result.translated_code, "validator check {}");
        assert_eq!(result.explanation, "Mapped to a validator.");
        assert!(result.errors.is_none());
    }

    #[test]
    fn test_parse_translation_keeps_caveats_and_drops_blank_errors() {
        let with_caveat =
            parse_translation(r#"{"aikenCode":"x","explanation":"y","errors":"no loops"}"#)
                .unwrap();
        assert_eq!(with_caveat.errors.as_deref(), Some("no loops"));

        let blank = parse_translation(r#"{"aikenCode":"x","explanation":"y","errors":"  "}"#)
            .unwrap();
        assert!(blank.errors.is_none());
    }

    #[test]
    fn test_parse_translation_accepts_fenced_json() {
        let text = "```json\n{\"aikenCode\":\"x\",\"explanation\":\"y\"}\n```";
        let result = parse_translation(text).unwrap();
        assert_eq!(result.translated_code, "x");
    }

    #[test]
    fn test_parse_translation_rejects_missing_fields() {
        let err = parse_translation(r#"{"aikenCode":"x"}"#).unwrap_err();
        assert!(matches!(err, TranslationError::InvalidPayload(_)));

        let err = parse_translation("not json").unwrap_err();
        assert!(matches!(err, TranslationError::InvalidPayload(_)));
    }

    #[test]
    fn test_extract_text_takes_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "first");
    }

    #[test]
    fn test_extract_text_without_candidates_is_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        let err = extract_text_response(response).unwrap_err();
        assert!(matches!(err, TranslationError::EmptyResponse));
        assert_eq!(err.to_string(), "No response from model");

        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(extract_text_response(response).is_err());
    }

    #[test]
    fn test_map_http_error_reads_api_error_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body.to_string());
        match err {
            TranslationError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "INVALID_ARGUMENT: API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "Gemini API returned 502: upstream down");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_resolves_to_failure_result() {
        let client = client()
            .with_base_url("http://127.0.0.1:9/v1beta/models")
            .with_timeout(Duration::from_secs(2));

        let result = client.translate("x = 1", SourceLanguage::Python).await;

        assert!(!result.has_code());
        assert!(result.explanation.is_empty());
        let message = result.errors.unwrap();
        assert!(!message.is_empty());
        assert!(!message.contains("test-key"));
    }

    #[tokio::test]
    async fn test_translate_over_http_success() {
        let server = CannedServer::start(
            "200 OK",
            candidate_body(r#"{"aikenCode":"validator {}","explanation":"ok"}"#),
        )
        .await;

        let result = server
            .client()
            .translate("x = 1", SourceLanguage::Python)
            .await;

        assert_eq!(result.translated_code, "validator {}");
        assert_eq!(result.explanation, "ok");
        assert!(result.errors.is_none());
        assert_eq!(server.hits(), 1);

        let request = server.requests.lock().unwrap()[0].to_ascii_lowercase();
        assert!(request.starts_with("post /v1beta/models/gemini-test:generatecontent "));
        assert!(request.contains("x-goog-api-key: test-key"));
        assert!(request.contains("transpile the following python code into aiken"));
    }

    #[tokio::test]
    async fn test_translate_over_http_error_status_is_single_attempt() {
        let server = CannedServer::start(
            "500 Internal Server Error",
            json!({ "error": { "code": 500, "message": "boom", "status": "INTERNAL" } })
                .to_string(),
        )
        .await;

        let result = server
            .client()
            .translate("const a = 1;", SourceLanguage::TypeScript)
            .await;

        assert!(!result.has_code());
        assert_eq!(
            result.errors.as_deref(),
            Some("Gemini API returned 500: INTERNAL: boom")
        );
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_translate_over_http_undecodable_body() {
        let server = CannedServer::start("200 OK", "not json".to_string()).await;

        let result = server
            .client()
            .translate("x = 1", SourceLanguage::Python)
            .await;

        assert!(!result.has_code());
        let message = result.errors.unwrap();
        assert!(message.starts_with("Model response did not match the expected format"));
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_translate_over_http_rejects_malformed_payload() {
        let server =
            CannedServer::start("200 OK", candidate_body(r#"{"aikenCode":"x"}"#)).await;

        let result = server
            .client()
            .translate("x = 1", SourceLanguage::Python)
            .await;

        assert!(!result.has_code());
        assert!(result.errors.is_some());
        assert_eq!(server.hits(), 1);
    }
}
