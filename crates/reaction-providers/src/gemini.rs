// Archivo: gemini.rs
// Propósito: cliente REST de Gemini (`generateContent`) que implementa
// `TextGenerator`.
use crate::config::ProviderConfig;
use crate::errors::{ProviderError, Result};
use crate::generator::TextGenerator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Generador respaldado por la API de Gemini. No reintenta por sí mismo;
/// para eso se envuelve en `RetryingGenerator`.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(config: &ProviderConfig) -> Self {
        Self { client: Client::new(),
               api_key: config.api_key.clone(),
               model: config.model.clone(),
               base_url: config.base_url.clone() }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest { contents: vec![Content { role: "user".into(),
                                                                     parts: vec![Part { text: prompt.to_string() }] }] };
        log::debug!("Llamando a {} ({} caracteres)", self.model, prompt.len());

        let response = self.client
                           .post(self.endpoint())
                           .header(API_KEY_HEADER, &self.api_key)
                           .json(&body)
                           .send()
                           .await
                           .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http { status: status.as_u16(), message: error_message(&text) });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| ProviderError::Response(e.to_string()))?;
        extract_text(parsed)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
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

// La URL nunca lleva la clave, pero se quita igualmente del mensaje.
fn request_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Request(e.without_url().to_string())
}

/// Concatena el texto de las partes del primer candidato.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let text: String = response.candidates
                               .unwrap_or_default()
                               .into_iter()
                               .next()
                               .and_then(|c| c.content)
                               .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
                               .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(text)
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorWrapper>(body) {
        Ok(w) => {
            let msg = w.error.message.unwrap_or_else(|| body.to_string());
            match w.error.status {
                Some(s) if !s.is_empty() => format!("{}: {}", s, msg),
                _ => msg,
            }
        }
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_joined_parts() -> Result<()> {
        let raw = json!({"candidates": [{"content": {"parts": [{"text": "Hola "}, {"text": "mundo"}]}}]});
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_text(parsed)?, "Hola mundo");
        Ok(())
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(parsed).unwrap_err(), ProviderError::EmptyResponse);
    }

    #[test]
    fn error_body_is_summarised() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "RESOURCE_EXHAUSTED: Quota exceeded");
        assert_eq!(error_message("plain"), "plain");
    }

    #[test]
    fn endpoint_uses_model() {
        let g = GeminiGenerator::new(&ProviderConfig::new("k"));
        assert_eq!(g.endpoint(),
                   "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent");
    }

    #[tokio::test]
    async fn request_error_does_not_expose_api_key() {
        let mut cfg = ProviderConfig::new("SECRET-API-KEY-123");
        cfg.base_url = "http://127.0.0.1:1/models".into();
        let err = GeminiGenerator::new(&cfg).generate("hola").await.unwrap_err();
        assert!(matches!(err, ProviderError::Request(_)), "got {:?}", err);
        assert!(!err.to_string().contains("SECRET-API-KEY-123"));
        assert!(!format!("{:?}", err).contains("SECRET-API-KEY-123"));
    }
}
