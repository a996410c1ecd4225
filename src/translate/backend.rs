use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::TranslateConfig;
use crate::error::{Result, HanvoxError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub format: String,
    pub options: serde_json::Value,
    pub keep_alive: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub done: bool,
}

/// JSON payload the model is instructed to answer with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationPayload {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub name: String,
}

/// A request/response translation service handling one chunk at a time.
///
/// `translate_chunk` errors are per-call transient failures subject to
/// the retry policy; a `check_availability` error means the service
/// cannot be reached at all and is fatal for the run.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate one chunk of text to the configured target language
    async fn translate_chunk(&self, text: &str) -> Result<String>;

    /// Verify the backend service is reachable and the model is loaded
    async fn check_availability(&self) -> Result<()>;
}

/// Ollama-backed translation over a shared HTTP client.
///
/// The client is created once at construction and reused for every
/// chunk; its connection pool re-establishes connections transparently
/// after a connection-level failure mid-run.
pub struct OllamaBackend {
    client: Client,
    config: TranslateConfig,
}

impl OllamaBackend {
    pub fn new(config: TranslateConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300)) // 5 minute timeout
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }

    /// Build the fixed instruction prompt wrapped around each chunk
    fn build_prompt(&self, text: &str) -> String {
        let language_name = language_code_to_name(&self.config.target_language);

        format!(
            "You are a professional translator.\n\
             \n\
             CRITICAL: You must translate the text to {} ONLY. Do not translate to any other language.\n\
             The target language is: {} (language code: {})\n\
             \n\
             Translate naturally and concisely, keeping the tone of the source.\n\
             Return ONLY the translation in JSON format as {{\"text\":\"your {} translation here\"}}.\n\
             Do not include any explanations, alternatives, or text in other languages.\n\
             \n\
             [Text to translate]\n\
             {}\n",
            language_name, language_name, self.config.target_language, language_name, text
        )
    }

    /// Extract the translation from a response that ignored the JSON
    /// format instruction
    fn clean_response(&self, response: &str) -> String {
        for line in response.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }

            // Skip preambles and commentary the model sometimes adds
            if trimmed.starts_with("Here is")
                || trimmed.starts_with("Here are")
                || trimmed.starts_with("Translation:")
                || trimmed.starts_with("- ")
                || trimmed.starts_with("* ")
                || (trimmed.starts_with("**") && trimmed.ends_with("**"))
            {
                continue;
            }

            if trimmed.len() > 3 {
                return trimmed.to_string();
            }
        }

        response.trim().to_string()
    }
}

#[async_trait]
impl TranslationBackend for OllamaBackend {
    async fn translate_chunk(&self, text: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: self.build_prompt(text),
            stream: false,
            format: "json".to_string(),
            options: json!({
                "temperature": self.config.temperature,
                "top_p": self.config.top_p,
                "num_predict": self.config.num_predict,
                "num_ctx": self.config.num_ctx,
            }),
            keep_alive: self.config.keep_alive.clone(),
        };

        let url = format!("{}/api/generate", self.config.endpoint);

        debug!("Sending translation request to: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| HanvoxError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(HanvoxError::Translation(format!(
                "Ollama API error {}: {}", status, error_text
            )));
        }

        let generate_response: GenerateResponse = response.json().await
            .map_err(|e| HanvoxError::Translation(format!("Failed to parse response: {}", e)))?;

        let raw_response = generate_response.response.trim().to_string();

        debug!("Raw Ollama response: {}", raw_response);

        if raw_response.is_empty() {
            return Err(HanvoxError::Translation("Empty translation received".to_string()));
        }

        if let Ok(payload) = serde_json::from_str::<TranslationPayload>(&raw_response) {
            let translated = payload.text.trim().to_string();
            if !translated.is_empty() {
                return Ok(translated);
            }
        }

        Ok(self.clean_response(&raw_response))
    }

    async fn check_availability(&self) -> Result<()> {
        check_ollama_availability(&self.config.endpoint, &self.config.model).await
    }
}

/// Check if Ollama is reachable and the model is loaded
pub async fn check_ollama_availability(endpoint: &str, model: &str) -> Result<()> {
    let client = Client::new();
    let url = format!("{}/api/show", endpoint);

    let request = json!({
        "name": model
    });

    let response = client
        .post(&url)
        .json(&request)
        .send()
        .await
        .map_err(|e| HanvoxError::Translation(format!("Failed to connect to Ollama: {}", e)))?;

    if response.status().is_success() {
        info!("Ollama model '{}' is available", model);
        Ok(())
    } else {
        Err(HanvoxError::Translation(format!(
            "Ollama model '{}' not found. Please pull the model first: ollama pull {}",
            model, model
        )))
    }
}

/// Resolve the configured model against the models installed on the
/// Ollama server, falling back to another model of the same family
/// (name prefix before the tag) when the exact model is missing.
pub async fn resolve_model(endpoint: &str, preferred: &str) -> Result<String> {
    let client = Client::new();
    let url = format!("{}/api/tags", endpoint);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| HanvoxError::Translation(format!("Failed to connect to Ollama: {}", e)))?;

    if !response.status().is_success() {
        return Err(HanvoxError::Translation(format!(
            "Ollama model listing failed: HTTP {}", response.status()
        )));
    }

    let list: ModelList = response.json().await
        .map_err(|e| HanvoxError::Translation(format!("Failed to parse model list: {}", e)))?;

    let installed: Vec<String> = list.models.into_iter().map(|m| m.name).collect();

    if installed.iter().any(|name| name == preferred) {
        return Ok(preferred.to_string());
    }

    let family = preferred.split(':').next().unwrap_or(preferred);
    if let Some(substitute) = installed.iter().find(|name| name.starts_with(family)) {
        warn!("Model '{}' not installed, using '{}' instead", preferred, substitute);
        return Ok(substitute.clone());
    }

    Err(HanvoxError::Config(format!(
        "No suitable translation model installed. Please pull the model first: ollama pull {}",
        preferred
    )))
}

/// Convert a language code to a full language name for clearer prompts
fn language_code_to_name(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "ko" => "Korean".to_string(),
        "ja" => "Japanese".to_string(),
        "zh" => "Chinese".to_string(),
        "en" => "English".to_string(),
        "es" => "Spanish".to_string(),
        "fr" => "French".to_string(),
        "de" => "German".to_string(),
        _ => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn backend() -> OllamaBackend {
        OllamaBackend::new(Config::default().translate)
    }

    #[test]
    fn test_prompt_names_target_language() {
        let prompt = backend().build_prompt("Hello there.");
        assert!(prompt.contains("Korean"));
        assert!(prompt.contains("Hello there."));
        assert!(prompt.contains("{\"text\":"));
    }

    #[test]
    fn test_clean_response_skips_commentary() {
        let raw = "Here is the translation:\n\n안녕하세요, 반갑습니다.\n";
        assert_eq!(backend().clean_response(raw), "안녕하세요, 반갑습니다.");
    }

    #[test]
    fn test_payload_parsing() {
        let payload: TranslationPayload =
            serde_json::from_str(r#"{"text":"안녕하세요"}"#).unwrap();
        assert_eq!(payload.text, "안녕하세요");
    }
}
