use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

use crate::config::SynthConfig;
use crate::error::{Result, HanvoxError};
use crate::translate::split_text;
use super::Synthesizer;

/// Google Translate TTS implementation.
///
/// The endpoint rejects long inputs, so the text is re-chunked at the
/// configured limit and the per-chunk MP3 streams are appended in order
/// into one output file.
pub struct GoogleTtsSynthesizer {
    client: Client,
    config: SynthConfig,
}

impl GoogleTtsSynthesizer {
    pub fn new(config: SynthConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }

    /// Fetch the audio bytes for one text chunk
    async fn fetch_chunk_audio(&self, text: &str) -> Result<Vec<u8>> {
        let response = self.client
            .get(&self.config.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.config.language.as_str()),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| HanvoxError::Synthesis(format!("TTS request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(HanvoxError::Synthesis(format!(
                "TTS endpoint error: HTTP {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await
            .map_err(|e| HanvoxError::Synthesis(format!("Failed to read TTS response: {}", e)))?;

        if bytes.is_empty() {
            return Err(HanvoxError::Synthesis("Empty audio response".to_string()));
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Synthesizer for GoogleTtsSynthesizer {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<()> {
        info!("Synthesizing speech to: {}", output_path.display());

        let chunks = split_text(text, self.config.chunk_max_chars);
        if chunks.is_empty() {
            return Err(HanvoxError::Synthesis("No text to synthesize".to_string()));
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("Fetching audio for chunk {}/{}", idx + 1, chunks.len());
            let bytes = self.fetch_chunk_audio(chunk).await?;
            audio.extend_from_slice(&bytes);
        }

        fs::write(output_path, audio).await?;

        info!("Speech synthesis completed: {} chunks merged", chunks.len());
        Ok(())
    }
}
