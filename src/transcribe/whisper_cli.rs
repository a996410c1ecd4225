use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::info;

use crate::config::TranscriberConfig;
use crate::error::{Result, HanvoxError};
use super::{Transcriber, Transcript, TranscriptSegment};

/// Whisper CLI JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperOutput {
    pub text: String,
    pub segments: Vec<WhisperSegment>,
    pub language: Option<String>,
}

/// Whisper CLI segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSegment {
    pub id: i64,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<WhisperOutput> for Transcript {
    fn from(output: WhisperOutput) -> Self {
        let segments = output.segments
            .into_iter()
            .map(|seg| TranscriptSegment {
                id: seg.id as i32,
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
            })
            .collect();

        Transcript {
            text: output.text.trim().to_string(),
            segments,
            language: output.language.unwrap_or_else(|| "en".to_string()),
        }
    }
}

/// Whisper CLI implementation
pub struct WhisperCliTranscriber {
    config: TranscriberConfig,
}

impl WhisperCliTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Transcript> {
        info!("Transcribing audio: {}", audio_path.display());

        // Whisper writes its JSON next to other output formats, keep it
        // in a temporary directory
        let temp_dir = tempfile::tempdir()
            .map_err(|e| HanvoxError::Transcriber(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg(audio_path)
            .arg("--model").arg(&self.config.model)
            .arg("--output_dir").arg(output_dir)
            .arg("--output_format").arg("json");

        let lang = language.unwrap_or(&self.config.language);
        if !lang.is_empty() {
            cmd.arg("--language").arg(lang);
        }

        let output = cmd.output()
            .map_err(|e| HanvoxError::Transcriber(format!("Failed to execute whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HanvoxError::Transcriber(format!("Whisper failed: {}", stderr)));
        }

        let audio_stem = audio_path.file_stem()
            .ok_or_else(|| HanvoxError::Transcriber("Invalid audio filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", audio_stem.to_string_lossy()));

        let json_content = std::fs::read_to_string(&json_file)
            .map_err(|e| HanvoxError::Transcriber(format!("Failed to read whisper output: {}", e)))?;

        let whisper_output: WhisperOutput = serde_json::from_str(&json_content)
            .map_err(|e| HanvoxError::Transcriber(format!("Failed to parse whisper JSON: {}", e)))?;

        let transcript: Transcript = whisper_output.into();

        if transcript.text.is_empty() {
            return Err(HanvoxError::Transcriber("Empty transcription result".to_string()));
        }

        info!(
            "Transcription completed: {} characters, language: {}",
            transcript.text.chars().count(),
            transcript.language
        );

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whisper_json_parses_into_transcript() {
        let json = r#"{
            "text": " Hello everyone, welcome back. ",
            "segments": [
                {"id": 0, "start": 0.0, "end": 2.4, "text": " Hello everyone,"},
                {"id": 1, "start": 2.4, "end": 4.1, "text": " welcome back."}
            ],
            "language": "en"
        }"#;

        let output: WhisperOutput = serde_json::from_str(json).unwrap();
        let transcript: Transcript = output.into();

        assert_eq!(transcript.text, "Hello everyone, welcome back.");
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[1].text, "welcome back.");
        assert_eq!(transcript.language, "en");
    }

    #[test]
    fn test_missing_language_defaults_to_english() {
        let json = r#"{"text": "Hi.", "segments": [], "language": null}"#;

        let output: WhisperOutput = serde_json::from_str(json).unwrap();
        let transcript: Transcript = output.into();
        assert_eq!(transcript.language, "en");
    }
}
