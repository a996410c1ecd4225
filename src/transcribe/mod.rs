// Speech recognition stage
//
// This module wraps the external whisper CLI behind a trait and parses
// its JSON output into a transcript usable by the translation stage.

pub mod whisper_cli;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use whisper_cli::*;

use crate::config::TranscriberConfig;
use crate::error::Result;

/// A recognized speech segment with timing information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub id: i32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Full speech recognition result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    pub language: String,
}

/// Main trait for speech recognition operations
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file to text
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Transcript>;
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create the default transcriber implementation (whisper CLI based)
    pub fn create_transcriber(config: TranscriberConfig) -> Box<dyn Transcriber> {
        Box::new(whisper_cli::WhisperCliTranscriber::new(config))
    }
}
