// Speech synthesis stage
//
// This module turns the translated text into a single audio file
// through an external TTS endpoint.

pub mod gtranslate;

use async_trait::async_trait;
use std::path::Path;

pub use gtranslate::*;

use crate::config::SynthConfig;
use crate::error::Result;

/// Main trait for speech synthesis operations
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize text into a single audio file at `output_path`
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<()>;
}

/// Factory for creating synthesizer instances
pub struct SynthesizerFactory;

impl SynthesizerFactory {
    /// Create the default synthesizer implementation (Google Translate TTS)
    pub fn create_synthesizer(config: SynthConfig) -> Box<dyn Synthesizer> {
        Box::new(gtranslate::GoogleTtsSynthesizer::new(config))
    }
}
