// Chunked translation stage
//
// This module converts a long source text into the target language
// through a local model backend:
// - chunk: bounded-size splitting at sentence/word boundaries
// - backend: the request/response service seam and its Ollama implementation
// - chunked: the per-chunk retry/fallback state machine and reassembly

pub mod backend;
pub mod chunk;
pub mod chunked;

pub use backend::{check_ollama_availability, resolve_model, OllamaBackend, TranslationBackend};
pub use chunk::split_text;
pub use chunked::{ChunkOutcome, ChunkedTranslator, TranslatedDocument};

use crate::config::TranslateConfig;

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a chunked translator over the default Ollama backend
    pub fn create_translator(config: TranslateConfig) -> ChunkedTranslator {
        let backend = Box::new(OllamaBackend::new(config.clone()));
        ChunkedTranslator::new(config, backend)
    }
}
