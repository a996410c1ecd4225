use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::TranslateConfig;
use crate::error::Result;
use super::backend::TranslationBackend;
use super::chunk::split_text;

/// Terminal state of a single chunk translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The backend produced a translation after `retries` failed attempts
    Translated { text: String, retries: u32 },
    /// Every attempt failed and the original source text is kept
    Fallback { text: String, retries: u32 },
}

impl ChunkOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Translated { text, .. } | Self::Fallback { text, .. } => text,
        }
    }

    pub fn retries(&self) -> u32 {
        match self {
            Self::Translated { retries, .. } | Self::Fallback { retries, .. } => *retries,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Ordered per-chunk results of one translation run.
///
/// Invariant: the outcome count equals the input chunk count and the
/// order matches the source text.
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    outcomes: Vec<ChunkOutcome>,
}

impl TranslatedDocument {
    pub fn outcomes(&self) -> &[ChunkOutcome] {
        &self.outcomes
    }

    pub fn chunk_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn fallback_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_fallback()).count()
    }

    /// Assemble the final document text in chunk order
    pub fn text(&self) -> String {
        self.outcomes
            .iter()
            .map(|o| o.text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Chunked translation with bounded retries and per-chunk fallback.
///
/// Chunks are translated one at a time, in order. A failed call is
/// retried up to `max_retries` attempts; when retries are exhausted the
/// original chunk text is kept so no content is ever dropped.
pub struct ChunkedTranslator {
    backend: Box<dyn TranslationBackend>,
    config: TranslateConfig,
}

impl ChunkedTranslator {
    pub fn new(config: TranslateConfig, backend: Box<dyn TranslationBackend>) -> Self {
        Self { backend, config }
    }

    /// Translate a full document chunk by chunk.
    ///
    /// An unreachable backend is reported once, before any chunk is
    /// attempted, and aborts the run. Per-chunk failures never escalate
    /// past this method.
    pub async fn translate_document(&self, source_text: &str) -> Result<TranslatedDocument> {
        self.backend.check_availability().await?;

        let chunks = split_text(source_text, self.config.chunk_max_chars);
        let total = chunks.len();
        info!("Translating {} chunks (limit {} chars)", total, self.config.chunk_max_chars);

        let progress = ProgressBar::new(total as u64);
        progress.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks")
            .unwrap()
            .progress_chars("#>-"));

        let mut outcomes = Vec::with_capacity(total);
        for (idx, chunk) in chunks.iter().enumerate() {
            let outcome = self.translate_chunk(chunk, idx + 1, total).await;
            if outcome.is_fallback() {
                warn!(
                    "Chunk {}/{} kept its original text after {} failed attempts",
                    idx + 1, total, outcome.retries()
                );
            }
            outcomes.push(outcome);
            progress.inc(1);
        }
        progress.finish_and_clear();

        let document = TranslatedDocument { outcomes };
        info!(
            "Translation completed: {} chunks, {} fell back to source text",
            document.chunk_count(),
            document.fallback_count()
        );

        Ok(document)
    }

    /// Drive a single chunk through the retry state machine
    async fn translate_chunk(&self, chunk: &str, index: usize, total: usize) -> ChunkOutcome {
        let mut retries = 0u32;

        loop {
            info!("┌─ Translating chunk {}/{} (attempt {}) ────────", index, total, retries + 1);

            match self.backend.translate_chunk(chunk).await {
                Ok(translation) => {
                    info!("│ Target: {}", translation);
                    info!("└─────────────────────────────────────");
                    return ChunkOutcome::Translated { text: translation, retries };
                }
                Err(e) => {
                    warn!("│ Attempt {} failed: {}", retries + 1, e);
                    warn!("└─────────────────────────────────────");
                }
            }

            retries += 1;
            if retries >= self.config.max_retries {
                return ChunkOutcome::Fallback { text: chunk.to_string(), retries };
            }

            tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;

    use crate::config::Config;
    use crate::error::HanvoxError;
    use crate::translate::chunk::split_text;
    use crate::translate::backend::TranslationBackend;

    /// Backend that fails a scripted number of calls before succeeding
    struct MockBackend {
        failures_before_success: usize,
        reachable: bool,
        calls: Arc<AtomicUsize>,
    }

    impl MockBackend {
        fn new(failures_before_success: usize) -> Self {
            Self {
                failures_before_success,
                reachable: true,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn unreachable() -> Self {
            Self {
                failures_before_success: 0,
                reachable: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn call_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl TranslationBackend for MockBackend {
        async fn translate_chunk(&self, text: &str) -> crate::error::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                return Err(HanvoxError::Translation("simulated transient failure".to_string()));
            }
            Ok(format!("{} [translated]", text))
        }

        async fn check_availability(&self) -> crate::error::Result<()> {
            if self.reachable {
                Ok(())
            } else {
                Err(HanvoxError::Translation("Failed to connect to Ollama".to_string()))
            }
        }
    }

    fn test_config() -> crate::config::TranslateConfig {
        let mut config = Config::default().translate;
        config.retry_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let translator = ChunkedTranslator::new(test_config(), Box::new(MockBackend::new(0)));
        let document = translator.translate_document("Hello world.").await.unwrap();

        assert_eq!(document.chunk_count(), 1);
        assert_eq!(document.fallback_count(), 0);
        assert_eq!(
            document.outcomes()[0],
            ChunkOutcome::Translated { text: "Hello world. [translated]".to_string(), retries: 0 }
        );
    }

    #[tokio::test]
    async fn test_transient_failures_then_success_records_retries() {
        // Fails twice, succeeds on the third attempt with max_retries = 3
        let translator = ChunkedTranslator::new(test_config(), Box::new(MockBackend::new(2)));
        let document = translator.translate_document("Hello world.").await.unwrap();

        let outcome = &document.outcomes()[0];
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.retries(), 2);
        assert_eq!(outcome.text(), "Hello world. [translated]");
    }

    #[tokio::test]
    async fn test_exhausted_retries_fall_back_to_original_text() {
        let translator =
            ChunkedTranslator::new(test_config(), Box::new(MockBackend::new(usize::MAX)));
        let document = translator.translate_document("Hello world.").await.unwrap();

        // No run-level abort, the original text is kept
        assert_eq!(document.chunk_count(), 1);
        assert_eq!(document.fallback_count(), 1);
        let outcome = &document.outcomes()[0];
        assert_eq!(outcome.text(), "Hello world.");
        assert_eq!(outcome.retries(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_fatal_before_any_chunk() {
        let backend = MockBackend::unreachable();
        let calls = backend.call_counter();

        let translator = ChunkedTranslator::new(test_config(), Box::new(backend));
        let result = translator.translate_document("Hello world.").await;

        assert!(matches!(result, Err(HanvoxError::Translation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_outcome_count_and_order_match_input_chunks() {
        let mut config = test_config();
        config.chunk_max_chars = 40;

        let text = "First sentence here. Second sentence here. Third sentence here. \
                    Fourth sentence here. Fifth sentence here.";
        let expected_chunks = split_text(text, config.chunk_max_chars);

        let translator = ChunkedTranslator::new(config, Box::new(MockBackend::new(0)));
        let document = translator.translate_document(text).await.unwrap();

        assert_eq!(document.chunk_count(), expected_chunks.len());
        for (outcome, chunk) in document.outcomes().iter().zip(&expected_chunks) {
            assert_eq!(outcome.text(), format!("{} [translated]", chunk));
        }
        assert_eq!(
            document.text(),
            expected_chunks
                .iter()
                .map(|c| format!("{} [translated]", c))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    #[tokio::test]
    async fn test_failed_chunks_do_not_affect_later_chunks() {
        let mut config = test_config();
        config.chunk_max_chars = 25;

        // First chunk exhausts all 3 attempts, every later call succeeds
        let translator = ChunkedTranslator::new(config, Box::new(MockBackend::new(3)));
        let document = translator
            .translate_document("First sentence is here. Second sentence is here.")
            .await
            .unwrap();

        assert_eq!(document.chunk_count(), 2);
        assert_eq!(document.fallback_count(), 1);
        assert!(document.outcomes()[0].is_fallback());
        assert!(!document.outcomes()[1].is_fallback());
    }
}
