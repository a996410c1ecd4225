use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, HanvoxError};
use crate::media::{AudioExtractor, AudioExtractorFactory};
use crate::synth::{Synthesizer, SynthesizerFactory};
use crate::transcribe::{Transcriber, TranscriberFactory};
use crate::translate::{resolve_model, TranslatorFactory};
use crate::transcript;

pub struct Workflow {
    config: Config,
    extractor: Box<dyn AudioExtractor>,
    transcriber: Box<dyn Transcriber>,
    synthesizer: Box<dyn Synthesizer>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let extractor = AudioExtractorFactory::create_extractor(config.extract.clone());
        let transcriber = TranscriberFactory::create_transcriber(config.transcriber.clone());
        let synthesizer = SynthesizerFactory::create_synthesizer(config.synth.clone());

        // Check dependencies
        extractor.check_availability()?;

        Ok(Self {
            config,
            extractor,
            transcriber,
            synthesizer,
        })
    }

    /// Run the full pipeline for one video URL
    pub async fn run(&self, url: &str, output_name: &str, output_dir: Option<&Path>) -> Result<()> {
        info!("Processing video: {}", url);

        let audio_dir = PathBuf::from(&self.config.layout.audio_dir);
        let text_dir = PathBuf::from(&self.config.layout.text_dir);
        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from(&self.config.layout.output_dir),
        };

        for dir in [&audio_dir, &text_dir, &output_dir] {
            fs::create_dir_all(dir).await?;
        }

        // Step 1: Extract audio from the video
        let audio_path = self.extractor.extract_audio(url, &audio_dir).await?;

        // Step 2: Transcribe to source-language text
        let transcript = self.transcriber.transcribe(&audio_path, None).await?;
        transcript::save_text(&transcript.text, text_dir.join("transcribed_text.txt")).await?;

        // Step 3: Chunked translation
        let translated_text = self.translate_document(&transcript.text).await?;
        transcript::save_text(&translated_text, text_dir.join("translated_text.txt")).await?;

        // Step 4: Synthesize speech
        let output_path = output_dir.join(output_name);
        self.synthesizer.synthesize(&translated_text, &output_path).await?;

        // Best-effort cleanup of the downloaded audio
        if let Err(e) = fs::remove_file(&audio_path).await {
            warn!("Failed to remove temporary audio file {}: {}", audio_path.display(), e);
        }

        info!("Pipeline completed: {}", output_path.display());
        Ok(())
    }

    /// Translate a full source document and report the fallback summary
    pub async fn translate_document(&self, source_text: &str) -> Result<String> {
        // Resolve the configured model against what the server has
        // installed before the chunk loop starts
        let mut translate_config = self.config.translate.clone();
        translate_config.model =
            resolve_model(&translate_config.endpoint, &translate_config.model).await?;

        let translator = TranslatorFactory::create_translator(translate_config);
        let document = translator.translate_document(source_text).await?;

        if document.fallback_count() > 0 {
            warn!(
                "{}/{} chunks kept their original text after exhausting retries",
                document.fallback_count(),
                document.chunk_count()
            );
        }

        Ok(document.text())
    }

    /// Extract audio from a video URL to an explicit output path
    pub async fn extract_audio(&self, url: &str, output_path: &Path) -> Result<()> {
        let audio_dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&audio_dir).await?;

        let extracted = self.extractor.extract_audio(url, &audio_dir).await?;

        if extracted != output_path {
            fs::copy(&extracted, output_path).await?;
            if let Err(e) = fs::remove_file(&extracted).await {
                warn!("Failed to remove intermediate audio file: {}", e);
            }
        }

        Ok(())
    }

    /// Transcribe an audio file to a text file
    pub async fn transcribe_audio(
        &self,
        audio_path: &Path,
        output_path: &Path,
        language: Option<&str>,
    ) -> Result<()> {
        if !audio_path.exists() {
            return Err(HanvoxError::FileNotFound(audio_path.display().to_string()));
        }

        let transcript = self.transcriber.transcribe(audio_path, language).await?;
        transcript::save_text(&transcript.text, output_path).await
    }

    /// Translate a transcript file to a text file
    pub async fn translate_file(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let source_text = transcript::load_text(input_path).await?;
        let translated_text = self.translate_document(&source_text).await?;
        transcript::save_text(&translated_text, output_path).await
    }

    /// Synthesize speech from a text file
    pub async fn synthesize_file(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let text = transcript::load_text(input_path).await?;
        self.synthesizer.synthesize(&text, output_path).await
    }
}
