use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

use crate::config::ExtractConfig;
use crate::error::{Result, HanvoxError};
use super::{AudioExtractor, DownloadCommandBuilder};

/// Concrete audio extractor implementation (yt-dlp based)
pub struct YtDlpExtractor {
    config: ExtractConfig,
    command_builder: DownloadCommandBuilder,
}

impl YtDlpExtractor {
    /// Create a new extractor implementation
    pub fn new(config: ExtractConfig) -> Self {
        let command_builder = DownloadCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl AudioExtractor for YtDlpExtractor {
    /// Download and extract audio from a video URL
    async fn extract_audio(&self, url: &str, audio_dir: &Path) -> Result<PathBuf> {
        info!("Extracting audio from: {}", url);

        // The downloader fills in the extension of the intermediate file,
        // the post-processing step produces the configured format
        let output_template = audio_dir.join("source_audio.%(ext)s");

        let command = self.command_builder.extract_audio(
            url,
            &output_template,
            &self.config.audio_format,
            &self.config.audio_quality,
        );

        command.execute().await?;

        let audio_path = audio_dir.join(format!("source_audio.{}", self.config.audio_format));
        if !audio_path.exists() {
            return Err(HanvoxError::Extract(format!(
                "Extracted audio file not found: {}",
                audio_path.display()
            )));
        }

        info!("Audio extraction completed: {}", audio_path.display());
        Ok(audio_path)
    }

    /// Check if the downloader is available
    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("--version")
            .output()
            .map_err(|e| HanvoxError::Extract(format!("Downloader not found: {}", e)))?;

        if output.status.success() {
            info!("Downloader is available");
            Ok(())
        } else {
            Err(HanvoxError::Extract("Downloader version check failed".to_string()))
        }
    }
}
