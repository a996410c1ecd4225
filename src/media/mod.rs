// Source audio acquisition
//
// This module wraps the external download tool behind a trait:
// - Commands: command builder abstraction for tool invocations
// - Downloader: yt-dlp implementation producing a local audio file

pub mod commands;
pub mod downloader;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use commands::*;
pub use downloader::*;

use crate::config::ExtractConfig;
use crate::error::Result;

/// Main trait for source audio acquisition
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Download and extract audio from a video URL into the given directory
    async fn extract_audio(&self, url: &str, audio_dir: &Path) -> Result<PathBuf>;

    /// Check if the download tool is available
    fn check_availability(&self) -> Result<()>;
}

/// Factory for creating audio extractor instances
pub struct AudioExtractorFactory;

impl AudioExtractorFactory {
    /// Create the default extractor implementation (yt-dlp based)
    pub fn create_extractor(config: ExtractConfig) -> Box<dyn AudioExtractor> {
        Box::new(downloader::YtDlpExtractor::new(config))
    }
}
