use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, HanvoxError};

// Default values for fields added after the initial config format
fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_keep_alive() -> String {
    "10m".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extract: ExtractConfig,
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub synth: SynthConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Path to the downloader binary (e.g., yt-dlp)
    pub binary_path: String,
    /// Audio container produced by the download post-processing step
    pub audio_format: String,
    /// Audio quality passed to the downloader
    pub audio_quality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the whisper binary
    pub binary_path: String,
    /// Whisper model name
    pub model: String,
    /// Source language hint for recognition
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Ollama endpoint URL
    pub endpoint: String,
    /// LLM model to use for translation
    pub model: String,
    /// Target language code for translation
    pub target_language: String,
    /// Maximum attempts per chunk before keeping the source text
    pub max_retries: u32,
    /// Maximum characters per translation request
    pub chunk_max_chars: usize,
    /// Delay between retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Sampling temperature for generation
    pub temperature: f32,
    /// Nucleus sampling parameter
    pub top_p: f32,
    /// Maximum tokens to generate per request
    pub num_predict: u32,
    /// Context window size for the model
    pub num_ctx: u32,
    /// How long the model stays loaded between requests
    #[serde(default = "default_keep_alive")]
    pub keep_alive: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthConfig {
    /// TTS endpoint URL
    pub endpoint: String,
    /// Language code for synthesis
    pub language: String,
    /// Maximum characters per TTS request
    pub chunk_max_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Directory for extracted source audio
    pub audio_dir: String,
    /// Directory for transcript and translation text files
    pub text_dir: String,
    /// Directory for the synthesized speech output
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extract: ExtractConfig {
                binary_path: "yt-dlp".to_string(),
                audio_format: "wav".to_string(),
                audio_quality: "192K".to_string(),
            },
            transcriber: TranscriberConfig {
                binary_path: "whisper".to_string(),
                model: "base".to_string(),
                language: "en".to_string(),
            },
            translate: TranslateConfig {
                endpoint: "http://localhost:11434".to_string(),
                model: "gemma3:4b".to_string(),
                target_language: "ko".to_string(),
                max_retries: 3,
                chunk_max_chars: 500,
                retry_delay_ms: 2000,
                temperature: 0.2,
                top_p: 0.8,
                num_predict: 1024,
                num_ctx: 2048,
                keep_alive: "10m".to_string(),
            },
            synth: SynthConfig {
                endpoint: "https://translate.google.com/translate_tts".to_string(),
                language: "ko".to_string(),
                chunk_max_chars: 180,
            },
            layout: LayoutConfig {
                audio_dir: "audio".to_string(),
                text_dir: "text".to_string(),
                output_dir: "output".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HanvoxError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| HanvoxError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HanvoxError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| HanvoxError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
