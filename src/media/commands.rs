use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{Result, HanvoxError};

/// Abstract external tool command representation
#[derive(Debug, Clone)]
pub struct ToolCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl ToolCommand {
    /// Create a new external tool command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        debug!("Executing tool command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let mut cmd = Command::new(&self.binary_path);
        cmd.args(&self.args);

        let output = cmd.output()
            .map_err(|e| HanvoxError::Extract(format!("Failed to execute {}: {}", self.binary_path, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HanvoxError::Extract(format!(
                "{} failed: {}",
                self.description,
                stderr
            )));
        }

        Ok(())
    }
}

/// Builder for downloader invocations
pub struct DownloadCommandBuilder {
    binary_path: String,
}

impl DownloadCommandBuilder {
    /// Create a new command builder
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build an audio download command: best audio track, re-encoded to
    /// the requested format by the downloader's post-processing step
    pub fn extract_audio<P: AsRef<Path>>(
        &self,
        url: &str,
        output_template: P,
        audio_format: &str,
        audio_quality: &str,
    ) -> ToolCommand {
        ToolCommand::new(&self.binary_path, "Audio download")
            .arg("-f").arg("bestaudio/best")
            .arg("-x")
            .arg("--audio-format").arg(audio_format)
            .arg("--audio-quality").arg(audio_quality)
            .arg("-o").arg(output_template.as_ref().to_string_lossy().to_string())
            .arg(url)
    }

    /// Build version check command
    pub fn version_check(&self) -> ToolCommand {
        ToolCommand::new(&self.binary_path, "Version check")
            .arg("--version")
    }
}
