use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::{Result, HanvoxError};

/// Write an intermediate text artifact (transcript or translation)
pub async fn save_text<P: AsRef<Path>>(text: &str, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();

    fs::write(output_path, text).await
        .map_err(HanvoxError::Io)?;

    info!(
        "Text saved: {} ({} characters)",
        output_path.display(),
        text.chars().count()
    );
    Ok(())
}

/// Read a text artifact produced by an earlier stage
pub async fn load_text<P: AsRef<Path>>(input_path: P) -> Result<String> {
    let input_path = input_path.as_ref();

    if !input_path.exists() {
        return Err(HanvoxError::FileNotFound(input_path.display().to_string()));
    }

    let content = fs::read_to_string(input_path).await?;
    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcribed_text.txt");

        save_text("Hello everyone, welcome back.", &path).await.unwrap();
        let loaded = load_text(&path).await.unwrap();
        assert_eq!(loaded, "Hello everyone, welcome back.");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_text(dir.path().join("missing.txt")).await.unwrap_err();
        assert!(matches!(err, HanvoxError::FileNotFound(_)));
    }
}
