//! Hanvox - YouTube to Korean Speech Pipeline
//!
//! Downloads a YouTube video's audio, transcribes it to English text,
//! translates the text to Korean through a local Ollama model, and
//! synthesizes Korean speech.

pub mod cli;
pub mod config;
pub mod workflow;
pub mod media;
pub mod transcribe;
pub mod translate;
pub mod synth;
pub mod transcript;
pub mod error;
