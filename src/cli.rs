use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: download, transcribe, translate, synthesize
    Run {
        /// YouTube video URL
        url: String,

        /// Output file name for the synthesized speech
        #[arg(short, long, default_value = "korean_audio.mp3")]
        output: String,

        /// Output directory for the final audio file
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Download and extract audio from a YouTube URL
    Extract {
        /// YouTube video URL
        url: String,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Transcribe an audio file to text
    Transcribe {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output transcript file
        #[arg(short, long)]
        output: PathBuf,

        /// Source language hint
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Translate a transcript file using the local LLM
    Translate {
        /// Input transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Output translated file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Synthesize speech from a translated text file
    Synthesize {
        /// Input text file
        #[arg(short, long)]
        input: PathBuf,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },
}
