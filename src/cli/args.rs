use crate::config::DEFAULT_CONFIG_FILE;
use crate::record::DEFAULT_OUTPUT_DIR;
use clap::Parser;
use std::path::PathBuf;

/// Analyze a local image with an Ollama vision model and save the description as JSON.
#[derive(Parser, Debug)]
#[command(name = "analyze-image")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"Examples:
    analyze-image photo.jpg
    analyze-image photo.jpg -p "How many people are in this picture?"
    analyze-image photo.jpg -m llava:7b -o results/"#)]
pub struct Cli {
    /// Path to the image file to analyze
    pub image_path: PathBuf,

    /// Prompt or question about the image
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Vision model to use (e.g. llava:7b). Defaults to `default_vlm_model` from the config file
    #[arg(short, long)]
    pub model: Option<String>,

    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory for analysis records
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Ollama server address
    #[arg(long, env = "OLLAMA_HOST")]
    pub host: Option<String>,

    /// Request timeout in seconds (waits indefinitely when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
