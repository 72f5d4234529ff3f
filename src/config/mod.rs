//! Runtime configuration from environment variables and CLI flags.
//!
//! A `.env` file in the working directory is loaded first, then each
//! field resolves from the command line or the environment.

use clap::Parser;
use dotenvy::dotenv;

#[derive(Debug, Clone, Parser)]
#[command(name = "momentum")]
#[command(about = "AI meeting minutes backend", long_about = None)]
pub struct Config {
    /// Groq API key used for transcription and chat completions
    #[arg(long, env)]
    pub groq_api_key: String,

    /// Notion integration token used for exporting minutes
    #[arg(long, env)]
    pub notion_api_key: String,

    /// Notion database that receives exported meeting pages
    #[arg(long, env)]
    pub notion_database_id: Option<String>,

    /// Model used for audio transcription
    #[arg(long, env, default_value = "whisper-large-v3")]
    pub transcription_model: String,

    /// Model used for minutes extraction
    #[arg(long, env, default_value = "llama3-8b-8192")]
    pub summary_model: String,

    /// Model used for transcript question answering
    #[arg(long, env, default_value = "llama3-8b-8192")]
    pub chat_model: String,

    /// Interface the HTTP server binds to
    #[arg(long, env, default_value = "0.0.0.0")]
    pub interface: String,

    /// Port the HTTP server listens on
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Load `.env` if present, then parse flags and environment.
    pub fn load() -> Self {
        dotenv().ok();
        Config::parse()
    }
}
