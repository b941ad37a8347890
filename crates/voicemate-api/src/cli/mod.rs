//! CLI command definitions for the `voicemate` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod db;
pub mod history;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use voicemate_core::chat::service::DEFAULT_HISTORY_LIMIT;

/// A small voice-assistant backend: rule-based replies, optional LLM
/// answers, Wikipedia lookups and a conversation log.
#[derive(Parser)]
#[command(name = "voicemate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(
        long,
        global = true,
        env = "VOICEMATE_OTEL",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Send one message to the assistant and print the reply.
    Ask {
        /// The message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show recent conversation history.
    #[command(alias = "log")]
    History {
        /// Number of exchanges to show.
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },

    /// Create the conversations table if it does not exist.
    InitDb,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
