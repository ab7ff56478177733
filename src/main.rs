mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use diaryline::config::DiaryConfig;

#[derive(Parser)]
#[command(name = "diaryline", version, about = "Diary posts on a clustered timeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a new post
    Add {
        content: String,
        /// Backdate the post (RFC 3339, e.g. 2024-05-01T10:00:00Z)
        #[arg(long)]
        at: Option<String>,
    },
    /// List posts, optionally within a date range
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Replace a post's content
    Edit { id: String, content: String },
    /// Delete a post
    Remove { id: String },
    /// Render the timeline once
    Timeline {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Print the computed view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which marker a post belongs to
    Marker { post_id: String },
    /// Re-render the timeline on an interval until Ctrl-C
    Watch {
        /// Seconds between renders
        #[arg(long, default_value_t = 5)]
        every: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = DiaryConfig::load()?;

    // Log to stderr so stdout stays clean for JSON output.
    let filter = EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Add { content, at } => cli::posts::add(&config, &content, at.as_deref())?,
        Command::List { from, to } => cli::posts::list(&config, from.as_deref(), to.as_deref())?,
        Command::Edit { id, content } => cli::posts::edit(&config, &id, &content)?,
        Command::Remove { id } => cli::posts::remove(&config, &id)?,
        Command::Timeline { from, to, json } => {
            cli::timeline::timeline(&config, from.as_deref(), to.as_deref(), json)?
        }
        Command::Marker { post_id } => cli::timeline::marker(&config, &post_id)?,
        Command::Watch { every } => cli::timeline::watch(&config, every).await?,
    }

    Ok(())
}
