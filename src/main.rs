use clap::Parser;
use murmur::core::config::{self, CompletionMode};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "murmur", about = "Console chat client")]
struct Args {
    /// Nickname used in every room
    #[arg(short, long)]
    nick: Option<String>,

    /// Nickname completion strategy
    #[arg(short, long, value_enum)]
    completion: Option<CompletionMode>,

    /// Where to write the log
    #[arg(long, default_value = "murmur.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        config::MurmurConfig::default()
    });
    let resolved = config::resolve(&file_config, args.nick.as_deref(), args.completion);

    log::info!(
        "Murmur starting up as {} ({:?} completion, {} rooms)",
        resolved.nick,
        resolved.completion.mode,
        resolved.rooms.len()
    );

    murmur::tui::run(resolved)
}
