use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use spelunk::core::config::{self, CliOverrides};
use spelunk::tui;
use std::fs::File;

#[derive(Parser)]
#[command(name = "spelunk", about = "Drill-down browser for topics, partitions and messages")]
struct Args {
    /// Number of topics served by the mock data set
    #[arg(long)]
    topics: Option<usize>,

    /// Partitions per topic
    #[arg(long)]
    partitions: Option<usize>,

    /// Log level written to the log file (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Run drill-down fetches on the event loop instead of a worker thread
    #[arg(long)]
    sync_fetch: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            config::SpelunkConfig::default()
        }
    };
    let cli = CliOverrides {
        log_level: args.log_level,
        topic_count: args.topics,
        partition_count: args.partitions,
        sync_fetch: args.sync_fetch,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Spelunk starting with {} topics, {} partitions",
        resolved.fixtures.topic_count,
        resolved.fixtures.partition_count
    );

    tui::run(resolved)
}
