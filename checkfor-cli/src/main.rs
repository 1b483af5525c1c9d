use checkfor::{
    config::{EncodingMode, Settings},
    mcp::{self, McpServer},
    search, SearchError, SearchRequest,
};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML file with default search options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CliSearchConfig {
    /// Directories to search, comma-separated (defaults to the current directory)
    #[arg(short = 'd', long = "dir", value_delimiter = ',')]
    dirs: Vec<String>,

    /// String to search for
    #[arg(short, long)]
    search: String,

    /// File extension to filter (e.g. .go, .rtf)
    #[arg(short, long)]
    ext: Option<String>,

    /// Comma-separated strings; matching lines containing any of them are dropped
    #[arg(short = 'x', long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Perform case-insensitive search
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Match whole words only
    #[arg(short, long)]
    whole_word: bool,

    /// Number of context lines before and after each match
    #[arg(short = 'C', long)]
    context: Option<usize>,

    /// Hide original_matches and filtered_matches from output
    #[arg(long)]
    hide_filter_stats: bool,

    /// How to handle invalid UTF-8 (lossy|failfast)
    #[arg(long)]
    encoding: Option<EncodingMode>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

impl CliSearchConfig {
    /// Builds a request; flags override config file values
    fn to_request(&self, settings: &Settings) -> SearchRequest {
        let mut request = settings.request(self.search.clone());

        if !self.dirs.is_empty() {
            request.dirs = self
                .dirs
                .iter()
                .map(|dir| PathBuf::from(dir.trim()))
                .collect();
        }
        if let Some(ext) = &self.ext {
            request.ext = Some(ext.clone());
        }
        if !self.exclude.is_empty() {
            request.exclude = self
                .exclude
                .iter()
                .map(|term| term.trim().to_string())
                .collect();
        }
        if self.case_insensitive {
            request.case_insensitive = true;
        }
        if self.whole_word {
            request.whole_word = true;
        }
        if let Some(context) = self.context {
            request.context = context;
        }
        if self.hide_filter_stats {
            request.hide_filter_stats = true;
        }
        if let Some(encoding) = self.encoding {
            request.encoding = encoding;
        }
        request
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search files and print the result as JSON
    Search(Box<CliSearchConfig>),

    /// Answer JSON-RPC tool requests on stdin/stdout (the default)
    Serve,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load_from(cli.config.as_deref())
        .map_err(|e| SearchError::config_error(e.to_string()))?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&settings.log_level));
    debug!("Loaded settings: {:?}", settings);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Search(config) => {
            let request = config.to_request(&settings);
            let result = search(&request)?;
            let output = if config.pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{}", output);
            Ok(())
        }
        Commands::Serve => {
            let server = McpServer::new(settings);
            mcp::serve(&server, io::stdin().lock(), io::stdout().lock())?;
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout carries results and protocol responses only
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
