use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{
    CommandAction, CommandRequest, LoadMorePayload, ProfilePayload, SessionsPayload,
};
use config::ConfigOverrides;
use dashboard_protocol::{serialize_json, ProductCriteria, RecordId, SessionCriteria};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

mod command;
mod config;
mod data;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Faceted product and session analytics over JSON datasets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ./dashboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding products.json, sessions.json and users.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the product catalog
    Products(ProductsArgs),

    /// Filter analysis sessions by text, user and date window
    Sessions(SessionsArgs),

    /// Next page of the session list
    #[command(name = "load-more")]
    LoadMore(LoadMoreArgs),

    /// Headline numbers across the whole catalog
    Overview,

    /// Show a user profile
    Profile(ProfileArgs),

    /// Describe supported actions and payload schemas
    Capabilities,

    /// Execute a JSON Command API request
    Command(CommandArgs),
}

#[derive(Args)]
struct ProductsArgs {
    /// Case-insensitive substring of the product name
    #[arg(long)]
    search: Option<String>,

    /// Exact category name
    #[arg(long)]
    category: Option<String>,

    /// Minimum average rating; non-numeric values are ignored
    #[arg(long)]
    min_rating: Option<String>,

    /// positive | negative | neutral
    #[arg(long)]
    sentiment: Option<String>,

    /// Sales source name
    #[arg(long)]
    source: Option<String>,
}

#[derive(Args)]
struct SessionsArgs {
    /// Case-insensitive substring of the analysis label
    #[arg(long)]
    search: Option<String>,

    /// Exact user name
    #[arg(long)]
    user: Option<String>,

    /// today | week | month
    #[arg(long)]
    date_range: Option<String>,

    /// Reference time for the date window (RFC 3339, default: now)
    #[arg(long)]
    now: Option<String>,
}

#[derive(Args)]
struct LoadMoreArgs {
    /// Records already shown
    #[arg(long, default_value_t = 0)]
    shown: usize,

    /// Records per page (default: configured page size)
    #[arg(long)]
    page_size: Option<usize>,

    /// Resume after this record id instead of counting
    #[arg(long)]
    after_id: Option<String>,
}

#[derive(Args)]
struct ProfileArgs {
    /// User id (default: DASHBOARD_USER_ID or current_user_id from config)
    #[arg(long)]
    user_id: Option<String>,
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let overrides = ConfigOverrides {
        config_path: cli.config.clone(),
        data_dir: cli.data_dir.clone(),
    };
    let config = config::resolve(&overrides).context("Failed to load configuration")?;
    log::debug!(
        "Reading datasets from {} (page size {})",
        config.data_dir.display(),
        config.page_size
    );

    let request = build_request(cli.command)?;
    let response = command::execute(request, config).await;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serialize_json(&response)?
    };
    print_stdout(&output)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn build_request(command: Commands) -> Result<CommandRequest> {
    let (action, payload) = match command {
        Commands::Products(args) => {
            let criteria = ProductCriteria {
                search_term: args.search.unwrap_or_default(),
                category: args.category.unwrap_or_default(),
                min_rating: args.min_rating.unwrap_or_default(),
                sentiment: args.sentiment.unwrap_or_default(),
                source: args.source.unwrap_or_default(),
            };
            (CommandAction::Products, serde_json::to_value(criteria)?)
        }
        Commands::Sessions(args) => {
            let payload = SessionsPayload {
                criteria: SessionCriteria {
                    search_term: args.search.unwrap_or_default(),
                    user: args.user.unwrap_or_default(),
                    date_range: args.date_range.unwrap_or_default(),
                },
                now: args.now,
            };
            (CommandAction::Sessions, serde_json::to_value(payload)?)
        }
        Commands::LoadMore(args) => {
            let payload = LoadMorePayload {
                shown: args.shown,
                page_size: args.page_size,
                after_id: args.after_id.as_deref().map(RecordId::parse),
            };
            (CommandAction::LoadMore, serde_json::to_value(payload)?)
        }
        Commands::Overview => (CommandAction::Overview, serde_json::json!({})),
        Commands::Profile(args) => {
            let payload = ProfilePayload {
                user_id: args.user_id.as_deref().map(RecordId::parse),
            };
            (CommandAction::Profile, serde_json::to_value(payload)?)
        }
        Commands::Capabilities => (CommandAction::Capabilities, serde_json::json!({})),
        Commands::Command(args) => {
            let raw = read_payload(&args)?;
            return serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file");
        }
    };
    Ok(CommandRequest { action, payload })
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}
