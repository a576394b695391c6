use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ostrich_client::config::Config;
use ostrich_client::ostrich::{OstrichClient, OstrichHttpClient, Response};
use ostrich_client::{format_error, RecordParams, ResourceIdentifier, ResourceLevel, Verb};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line client for OstrichDB
#[derive(Parser, Debug)]
#[command(name = "ostc", version, about, long_about = None)]
struct Args {
    /// Server address, e.g. http://localhost:8042
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Reject type/value on verbs that do not use them
    #[arg(long, global = true)]
    strict: bool,

    /// Percent-encode names and values (changes what the server sees)
    #[arg(long, global = true)]
    percent_encode: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the server version
    Version,
    /// Act on a whole collection
    Collection {
        /// FETCH/GET, CREATE/POST, REMOVE/DELETE, PROBE/HEAD, ...
        verb: String,
        /// Collection name (defaults to the configured one)
        name: Option<String>,
    },
    /// Act on a cluster within a collection
    Cluster {
        verb: String,
        /// Cluster name (defaults to the configured one)
        name: Option<String>,
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// Act on a record within a cluster
    Record {
        verb: String,
        /// Record name (defaults to the configured one)
        name: Option<String>,
        #[arg(short, long)]
        collection: Option<String>,
        #[arg(long)]
        cluster: Option<String>,
        /// Record type, used by CREATE and REPLACE
        #[arg(short = 't', long = "type")]
        record_type: Option<String>,
        /// Record value, used by REPLACE
        #[arg(short, long)]
        value: Option<String>,
    },
    /// Save defaults to the config file
    Use {
        #[arg(short, long)]
        collection: Option<String>,
        #[arg(long)]
        cluster: Option<String>,
        #[arg(short, long)]
        record: Option<String>,
        #[arg(short = 't', long = "type")]
        record_type: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("ostc started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("ostrich-client").join("ostc.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".ostrich-client").join("ostc.log");
    }
    PathBuf::from("ostc.log")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let config = Config::load();

    let (level, verb, result) = match &args.command {
        Command::Use {
            collection,
            cluster,
            record,
            record_type,
        } => {
            let updated = apply_defaults(
                config,
                args.base_url.as_deref(),
                collection,
                cluster,
                record,
                record_type,
            )?;
            updated.save()?;
            match Config::config_path() {
                Some(path) => println!("Saved defaults to {}", path.display()),
                None => println!("No config directory available; defaults not saved"),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Version => {
            let client = connect(&args, &config)?;
            (
                ResourceLevel::Version,
                Verb::Fetch.to_string(),
                client.version().await,
            )
        }
        Command::Collection { verb, name } => {
            let id = resolve_identifier(&config, name.clone(), None, None)?;
            let client = connect(&args, &config)?;
            (
                ResourceLevel::Collection,
                verb.clone(),
                client.collection_action(verb, &id).await,
            )
        }
        Command::Cluster {
            verb,
            name,
            collection,
        } => {
            let id = resolve_identifier(
                &config,
                collection.clone(),
                name.clone().or_else(|| config.cluster.clone()),
                None,
            )?;
            let client = connect(&args, &config)?;
            (
                ResourceLevel::Cluster,
                verb.clone(),
                client.cluster_action(verb, &id).await,
            )
        }
        Command::Record {
            verb,
            name,
            collection,
            cluster,
            record_type,
            value,
        } => {
            let id = resolve_identifier(
                &config,
                collection.clone(),
                cluster.clone().or_else(|| config.cluster.clone()),
                name.clone().or_else(|| config.record.clone()),
            )?;
            let params = record_params(&config, verb, record_type.as_deref(), value.clone());
            let client = connect(&args, &config)?;
            (
                ResourceLevel::Record,
                verb.clone(),
                client.record_action(verb, &id, &params).await,
            )
        }
    };

    match result {
        Ok(response) => Ok(report(level, &verb, &response)),
        Err(err) => {
            tracing::error!("{} on {} failed: {}", verb, level, err);
            eprintln!("Error: {}", format_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Settings for this invocation only: the CLI switches layered over the
/// saved config, never written back
fn request_options(config: &Config, strict: bool, percent_encode: bool) -> Config {
    let mut options = config.clone();
    options.strict_params |= strict;
    options.percent_encode |= percent_encode;
    options
}

fn connect(args: &Args, config: &Config) -> Result<OstrichClient> {
    let options = request_options(config, args.strict, args.percent_encode);
    let builder = options.address_builder(args.base_url.as_deref())?;
    tracing::info!("Using OstrichDB at {}", builder.base());
    let http = OstrichHttpClient::with_timeout(options.timeout())?;
    Ok(OstrichClient::with_executor(builder, http))
}

/// Fill in names from the config where the command line left them out
fn resolve_identifier(
    config: &Config,
    collection: Option<String>,
    cluster: Option<String>,
    record: Option<String>,
) -> Result<ResourceIdentifier> {
    let collection = collection
        .or_else(|| config.collection.clone())
        .context("No collection given. Pass one or run 'ostc use --collection <NAME>'")?;

    Ok(ResourceIdentifier::try_new(collection, cluster, record)?)
}

/// Record parameters for the verb; the configured type only fills in for
/// verbs that send one, so lenient and strict mode see the same request
fn record_params(
    config: &Config,
    verb: &str,
    record_type: Option<&str>,
    value: Option<String>,
) -> RecordParams {
    let sends_type = verb
        .parse::<Verb>()
        .map(Verb::takes_record_params)
        .unwrap_or(false);

    let record_type = if sends_type {
        Some(config.effective_record_type(record_type))
    } else {
        record_type.map(str::to_string)
    };

    RecordParams { record_type, value }
}

fn report(level: ResourceLevel, verb: &str, response: &Response) -> ExitCode {
    println!(
        "{} Request On {} Response Status: {}",
        verb.to_uppercase(),
        level.display_name(),
        response.status
    );

    if !response.is_success() {
        let text = response.text();
        if !text.is_empty() {
            eprintln!("{}", text);
        }
        return ExitCode::FAILURE;
    }

    let payload = response.payload_text();
    if !payload.is_empty() {
        println!("Received data from OstrichDB: {}", payload);
    }
    ExitCode::SUCCESS
}

/// Layer the names given to `ostc use` over the loaded config
fn apply_defaults(
    mut config: Config,
    base_url: Option<&str>,
    collection: &Option<String>,
    cluster: &Option<String>,
    record: &Option<String>,
    record_type: &Option<String>,
) -> Result<Config> {
    if let Some(base_url) = base_url {
        config.base_url = Some(config.effective_base_url(Some(base_url))?);
    }
    if collection.is_some() {
        config.collection = collection.clone();
    }
    if cluster.is_some() {
        config.cluster = cluster.clone();
    }
    if record.is_some() {
        config.record = record.clone();
    }
    if record_type.is_some() {
        config.record_type = record_type.clone();
    }

    Ok(config)
}
