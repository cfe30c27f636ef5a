use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use zentap_batch::{BatchRunner, IdentifierUniverse, JsonFileStore, RunnerConfig};
use zentap_client::{
    offline_reflection, ClientConfig, GenerationClient, ProviderClient, ProxyClient,
};
use zentap_core::{
    ContextSource, EnvironmentContext, FileIdentityStore, FixedContext, ReadingEngine, SystemClock,
};
use zentap_prompt::compose_reading_prompt;
use zentap_semantics::{JsonFileSource, LibraryCache};

#[derive(Parser)]
#[command(name = "zentap", about = "Deterministic hexagram readings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw one reading and print its interpretation
    Reveal(RevealArgs),

    /// Generate the pre-written output table offline
    Generate(GenerateArgs),
}

#[derive(Args)]
struct RevealArgs {
    /// Context string folded into the reading's seeds; defaults to a
    /// descriptor of the host environment
    #[arg(long)]
    context: Option<String>,

    /// Scene flavor; "base" always selects the plain template
    #[arg(long)]
    scene: Option<String>,

    /// Semantic library JSON document
    #[arg(long, default_value = "semantics.json")]
    semantics: PathBuf,

    /// Installation id file
    #[arg(long, default_value = ".zentap-id")]
    identity: PathBuf,

    /// Generation endpoint; when absent the canned reflection is printed
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Bearer key; with a key the endpoint is called as a chat-completion
    /// provider, without one as the `{prompt}` proxy
    #[arg(long, env = "API_KEY")]
    api_key: Option<String>,

    /// Model name passed to a direct provider endpoint
    #[arg(long, env = "MODEL", default_value = "gpt-4o-mini")]
    model: String,
}

#[derive(Args)]
struct GenerateArgs {
    /// Run over a truncated combination set or the full cross product
    #[arg(long, value_enum, default_value = "test")]
    mode: RunMode,

    /// Combination cap in test mode
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Maximum combinations generated concurrently
    #[arg(long, default_value_t = 6)]
    concurrency: usize,

    /// Public semantics JSON document defining the identifier universe
    #[arg(long, default_value = "public_semantics.json")]
    semantics: PathBuf,

    /// Output table path
    #[arg(long, default_value = "pregen_output.json")]
    output: PathBuf,

    /// Generation endpoint
    #[arg(long, env = "API_URL")]
    api_url: String,

    /// Bearer key for the generation endpoint
    #[arg(long, env = "API_KEY")]
    api_key: String,

    /// Model name
    #[arg(long, env = "MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Per-call timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum RunMode {
    /// Truncate the enumeration to `--count` combinations
    Test,
    /// Enumerate the whole cross product
    Full,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Reveal(args) => {
            if let Err(err) = handle_reveal(args).await {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
        Commands::Generate(args) => {
            if let Err(err) = handle_generate(args).await {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }
}

async fn handle_reveal(args: RevealArgs) -> anyhow::Result<()> {
    let context: Arc<dyn ContextSource> = match args.context {
        Some(value) => Arc::new(FixedContext::new(value)),
        None => Arc::new(EnvironmentContext),
    };
    let engine = ReadingEngine::new(
        Arc::new(SystemClock),
        context,
        Arc::new(FileIdentityStore::new(args.identity)),
    );
    let reading = engine.draw().context("could not draw a reading")?;

    let source = JsonFileSource::new(args.semantics);
    let cache = LibraryCache::new();
    let library = cache
        .get_or_load(&source)
        .await
        .map_err(|err| anyhow!("the semantic library could not be loaded ({err}); check the --semantics path and try again"))?;

    let prompt = compose_reading_prompt(&library, &reading, args.scene.as_deref());

    let text = match build_client(args.api_url, args.api_key, args.model)? {
        Some(client) => match client.generate(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "generation failed, falling back to the offline reflection");
                offline_reflection().to_string()
            }
        },
        None => offline_reflection().to_string(),
    };

    println!("hexagram  {}", reading.original_key);
    if reading.has_changes() {
        println!("becoming  {}", reading.derived_key);
    }
    println!();
    println!("{text}");
    Ok(())
}

fn build_client(
    api_url: Option<String>,
    api_key: Option<String>,
    model: String,
) -> anyhow::Result<Option<Arc<dyn GenerationClient>>> {
    let Some(api_url) = api_url else {
        return Ok(None);
    };
    let config = ClientConfig::new(api_url, model);
    let client: Arc<dyn GenerationClient> = match api_key {
        Some(key) => Arc::new(ProviderClient::new(config.with_api_key(key))?),
        None => Arc::new(ProxyClient::new(config)?),
    };
    Ok(Some(client))
}

async fn handle_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let universe = IdentifierUniverse::load_json(&args.semantics).await?;

    let config = ClientConfig::new(args.api_url, args.model)
        .with_api_key(args.api_key)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = Arc::new(ProviderClient::new(config)?);
    let store = Arc::new(JsonFileStore::new(args.output));

    let runner = BatchRunner::new(
        client,
        store,
        RunnerConfig {
            concurrency: args.concurrency,
            ..RunnerConfig::default()
        },
    );
    let limit = match args.mode {
        RunMode::Test => Some(args.count),
        RunMode::Full => None,
    };

    let summary = runner.run(&universe, limit).await?;
    println!(
        "generated {}  skipped {}  total {}",
        summary.generated, summary.skipped, summary.total
    );
    Ok(())
}
