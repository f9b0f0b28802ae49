use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use codecracker_hints::HintRequest;
use codecracker_protocol::{
    schema_bundle, serialize_json, serialize_json_pretty, ErrorEnvelope, GenerateHintsReport,
    GenerateHintsResponse, ERROR_INTERNAL, ERROR_INVALID_REQUEST,
};
use codecracker_vector_store::{RequestCache, SharedSimilarityCache};
use engine::EngineArgs;
use http_api::HttpState;
use std::sync::Arc;

mod demo;
mod engine;
mod http_api;

#[derive(Parser)]
#[command(name = "codecracker")]
#[command(about = "Codenames hint generator over word embeddings", long_about = None)]
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
}

#[derive(Subcommand)]
enum Commands {
    /// Generate hints for one board and print them as JSON
    Hints(HintsArgs),

    /// Deal a random board from the classic word set and show its hints
    Demo(DemoArgs),

    /// Serve hint generation over HTTP (POST/GET /generate-hints)
    #[command(name = "serve-http")]
    ServeHttp(ServeArgs),

    /// Print the JSON schemas of the wire types
    Schema(SchemaArgs),
}

#[derive(Args)]
struct HintsArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Team words, comma-separated
    #[arg(long, value_delimiter = ',')]
    team: Vec<String>,

    /// Opponent words, comma-separated
    #[arg(long, value_delimiter = ',')]
    opponent: Vec<String>,

    /// Neutral words, comma-separated
    #[arg(long, value_delimiter = ',')]
    neutral: Vec<String>,

    /// The assassin word
    #[arg(long)]
    assassin: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Include generation statistics in the output
    #[arg(long)]
    stats: bool,
}

#[derive(Args)]
struct DemoArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Seed for a reproducible deal
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Bind address, e.g. 127.0.0.1:5000
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: String,

    /// Similarity pairs cached across requests (0 disables the shared cache)
    #[arg(long, default_value_t = 100_000)]
    shared_cache_capacity: usize,

    /// Reject boards with more team words than this
    #[arg(long, default_value_t = 9)]
    max_team_words: usize,
}

#[derive(Args)]
struct SchemaArgs {
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = matches!(cli.command, Commands::Hints(_) | Commands::Schema(_));
    if json_output && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Hints(args) => run_hints(args)?,
        Commands::Demo(args) => run_demo(args)?,
        Commands::ServeHttp(args) => serve_http(args).await?,
        Commands::Schema(args) => run_schema(args)?,
    }

    Ok(())
}

fn run_hints(args: HintsArgs) -> Result<()> {
    let generator = args.engine.build()?;
    let mut request = HintRequest::new(args.team).opponents(args.opponent).neutrals(args.neutral);
    request.assassin_word = args.assassin;

    let report = match generator.generate_with_cache(&request, RequestCache::new()) {
        Ok(report) => report,
        Err(err) => {
            let code = if err.is_invalid_input() {
                ERROR_INVALID_REQUEST
            } else {
                ERROR_INTERNAL
            };
            println!("{}", serialize_json(&ErrorEnvelope::new(code, err.to_string()))?);
            return Err(err).context("Hint generation failed");
        }
    };

    let output = if args.stats {
        render_json(&GenerateHintsReport::from(&report), args.pretty)?
    } else {
        render_json(&GenerateHintsResponse::from(&report.hints), args.pretty)?
    };
    println!("{output}");
    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<()> {
    let generator = args.engine.build()?;
    let request = demo::deal(args.seed);
    let hints = generator
        .generate(&request)
        .context("Hint generation failed")?;
    print!("{}", demo::render(&request, &hints));
    Ok(())
}

async fn serve_http(args: ServeArgs) -> Result<()> {
    let generator = args
        .engine
        .build()?
        .with_max_team_words(args.max_team_words);
    let shared_cache = SharedSimilarityCache::with_capacity(args.shared_cache_capacity);
    match &shared_cache {
        Some(cache) => log::info!("Shared similarity cache: {} pairs", cache.capacity()),
        None => log::info!("Shared similarity cache disabled"),
    }

    let state = Arc::new(HttpState {
        generator,
        shared_cache,
    });
    let app = http_api::router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    println!("Serving hints on http://{}/generate-hints", args.bind);
    axum::serve(listener, app).await?;
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<()> {
    println!("{}", render_json(&schema_bundle()?, args.pretty)?);
    Ok(())
}

fn render_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serialize_json_pretty(value)
    } else {
        serialize_json(value)
    }
}
