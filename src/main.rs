//! # Ticktale Main Entry Point
//!
//! Loads the map and name pools, builds the initial world and runs a console
//! session on stdin/stdout.

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use ticktale::{
    default_start, describe_surroundings, load_map, load_name_pools, run_session, write_block,
    Direction, GameConfig, Position, SharedWorld, TicktaleError, TicktaleResult, WorldState,
};
use tokio::io::BufReader;
use tokio::sync::Mutex;

/// Command line arguments for Ticktale.
#[derive(Parser, Debug)]
#[command(name = "ticktale")]
#[command(about = "A console text adventure where the monsters keep moving while you think")]
#[command(version)]
struct Args {
    /// Map file, one row of glyphs per line
    map: PathBuf,

    /// File of monster name prefixes, one per line
    #[arg(long)]
    prefixes: Option<PathBuf>,

    /// File of monster base names, one per line
    #[arg(long)]
    names: Option<PathBuf>,

    /// Starting column of the player
    #[arg(long)]
    start_x: Option<i32>,

    /// Starting row of the player
    #[arg(long)]
    start_y: Option<i32>,

    /// Direction the player initially faces
    #[arg(long, default_value = "north")]
    facing: Direction,

    /// Random seed for monster spawning and movement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds between background frames
    #[arg(long)]
    tick_ms: Option<u64>,

    /// JSON engine configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace, or module=level directives)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> TicktaleResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Ticktale v{}", ticktale::VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    #[cfg(feature = "dev-tools")]
    let result = {
        use tracing::Instrument;
        let span = tracing::info_span!("session", map = %args.map.display());
        runtime.block_on(run_game(args).instrument(span))
    };
    #[cfg(not(feature = "dev-tools"))]
    let result = runtime.block_on(run_game(args));

    // A stdin read still pending on a blocking thread cannot be cancelled.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

/// Loads the world and plays one session on stdin/stdout.
async fn run_game(args: Args) -> TicktaleResult<()> {
    let config = build_config(&args)?;
    let state = build_world(&args).await?;

    let output = Arc::new(Mutex::new(tokio::io::stdout()));
    write_block(
        &output,
        &format!(
            "Welcome to Ticktale. Type `look` to see around you, `quit` to leave.\n\n{}",
            describe_surroundings(&state, config.sight_radius)
        ),
    )
    .await?;

    let world = SharedWorld::new(state);
    run_session(
        world.clone(),
        &config,
        BufReader::new(tokio::io::stdin()),
        output,
    )
    .await?;

    let statistics = world.snapshot().await.statistics;
    info!(
        "Session over after {} frames, {} steps, {} monsters seen",
        statistics.frames_elapsed, statistics.steps_taken, statistics.monsters_spawned
    );
    Ok(())
}

/// Initializes the logging backend. Log output goes to stderr so stdout only
/// carries game text.
fn initialize_logging(log_level: &str) -> TicktaleResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(log_level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|err| TicktaleError::InvalidConfig(format!("logging: {}", err)))?;
        tracing::debug!(filter = log_level, "Tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .target(env_logger::Target::Stderr)
            .try_init()
            .map_err(|err| TicktaleError::InvalidConfig(format!("logging: {}", err)))?;
    }

    Ok(())
}

/// Config file first, then command line overrides.
fn build_config(args: &Args) -> TicktaleResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::new(),
    };
    if let Some(tick_ms) = args.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    config.validate()?;
    Ok(config)
}

async fn build_world(args: &Args) -> TicktaleResult<WorldState> {
    let map = load_map(&args.map).await?;
    let pools = load_name_pools(args.prefixes.as_deref(), args.names.as_deref()).await?;

    let start = match (args.start_x, args.start_y) {
        (Some(x), Some(y)) => Position::new(x, y),
        (None, None) => default_start(&map).ok_or_else(|| {
            TicktaleError::InvalidState("the map has no passable cell to start on".to_string())
        })?,
        _ => {
            return Err(TicktaleError::InvalidConfig(
                "--start-x and --start-y must be given together".to_string(),
            ))
        }
    };

    let seed = args.seed.unwrap_or(ticktale::config::DEFAULT_SEED);
    info!("Starting at {} facing {} with seed {}", start, args.facing, seed);
    WorldState::new(map, start, args.facing, pools, seed)
}
