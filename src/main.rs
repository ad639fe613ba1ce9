use std::{path::PathBuf, time::Duration};

use clap::Parser;
use mazerun::{
    app::{App, AppConfig, default_budget},
    logging,
};

/// Generate and solve mazes in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in nodes
    #[arg(long, default_value_t = 30)]
    width: u16,

    /// Maze height in nodes
    #[arg(long, default_value_t = 20)]
    height: u16,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Generation merges or search steps per tick
    #[arg(long)]
    budget: Option<usize>,

    /// Tick length in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let _guard = logging::init_file_logging(&args.log_dir);

    let config = AppConfig {
        width: args.width,
        height: args.height,
        seed: args.seed,
        budget: args
            .budget
            .unwrap_or_else(|| default_budget(args.width, args.height))
            .max(1),
        tick: Duration::from_millis(args.tick_ms),
    };
    tracing::info!("[main] starting with {:?}", config);
    let mut app = App::new(config)?;

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    if let Err(err) = &result {
        tracing::error!("[main] exited with error: {}", err);
    }
    result
}
