use std::time::Instant;

use clap::Parser;
use mazerun::{
    app::default_budget,
    generators::GenerationStatus,
    logging,
    session::Session,
    solvers::{SearchStatus, Solver},
};

/// Carve and solve mazes without a terminal, for timing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in nodes
    #[arg(long, default_value_t = u8::MAX as u16)]
    width: u16,

    /// Maze height in nodes
    #[arg(long, default_value_t = u8::MAX as u16)]
    height: u16,

    /// Number of mazes to run
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Operations per step call
    #[arg(long)]
    budget: Option<usize>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    logging::init_stderr_logging();
    let budget = args
        .budget
        .unwrap_or_else(|| default_budget(args.width, args.height))
        .max(1);

    let mut session = Session::new(args.width, args.height, args.seed)?;
    for iteration in 0..args.iterations {
        if iteration > 0 {
            session.regenerate()?;
        }
        let start = Instant::now();
        while session.step_generation(budget) == GenerationStatus::InProgress {}
        tracing::info!(
            "[profile] iteration {}: carved {}x{} in {:?}",
            iteration,
            args.width,
            args.height,
            start.elapsed()
        );

        for solver in Solver::AUTOMATED {
            session.start_search(solver)?;
            let report = loop {
                if let SearchStatus::Completed(report) = session.step_search(budget)? {
                    break report;
                }
            };
            tracing::info!(
                "[profile] iteration {}: {} explored {} nodes",
                iteration,
                solver,
                report.nodes_explored
            );
            println!("{report}");
        }
        session.reset_search();
    }
    Ok(())
}
