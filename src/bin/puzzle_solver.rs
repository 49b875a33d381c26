use anyhow::{Context, Result};
use clap::Parser;
use colorslide_solver::heuristics::Heuristic;
use colorslide_solver::solver::{solve, Algorithm, SearchReport, Solution, SolverConfig};
use colorslide_solver::utils::{load_puzzle, moves_to_string};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the initial board file (n x n grid, one row per line)
    initial: PathBuf,

    /// Path to the goal file ((n-2) x (n-2) interior colors)
    goal: PathBuf,

    /// Search algorithm: astar or ida
    #[clap(short, long, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,

    /// Heuristic: manhattan or misplaced
    #[clap(short = 'H', long, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Longest solution to consider
    #[clap(short, long)]
    depth_limit: Option<u32>,

    /// Print every intermediate board
    #[clap(short, long)]
    show_path: bool,
}

fn print_solution(solution: &Solution) {
    for (i, (mv, window)) in solution.moves.iter().zip(solution.path.windows(2)).enumerate() {
        // The tile that slid now occupies the previous black block cell.
        let slid = window[0].blank_index();
        println!("Move {}: {}", i + 1, mv);
        println!("{}\n", window[1].to_string_with_highlight(Some(slid)));
    }
}

fn print_report(report: &SearchReport, show_path: bool) {
    let stats = &report.stats;
    match &report.solution {
        Some(solution) => {
            println!("Solution found in {} moves: {}", solution.len(), moves_to_string(&solution.moves));
            if let Some(threshold) = solution.threshold {
                println!("Final threshold: {}", threshold);
            }
            if show_path {
                println!();
                print_solution(solution);
            } else {
                println!("Final board state:\n{}\n", solution.final_board());
            }
        }
        None => println!("No solution found.\n"),
    }
    println!(
        "Expanded: {}, generated: {}, max open: {}",
        stats.expanded, stats.generated, stats.max_open
    );
    if !stats.thresholds.is_empty() {
        println!("Thresholds: {:?}", stats.thresholds);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let puzzle = load_puzzle(&args.initial, &args.goal).with_context(|| {
        format!(
            "failed to load puzzle from {} and {}",
            args.initial.display(),
            args.goal.display()
        )
    })?;
    info!("Loaded {}x{} board from {}", puzzle.initial().size(), puzzle.initial().size(), args.initial.display());
    println!("Initial board state:\n{}\n", puzzle.initial());

    let config = SolverConfig {
        algorithm: args.algorithm,
        heuristic: args.heuristic,
        depth_limit: args.depth_limit,
    };
    println!(
        "Searching with {} and the {} heuristic{}...\n",
        config.algorithm,
        config.heuristic,
        config.depth_limit.map(|d| format!(", depth limit {}", d)).unwrap_or_default()
    );

    let report = solve(&puzzle, &config);
    print_report(&report, args.show_path);
    Ok(())
}
