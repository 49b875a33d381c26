use anyhow::Result;
use colorslide_solver::engine::{Board, Move};
use colorslide_solver::goal::Goal;
use colorslide_solver::heuristics::HEURISTICS;
use colorslide_solver::solver::{solve, Puzzle, SolverConfig, ALGORITHMS};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 10;
const START_SEED: u64 = 0;
const BOARD_SIZE: usize = 5;
const SCRAMBLE_STEPS: usize = 10;

/// Builds a solvable puzzle: a random board, pushed so its black block leaves
/// the interior, supplies the goal; a scrambled copy of it is the start.
fn seeded_puzzle(seed: u64) -> Result<Puzzle> {
    let mut target = Board::new_random_with_seed(BOARD_SIZE, seed)?;
    while target.blank_index() / BOARD_SIZE < BOARD_SIZE - 1 {
        target = target.apply_move(Move::Up)?;
    }
    let goal = Goal::from_board(&target)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let (initial, _) = target.scramble(SCRAMBLE_STEPS, &mut rng);
    Ok(Puzzle::with_goal(initial, goal)?)
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_moves: usize,
    total_expanded: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let configs: Vec<SolverConfig> = ALGORITHMS
        .iter()
        .flat_map(|&algorithm| {
            HEURISTICS.iter().map(move |&heuristic| SolverConfig {
                algorithm,
                heuristic,
                depth_limit: None,
            })
        })
        .collect();
    let name = |config: &SolverConfig| format!("{}/{}", config.algorithm, config.heuristic);

    let mut tallies: HashMap<String, Tally> = HashMap::new();

    println!("Starting heuristic evaluation for {} boards...", NUM_RANDOM_BOARDS_FOR_EVALUATION);

    for board_idx in 0..NUM_RANDOM_BOARDS_FOR_EVALUATION {
        let current_seed = START_SEED + board_idx as u64;
        let puzzle = seeded_puzzle(current_seed)?;

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for config in &configs {
            let report = solve(&puzzle, config);
            let tally = tallies.entry(name(config)).or_default();
            match report.solution {
                Some(solution) => {
                    println!(
                        "  Config: {:<16}, Moves: {:<4}, Expanded: {}",
                        name(config),
                        solution.len(),
                        report.stats.expanded
                    );
                    tally.solved += 1;
                    tally.total_moves += solution.len();
                    tally.total_expanded += report.stats.expanded;
                }
                None => eprintln!(
                    "Warning: {} found no solution on board {} (Seed: {}), which was built to be solvable.",
                    name(config),
                    board_idx,
                    current_seed
                ),
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", NUM_RANDOM_BOARDS_FOR_EVALUATION);
    println!("\n--- Averages ---");

    let mut averages: Vec<(String, f64, f64)> = Vec::new();
    for (config_name, tally) in &tallies {
        if tally.solved == 0 {
            println!("Config {}: No solutions recorded.", config_name);
            continue;
        }
        let solved = tally.solved as f64;
        averages.push((
            config_name.clone(),
            tally.total_moves as f64 / solved,
            tally.total_expanded as f64 / solved,
        ));
    }

    // Fewest expansions first.
    averages.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    for (config_name, avg_moves, avg_expanded) in averages {
        println!(
            "Config {:<16}: Average Moves = {:.2}, Average Expanded = {:.2}",
            config_name, avg_moves, avg_expanded
        );
    }
    Ok(())
}
