use anyhow::{Context, Result};
use clap::Parser;
use colorslide_solver::engine::{Board, Move, Tile};
use colorslide_solver::goal::Goal;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board side; n*n - 1 must be divisible by 6 (e.g. 5, 7, 11)
    #[clap(short, long, default_value_t = 5)]
    size: usize,

    /// Seed for the random board and the scramble
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Random moves between the initial board and the goal
    #[clap(long, default_value_t = 20)]
    scramble: usize,

    /// Where to write the initial board
    initial: PathBuf,

    /// Where to write the goal interior
    goal: PathBuf,
}

/// Slides the black block straight down to the bottom row, so the board's
/// interior is free of it.
fn park_blank(mut board: Board) -> Result<(Board, Vec<Move>)> {
    let mut moves = Vec::new();
    while board.blank_index() / board.size() < board.size() - 1 {
        board = board.apply_move(Move::Up)?;
        moves.push(Move::Up);
    }
    Ok((board, moves))
}

fn goal_to_plain_string(goal: &Goal) -> String {
    goal.tiles()
        .chunks(goal.geometry().interior_side())
        .map(|row| row.iter().map(Tile::to_char).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let initial = Board::new_random_with_seed(args.size, args.seed)
        .with_context(|| format!("cannot generate a balanced {}x{} board", args.size, args.size))?;
    let mut rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1));
    let (scrambled, mut moves) = initial.scramble(args.scramble, &mut rng);
    let (target, parking) = park_blank(scrambled)?;
    moves.extend(parking);
    let goal = Goal::from_board(&target)?;
    info!("Goal is {} moves away from the initial board", moves.len());

    fs::write(&args.initial, format!("{}\n", initial.to_plain_string()))
        .with_context(|| format!("failed to write {}", args.initial.display()))?;
    fs::write(&args.goal, format!("{}\n", goal_to_plain_string(&goal)))
        .with_context(|| format!("failed to write {}", args.goal.display()))?;

    println!("Initial board ({}):\n{}\n", args.initial.display(), initial);
    println!("Target board:\n{}\n", target);
    println!("Goal interior written to {}", args.goal.display());
    Ok(())
}
