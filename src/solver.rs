use crate::engine::{Board, Move, Tile};
use crate::error::{Error, Result};
use crate::goal::Goal;
use crate::heuristics::Heuristic;
use crate::node::{FrontierEntry, NodeArena, NodeId, SearchNode};
use log::{debug, info, trace};
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::str::FromStr;

/// An initial board paired with the goal for its interior.
#[derive(Clone, Debug)]
pub struct Puzzle {
    initial: Board,
    goal: Goal,
}

impl Puzzle {
    /// # Errors
    /// Any error from `Goal::new` for the board's size (wrong tile count,
    /// black block in the goal).
    pub fn new(initial: Board, goal_tiles: Vec<Tile>) -> Result<Self> {
        let goal = Goal::new(initial.size(), goal_tiles)?;
        Ok(Puzzle { initial, goal })
    }

    /// # Errors
    /// `Error::GoalSizeMismatch` if `goal` was built for another board size.
    pub fn with_goal(initial: Board, goal: Goal) -> Result<Self> {
        if goal.geometry().size() != initial.size() {
            let side = initial.size().saturating_sub(2);
            return Err(Error::GoalSizeMismatch {
                side,
                expected: side * side,
                found: goal.tiles().len(),
            });
        }
        Ok(Puzzle { initial, goal })
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }
}

/// Which search drives the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Best-first graph search with a closed set.
    AStar,
    /// Iterative-deepening A*: repeated depth-first passes under a rising
    /// cost threshold, no closed set.
    IdaStar,
}

pub const ALGORITHMS: [Algorithm; 2] = [Algorithm::AStar, Algorithm::IdaStar];

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::AStar => write!(f, "astar"),
            Algorithm::IdaStar => write!(f, "ida"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Algorithm::AStar),
            "ida" | "ida*" | "idastar" => Ok(Algorithm::IdaStar),
            _ => Err(Error::ParseOption {
                option: "algorithm",
                input: s.to_string(),
                expected: "astar, ida",
            }),
        }
    }
}

/// Solver settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    /// Maximum solution length to consider. `None` searches without bound; IDA*
    /// then never terminates on an unsolvable puzzle.
    pub depth_limit: Option<u32>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            algorithm: Algorithm::AStar,
            heuristic: Heuristic::Manhattan,
            depth_limit: None,
        }
    }
}

/// Represents a solution found by the solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Moves from the initial board to the goal, in play order.
    pub moves: Vec<Move>,
    /// Every board along the way, initial and final included
    /// (`moves.len() + 1` entries).
    pub path: Vec<Board>,
    /// Threshold of the IDA* iteration that found the goal. `None` for A*.
    pub threshold: Option<u32>,
}

impl Solution {
    fn from_arena(arena: &NodeArena, terminal: NodeId, threshold: Option<u32>) -> Self {
        Solution {
            moves: arena.moves_to(terminal),
            path: arena.boards_to(terminal),
            threshold,
        }
    }

    /// The board that satisfies the goal.
    pub fn final_board(&self) -> &Board {
        // A solution path always holds at least the initial board.
        &self.path[self.path.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Counters collected during a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose children were generated.
    pub expanded: usize,
    /// Nodes created, the root(s) included.
    pub generated: usize,
    /// Largest open-set size seen (A* only).
    pub max_open: usize,
    /// Threshold of every IDA* iteration, in order (empty for A*).
    pub thresholds: Vec<u32>,
}

/// Outcome of a search. `solution` is `None` when the reachable space (within
/// the depth limit) holds no goal board; that is a normal result.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub solution: Option<Solution>,
    pub stats: SearchStats,
}

/// Hooks invoked while a search runs.
pub trait SearchObserver {
    /// Called once for every node before its children are generated.
    fn on_expand(&mut self, _node: &SearchNode) {}
    /// Called at the start of every IDA* iteration.
    fn on_threshold(&mut self, _threshold: u32) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Solves `puzzle` with the algorithm and heuristic chosen in `config`.
pub fn solve(puzzle: &Puzzle, config: &SolverConfig) -> SearchReport {
    match config.algorithm {
        Algorithm::AStar => solve_astar(puzzle, config.heuristic, config.depth_limit),
        Algorithm::IdaStar => solve_ida_star(puzzle, config.heuristic, config.depth_limit),
    }
}

/// Solves the puzzle with A* graph search.
pub fn solve_astar(puzzle: &Puzzle, heuristic: Heuristic, depth_limit: Option<u32>) -> SearchReport {
    solve_astar_with_observer(puzzle, heuristic, depth_limit, &mut NoopObserver)
}

/// A* with a permanent closed set.
///
/// The cheapest open node is popped; if its interior matches the goal it is
/// returned. Otherwise its board is closed and every legal child whose board
/// is not closed is pushed. A board is closed the first time it is expanded
/// and never reopened, even if a cheaper path to it turns up later.
pub fn solve_astar_with_observer(
    puzzle: &Puzzle,
    heuristic: Heuristic,
    depth_limit: Option<u32>,
    observer: &mut impl SearchObserver,
) -> SearchReport {
    let goal = puzzle.goal();
    let mut stats = SearchStats::default();
    let mut arena = NodeArena::new();
    let mut open = BinaryHeap::new();
    let mut closed: HashSet<Board> = HashSet::new();
    let mut sequence: u64 = 0;

    info!("A* search with {} heuristic", heuristic);

    let root = SearchNode::root(puzzle.initial().clone(), heuristic.evaluate(puzzle.initial(), goal));
    let root_cost = root.cost;
    let root_id = arena.push(root);
    open.push(FrontierEntry {
        cost: root_cost,
        sequence,
        node: root_id,
    });
    stats.generated = 1;
    stats.max_open = 1;

    while let Some(entry) = open.pop() {
        let node = arena.get(entry.node);

        if goal.is_satisfied_by(&node.board) {
            let solution = Solution::from_arena(&arena, entry.node, None);
            info!(
                "A* found a {}-move solution: {} expanded, {} generated",
                solution.len(),
                stats.expanded,
                stats.generated
            );
            return SearchReport {
                solution: Some(solution),
                stats,
            };
        }

        // Duplicates of an already expanded board may still sit in the open set.
        if !closed.insert(node.board.clone()) {
            continue;
        }
        stats.expanded += 1;
        observer.on_expand(node);
        trace!("expanding node {} (depth {}, cost {})", entry.node, node.depth, node.cost);

        if depth_limit.is_some_and(|limit| node.depth >= limit) {
            continue;
        }

        let children: Vec<SearchNode> = node
            .board
            .legal_moves()
            .filter_map(|mv| {
                let board = node.board.successor(mv)?;
                if closed.contains(&board) {
                    return None;
                }
                let h = heuristic.evaluate(&board, goal);
                Some(SearchNode::child(entry.node, node, board, mv, h))
            })
            .collect();

        for child in children {
            sequence += 1;
            let cost = child.cost;
            let id = arena.push(child);
            open.push(FrontierEntry {
                cost,
                sequence,
                node: id,
            });
            stats.generated += 1;
        }
        stats.max_open = stats.max_open.max(open.len());
    }

    info!(
        "A* exhausted the search space: {} expanded, {} generated",
        stats.expanded, stats.generated
    );
    SearchReport {
        solution: None,
        stats,
    }
}

/// Solves the puzzle with IDA*.
pub fn solve_ida_star(puzzle: &Puzzle, heuristic: Heuristic, depth_limit: Option<u32>) -> SearchReport {
    solve_ida_star_with_observer(puzzle, heuristic, depth_limit, &mut NoopObserver)
}

/// Result of one depth-first pass below a node.
enum IdaStep {
    Found(NodeId),
    /// Smallest `f` that exceeded the threshold; `None` if nothing did.
    Pruned(Option<u32>),
}

/// IDA*: depth-first passes from a fresh root, each bounded by a threshold.
///
/// The first threshold is the root's heuristic value. A pass that fails
/// raises the threshold to the smallest cost that overflowed it; a pass where
/// nothing overflowed means no solution exists. There is no closed set, so
/// boards are revisited freely, and the arena only ever holds the current path.
pub fn solve_ida_star_with_observer(
    puzzle: &Puzzle,
    heuristic: Heuristic,
    depth_limit: Option<u32>,
    observer: &mut impl SearchObserver,
) -> SearchReport {
    let goal = puzzle.goal();
    let mut stats = SearchStats::default();
    let root_h = heuristic.evaluate(puzzle.initial(), goal);
    let mut threshold = root_h;

    info!("IDA* search with {} heuristic", heuristic);

    loop {
        stats.thresholds.push(threshold);
        observer.on_threshold(threshold);
        debug!(
            "IDA* iteration {} with threshold {} ({} expanded so far)",
            stats.thresholds.len(),
            threshold,
            stats.expanded
        );

        let mut arena = NodeArena::new();
        let root_id = arena.push(SearchNode::root(puzzle.initial().clone(), root_h));
        stats.generated += 1;

        let mut search = IdaSearch {
            goal,
            heuristic,
            depth_limit,
            arena: &mut arena,
            stats: &mut stats,
            observer: &mut *observer,
        };
        match search.search(root_id, threshold) {
            IdaStep::Found(terminal) => {
                let solution = Solution::from_arena(&arena, terminal, Some(threshold));
                info!(
                    "IDA* found a {}-move solution at threshold {}: {} expanded, {} generated",
                    solution.len(),
                    threshold,
                    stats.expanded,
                    stats.generated
                );
                return SearchReport {
                    solution: Some(solution),
                    stats,
                };
            }
            IdaStep::Pruned(None) => {
                info!(
                    "IDA* exhausted the search space: {} expanded, {} generated",
                    stats.expanded, stats.generated
                );
                return SearchReport {
                    solution: None,
                    stats,
                };
            }
            IdaStep::Pruned(Some(next)) => threshold = next,
        }
    }
}

struct IdaSearch<'a, O: SearchObserver> {
    goal: &'a Goal,
    heuristic: Heuristic,
    depth_limit: Option<u32>,
    arena: &'a mut NodeArena,
    stats: &'a mut SearchStats,
    observer: &'a mut O,
}

impl<O: SearchObserver> IdaSearch<'_, O> {
    fn search(&mut self, id: NodeId, threshold: u32) -> IdaStep {
        let node = self.arena.get(id);
        let f = node.cost;
        if f > threshold {
            return IdaStep::Pruned(Some(f));
        }
        if self.goal.is_satisfied_by(&node.board) {
            return IdaStep::Found(id);
        }
        if self.depth_limit.is_some_and(|limit| node.depth >= limit) {
            return IdaStep::Pruned(None);
        }

        self.stats.expanded += 1;
        self.observer.on_expand(node);

        let children: Vec<SearchNode> = node
            .board
            .legal_moves()
            .filter_map(|mv| {
                let board = node.board.successor(mv)?;
                let h = self.heuristic.evaluate(&board, self.goal);
                Some(SearchNode::child(id, node, board, mv, h))
            })
            .collect();

        let mark = self.arena.len();
        let mut min_overflow: Option<u32> = None;
        for child in children {
            self.stats.generated += 1;
            let child_id = self.arena.push(child);
            match self.search(child_id, threshold) {
                IdaStep::Found(terminal) => return IdaStep::Found(terminal),
                IdaStep::Pruned(Some(overflow)) => {
                    min_overflow = Some(min_overflow.map_or(overflow, |m| m.min(overflow)));
                }
                IdaStep::Pruned(None) => {}
            }
            self.arena.truncate(mark);
        }
        IdaStep::Pruned(min_overflow)
    }
}
