//! Self-play game generation.
//!
//! Plays full isolation-knight games between two search configurations on
//! randomly generated boards and records each game. Games are independent:
//! every game owns its states, so they run in parallel without sharing
//! anything mutable.

use std::io::Write;
use std::time::Instant;

use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{BoardError, Cell, GameState, Grid, KnightBoard, Location, Player};
use crate::eval::Heuristic;
use crate::protocol::notation::encode_notation;
use crate::search::{search, SearchConfig, SearchError, Side};

/// Configuration for self-play game generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub rows: usize,
    pub cols: usize,
    /// Cells blocked at random before the first move.
    pub blocked: usize,
    /// Engine for player one (the maximizer).
    pub player_one: SearchConfig,
    /// Engine for player two (the minimizer).
    pub player_two: SearchConfig,
    /// Games still running after this many plies are recorded unfinished.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            rows: 7,
            cols: 7,
            blocked: 0,
            player_one: SearchConfig::bounded(Heuristic::Advanced, 3),
            player_two: SearchConfig::bounded(Heuristic::Base, 3),
            max_plies: 200,
            threads: 4,
            seed: 0,
        }
    }
}

impl SelfPlayConfig {
    fn engine_for(&self, player: Player) -> &SearchConfig {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }
}

/// Errors that abort self-play.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("a {rows}x{cols} board cannot hold two knights and {blocked} blocked cells")]
    BoardTooSmall {
        rows: usize,
        cols: usize,
        blocked: usize,
    },

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("game {game_id}: {source}")]
    Search {
        game_id: usize,
        #[source]
        source: SearchError,
    },

    #[error("game {game_id}: search returned no move at ply {ply}")]
    NoMove { game_id: usize, ply: usize },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Notation of the starting position.
    pub start: String,
    /// Destination of every move, in order. Player one moves first.
    pub moves: Vec<Location>,
    /// The player left with a move. None if the game hit `max_plies`.
    pub winner: Option<Player>,
    /// Total search nodes spent by both engines.
    pub nodes: u64,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Aggregate results over a batch of games.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SelfPlaySummary {
    pub games: usize,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub unfinished: usize,
    pub mean_plies: f64,
}

/// Places both knights and `config.blocked` blocked cells at random.
/// Player one moves first.
pub fn random_board(config: &SelfPlayConfig, rng: &mut SmallRng) -> Result<KnightBoard, SelfPlayError> {
    let mut grid = Grid::empty(config.rows, config.cols);
    let mut cells: Vec<Location> = grid.locations().collect();
    if cells.len() < config.blocked + 2 {
        return Err(SelfPlayError::BoardTooSmall {
            rows: config.rows,
            cols: config.cols,
            blocked: config.blocked,
        });
    }
    cells.shuffle(rng);

    for &loc in &cells[2..2 + config.blocked] {
        grid.set(loc, Cell::Blocked);
    }
    Ok(KnightBoard::new(grid, cells[0], cells[1], Player::One)?)
}

/// Plays one game from `start` to the end (or `max_plies`).
pub fn play_from(
    config: &SelfPlayConfig,
    game_id: usize,
    start: KnightBoard,
) -> Result<GameRecord, SelfPlayError> {
    let notation = encode_notation(&start);
    let mut state = start;
    let mut moves = Vec::new();
    let mut nodes = 0u64;
    let mut winner = None;

    while moves.len() < config.max_plies {
        let mover = state.current_player();
        if state.is_terminal() {
            winner = Some(mover.opponent());
            break;
        }
        let result = search(&state, config.engine_for(mover), Side::for_player(mover))
            .map_err(|source| SelfPlayError::Search { game_id, source })?;
        nodes += result.nodes;
        let next = result.best_move.ok_or(SelfPlayError::NoMove {
            game_id,
            ply: moves.len(),
        })?;
        moves.push(next.location(mover));
        state = next;
    }
    if winner.is_none() && state.is_terminal() {
        winner = Some(state.current_player().opponent());
    }

    Ok(GameRecord {
        game_id,
        start: notation,
        moves,
        winner,
        nodes,
    })
}

/// Plays one game on a fresh random board.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, SelfPlayError> {
    let start = random_board(config, rng)?;
    let game_start = Instant::now();
    let game = play_from(config, game_id, start)?;
    let outcome = match game.winner {
        Some(p) => format!("player {} wins", p.id()),
        None => "unfinished".to_string(),
    };
    info!(
        "Game {}/{}: {} after {} plies ({:.1}s)",
        game_id + 1,
        config.num_games,
        outcome,
        game.plies(),
        game_start.elapsed().as_secs_f64(),
    );
    Ok(game)
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs self-play generation, producing one record per game in game order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
/// With a nonzero seed the output is the same for any thread count.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads > 1 {
        run_self_play_parallel(config)
    } else {
        (0..config.num_games)
            .map(|i| play_game(config, i, &mut game_rng(config.seed, i)))
            .collect()
    }
}

fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| play_game(config, i, &mut game_rng(config.seed, i)))
            .collect()
    })
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> Result<(), SelfPlayError> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Tallies wins and game lengths.
pub fn summarize(games: &[GameRecord]) -> SelfPlaySummary {
    let mut summary = SelfPlaySummary {
        games: games.len(),
        ..SelfPlaySummary::default()
    };
    let mut total_plies = 0usize;
    for game in games {
        total_plies += game.plies();
        match game.winner {
            Some(Player::One) => summary.player_one_wins += 1,
            Some(Player::Two) => summary.player_two_wins += 1,
            None => summary.unfinished += 1,
        }
    }
    if !games.is_empty() {
        summary.mean_plies = total_plies as f64 / games.len() as f64;
    }
    summary
}

/// Logs a summary of self-play results.
pub fn log_summary(games: &[GameRecord]) {
    let s = summarize(games);
    info!("=== Self-Play Summary ===");
    info!("Games: {}", s.games);
    info!("Player one wins: {}", s.player_one_wins);
    info!("Player two wins: {}", s.player_two_wins);
    info!("Unfinished: {}", s.unfinished);
    info!("Mean plies: {:.1}", s.mean_plies);
}
