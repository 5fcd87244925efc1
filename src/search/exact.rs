//! Exact search to terminal states.
//!
//! [`minimax_search`] visits the whole tree and serves as the reference
//! oracle; [`alphabeta_search`] carries an (alpha, beta) window and skips
//! subtrees that cannot change the result. Both return the same value for
//! every state. Ties go to the first child in generation order.

use log::debug;

use crate::board::GameState;

use super::{successors, SearchError, SearchResult, Side};

/// Node counter threaded through one search call.
#[derive(Default)]
struct Exact {
    nodes: u64,
}

impl Exact {
    fn minimax<S: GameState>(
        &mut self,
        state: &S,
        side: Side,
    ) -> Result<(f64, Option<S>), SearchError> {
        self.nodes += 1;
        if state.is_terminal() {
            return Ok((state.score(), None));
        }

        let mut value = side.worst();
        let mut best_move = None;
        for child in successors(state)? {
            let (child_value, _) = self.minimax(&child, side.opponent())?;
            if side.improves(child_value, value) {
                value = child_value;
                best_move = Some(child);
            }
        }
        Ok((value, best_move))
    }

    fn alphabeta<S: GameState>(
        &mut self,
        state: &S,
        side: Side,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<(f64, Option<S>), SearchError> {
        self.nodes += 1;
        if state.is_terminal() {
            return Ok((state.score(), None));
        }

        let mut value = side.worst();
        let mut best_move = None;
        for child in successors(state)? {
            let (child_value, _) = self.alphabeta(&child, side.opponent(), alpha, beta)?;
            if side.improves(child_value, value) {
                value = child_value;
                best_move = Some(child);
            }
            if side.tighten(value, &mut alpha, &mut beta) {
                // Cut off: only the value matters to the parent.
                return Ok((value, None));
            }
        }
        Ok((value, best_move))
    }
}

/// Unpruned minimax from `state` for `side`.
pub fn minimax_search<S: GameState>(state: &S, side: Side) -> Result<SearchResult<S>, SearchError> {
    let mut ctx = Exact::default();
    let (value, best_move) = ctx.minimax(state, side)?;
    debug!("minimax {:?}: value={} nodes={}", side, value, ctx.nodes);
    Ok(SearchResult {
        value,
        best_move,
        nodes: ctx.nodes,
    })
}

/// Unpruned search from the maximizing perspective.
pub fn maximin<S: GameState>(state: &S) -> Result<SearchResult<S>, SearchError> {
    minimax_search(state, Side::Max)
}

/// Unpruned search from the minimizing perspective.
pub fn minimax<S: GameState>(state: &S) -> Result<SearchResult<S>, SearchError> {
    minimax_search(state, Side::Min)
}

/// Alpha-beta search inside an explicit `(alpha, beta)` window.
///
/// If the window is cut off at the root, `best_move` is None and only the
/// value is meaningful.
pub fn alphabeta_within<S: GameState>(
    state: &S,
    side: Side,
    alpha: f64,
    beta: f64,
) -> Result<SearchResult<S>, SearchError> {
    let mut ctx = Exact::default();
    let (value, best_move) = ctx.alphabeta(state, side, alpha, beta)?;
    debug!(
        "alphabeta {:?} [{}, {}]: value={} nodes={}",
        side, alpha, beta, value, ctx.nodes
    );
    Ok(SearchResult {
        value,
        best_move,
        nodes: ctx.nodes,
    })
}

/// Alpha-beta search with the full window.
pub fn alphabeta_search<S: GameState>(
    state: &S,
    side: Side,
) -> Result<SearchResult<S>, SearchError> {
    alphabeta_within(state, side, f64::NEG_INFINITY, f64::INFINITY)
}

pub fn alphabeta_max<S: GameState>(state: &S) -> Result<SearchResult<S>, SearchError> {
    alphabeta_search(state, Side::Max)
}

pub fn alphabeta_min<S: GameState>(state: &S) -> Result<SearchResult<S>, SearchError> {
    alphabeta_search(state, Side::Min)
}
