//! Per-query engine session
//!
//! [`EngineSession::compute_best_move`] runs the whole exchange with one
//! short-lived engine process: handshake, position upload, a time-bounded
//! best-move search, and a second independent time-bounded evaluation pass.
//! The two passes are separate searches and can disagree under time
//! pressure; that is accepted, not papered over. Worst-case wall time per
//! query is therefore about twice the time budget.
//!
//! Exactly one engine process is alive per query. It is never pooled, never
//! reused, and it is released on every exit path: gracefully when the
//! protocol completes, by kill-on-drop when anything fails partway.

use crate::core::EngineSettings;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::score::{Evaluation, UNKNOWN_DISPLAY};
use crate::engine::uci::UciProcess;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, FromSetup, Setup};
use tracing::{debug, info};

/// One best-move request: a position snapshot and a time budget
#[derive(Debug, Clone)]
pub struct EngineQuery {
    pub setup: Setup,
    /// Seconds per search pass; non-positive values take the configured default
    pub time_budget_secs: f64,
}

impl EngineQuery {
    pub fn new(setup: Setup, time_budget_secs: f64) -> Self {
        Self {
            setup,
            time_budget_secs,
        }
    }
}

/// The engine's answer for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMoveResult {
    /// Coordinate notation, e.g. `e2e4` or `a7a8q`
    pub uci: String,
    /// Standard algebraic notation, or a dash when it cannot be derived
    pub san: String,
    /// White-relative display evaluation from the second search pass
    pub evaluation: Evaluation,
}

/// Outcome of a best-move query
///
/// `NoLegalMove` is informational (checkmate or stalemate reached), not an
/// error; the engine process has still been torn down when it is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestMoveOutcome {
    Best(BestMoveResult),
    NoLegalMove,
}

/// Last `score` pair seen in a search pass, still unparsed
type RawScore = (String, String);

/// Engine-query subsystem: spawns one process per call
#[derive(Debug, Clone)]
pub struct EngineSession {
    settings: EngineSettings,
}

impl EngineSession {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Query the engine for a best move and an evaluation
    ///
    /// Runs the protocol described in the module docs. All failures after a
    /// successful spawn tear the process down on the way out; spawn failure
    /// itself means there is nothing to tear down.
    pub fn compute_best_move(&self, query: &EngineQuery) -> EngineResult<BestMoveOutcome> {
        let budget = if query.time_budget_secs > 0.0 {
            query.time_budget_secs
        } else {
            self.settings.effective_default_budget()
        };
        let movetime_ms = (budget * 1000.0).round().max(1.0) as u64;
        let fen = Fen(query.setup.clone()).to_string();

        info!(
            "[ENGINE] Best-move query: {:?} to move, {}ms per pass",
            query.setup.turn, movetime_ms
        );

        let mut engine = UciProcess::spawn(&self.settings.engine_path)?;
        engine.handshake()?;
        engine.send("ucinewgame")?;
        engine.send(&format!("position fen {fen}"))?;

        // First pass: the move.
        engine.send(&format!("go movetime {movetime_ms}"))?;
        let (best, _) = read_search_pass(&mut engine)?;
        let Some(best) = best else {
            info!("[ENGINE] No legal move available (checkmate or stalemate)");
            engine.shutdown();
            return Ok(BestMoveOutcome::NoLegalMove);
        };

        // Second pass: an independent evaluation of the same position. It
        // may disagree with the move above under time pressure.
        engine.send(&format!("go movetime {movetime_ms}"))?;
        let (_, raw_score) = read_search_pass(&mut engine)?;
        engine.shutdown();

        let evaluation = raw_score
            .map(|(kind, value)| Evaluation::from_uci_score(&kind, &value, query.setup.turn))
            .unwrap_or(Evaluation::Unknown);
        let san = format_san(&query.setup, &best);

        info!(
            "[ENGINE] Best move {} ({}), eval {}",
            san, best, evaluation
        );
        Ok(BestMoveOutcome::Best(BestMoveResult {
            uci: best,
            san,
            evaluation,
        }))
    }
}

/// Drain one `go` command's output
///
/// Returns the best-move token (already filtered for the "no move" markers)
/// and the last raw score pair seen in the info stream.
fn read_search_pass(engine: &mut UciProcess) -> EngineResult<(Option<String>, Option<RawScore>)> {
    let mut last_score: Option<RawScore> = None;
    loop {
        let Some(line) = engine.read_line()? else {
            return Err(EngineError::Protocol {
                message: "engine closed its pipe mid-search".to_string(),
            });
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.first() {
            Some(&"info") => {
                if let Some(i) = tokens.iter().position(|&t| t == "score") {
                    if let (Some(kind), Some(value)) = (tokens.get(i + 1), tokens.get(i + 2)) {
                        last_score = Some((kind.to_string(), value.to_string()));
                    }
                }
            }
            Some(&"bestmove") => {
                let best = tokens
                    .get(1)
                    .filter(|&&m| m != "(none)" && m != "0000")
                    .map(|m| m.to_string());
                debug!("[ENGINE] Search pass done, bestmove {:?}", best);
                return Ok((best, last_score));
            }
            _ => {}
        }
    }
}

/// Render a coordinate move in algebraic notation, dash on any failure
fn format_san(setup: &Setup, uci: &str) -> String {
    let Ok(pos) = Chess::from_setup(setup.clone(), CastlingMode::Standard) else {
        return UNKNOWN_DISPLAY.to_string();
    };
    let Ok(uci_move) = uci.parse::<UciMove>() else {
        return UNKNOWN_DISPLAY.to_string();
    };
    match uci_move.to_move(&pos) {
        Ok(m) => San::from_move(&pos, &m).to_string(),
        Err(_) => UNKNOWN_DISPLAY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_san_for_a_normal_move() {
        //! e2e4 from the start renders as "e4"
        let setup = Setup::default();
        assert_eq!(format_san(&setup, "e2e4"), "e4");
    }

    #[test]
    fn test_format_san_falls_back_to_dash() {
        //! Unresolvable moves and unbuildable setups render as the dash
        let setup = Setup::default();
        assert_eq!(format_san(&setup, "e2e5"), UNKNOWN_DISPLAY);
        assert_eq!(format_san(&setup, "zzz"), UNKNOWN_DISPLAY);
        assert_eq!(format_san(&Setup::empty(), "e2e4"), UNKNOWN_DISPLAY);
    }
}
