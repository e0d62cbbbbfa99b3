//! Engine session integration tests
//!
//! Runs [`EngineSession`] against a substitute engine double: a small shell
//! script that speaks just enough UCI and appends `start`/`go`/`quit` marks
//! to a log file, so the tests can observe process lifecycle from the
//! outside. Each test gets its own script and log.

#![cfg(unix)]

use clickchess::core::EngineSettings;
use clickchess::editor::BoardEditor;
use clickchess::engine::{BestMoveOutcome, EngineError, EngineQuery, EngineSession, Evaluation};
use shakmaty::fen::Fen;
use shakmaty::Setup;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// Checkmate delivered by black (fool's mate); white has no legal moves
const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct EngineDouble {
    script: PathBuf,
    log: PathBuf,
}

impl EngineDouble {
    /// Write a scripted UCI engine whose `go` handler runs `go_response`
    fn new(name: &str, go_response: &str) -> Self {
        init_tracing();
        let dir = std::env::temp_dir().join(format!("clickchess-it-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create test dir");
        let script = dir.join(format!("{name}.sh"));
        let log = dir.join(format!("{name}.log"));
        let _ = fs::remove_file(&log);

        let body = format!(
            "#!/bin/sh\n\
             echo start >> \"{log}\"\n\
             while read line; do\n\
               case \"$line\" in\n\
                 uci) echo \"id name EngineDouble\"; echo uciok ;;\n\
                 isready) echo readyok ;;\n\
                 go*) echo \"$line\" >> \"{log}\"; {go_response} ;;\n\
                 quit) echo quit >> \"{log}\"; exit 0 ;;\n\
               esac\n\
             done\n",
            log = log.display(),
            go_response = go_response,
        );
        fs::write(&script, body).expect("write engine double");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
        Self { script, log }
    }

    fn session(&self, default_budget: f64) -> EngineSession {
        EngineSession::new(EngineSettings {
            engine_path: self.script.clone(),
            default_time_budget_secs: default_budget,
        })
    }

    fn log_lines(&self, mark: &str) -> usize {
        let contents = fs::read_to_string(&self.log).unwrap_or_default();
        contents.lines().filter(|l| l.starts_with(mark)).count()
    }
}

fn setup_from_fen(fen: &str) -> Setup {
    fen.parse::<Fen>().expect("test FEN").into_setup()
}

#[test]
fn test_best_move_on_the_starting_position() {
    //! The double answers e2e4 at cp 34; the session reports move, SAN and
    //! a white-relative evaluation.
    let double = EngineDouble::new(
        "cp_start",
        "echo \"info depth 10 score cp 34 pv e2e4\"; echo \"bestmove e2e4\"",
    );
    let session = double.session(0.25);

    let query = EngineQuery::new(Setup::default(), 0.1);
    let outcome = session.compute_best_move(&query).expect("query failed");
    let BestMoveOutcome::Best(result) = outcome else {
        panic!("expected a best move");
    };
    assert_eq!(result.uci, "e2e4");
    assert_eq!(result.san, "e4");
    assert_eq!(result.evaluation, Evaluation::Centipawn(34));
    assert_eq!(result.evaluation.display(), "0.34");
}

#[test]
fn test_process_started_and_quit_exactly_once_per_query() {
    //! One query means one spawn, two search passes, one graceful quit
    let double = EngineDouble::new(
        "lifecycle",
        "echo \"info depth 1 score cp 0\"; echo \"bestmove e2e4\"",
    );
    let session = double.session(0.25);

    let query = EngineQuery::new(Setup::default(), 0.1);
    session.compute_best_move(&query).expect("query failed");

    assert_eq!(double.log_lines("start"), 1, "engine spawned more than once");
    assert_eq!(double.log_lines("go"), 2, "expected two search passes");
    assert_eq!(double.log_lines("quit"), 1, "engine not shut down exactly once");
}

#[test]
fn test_checkmate_returns_no_legal_move_with_clean_teardown() {
    //! `bestmove (none)` becomes NoLegalMove; the process is still started
    //! once and torn down once, after a single search pass.
    let double = EngineDouble::new("mated", "echo \"bestmove (none)\"");
    let session = double.session(0.25);

    let query = EngineQuery::new(setup_from_fen(FOOLS_MATE), 0.1);
    let outcome = session.compute_best_move(&query).expect("query failed");
    assert_eq!(outcome, BestMoveOutcome::NoLegalMove);

    assert_eq!(double.log_lines("start"), 1);
    assert_eq!(double.log_lines("go"), 1, "no evaluation pass after (none)");
    assert_eq!(double.log_lines("quit"), 1);
}

#[test]
fn test_black_to_move_centipawns_are_negated() {
    //! cp 34 with black to move is -0.34 from white's point of view
    let double = EngineDouble::new(
        "black_pov",
        "echo \"info depth 8 score cp 34\"; echo \"bestmove e7e5\"",
    );
    let session = double.session(0.25);

    let after_e4 = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    let query = EngineQuery::new(setup_from_fen(after_e4), 0.1);
    let BestMoveOutcome::Best(result) = session.compute_best_move(&query).unwrap() else {
        panic!("expected a best move");
    };
    assert_eq!(result.evaluation, Evaluation::Centipawn(-34));
    assert_eq!(result.san, "e5");
}

#[test]
fn test_mate_score_is_reported_as_mate_in() {
    //! `score mate 3` surfaces as MateIn(3) and displays accordingly
    let double = EngineDouble::new(
        "mate_score",
        "echo \"info depth 12 score mate 3\"; echo \"bestmove e2e4\"",
    );
    let session = double.session(0.25);

    let query = EngineQuery::new(Setup::default(), 0.1);
    let BestMoveOutcome::Best(result) = session.compute_best_move(&query).unwrap() else {
        panic!("expected a best move");
    };
    assert_eq!(result.evaluation, Evaluation::MateIn(3));
    assert_eq!(result.evaluation.display(), "Mate in 3");
}

#[test]
fn test_garbled_score_degrades_to_unknown() {
    //! A score the session cannot parse becomes Unknown, never an error
    let double = EngineDouble::new(
        "garbled",
        "echo \"info depth 2 score wibble 9\"; echo \"bestmove e2e4\"",
    );
    let session = double.session(0.25);

    let query = EngineQuery::new(Setup::default(), 0.1);
    let BestMoveOutcome::Best(result) = session.compute_best_move(&query).unwrap() else {
        panic!("expected a best move");
    };
    assert_eq!(result.evaluation, Evaluation::Unknown);
    assert_eq!(result.evaluation.display(), "\u{2014}");
}

#[test]
fn test_non_positive_budget_takes_the_configured_default() {
    //! A zero budget is replaced by the settings default before the protocol
    let double = EngineDouble::new(
        "budget",
        "echo \"info depth 1 score cp 1\"; echo \"bestmove e2e4\"",
    );
    let session = double.session(0.5);

    let query = EngineQuery::new(Setup::default(), 0.0);
    session.compute_best_move(&query).expect("query failed");

    let log = fs::read_to_string(&double.log).unwrap();
    assert!(
        log.contains("go movetime 500"),
        "expected the 0.5s default budget, log was:\n{log}"
    );
}

#[test]
fn test_missing_engine_is_unavailable_and_harmless() {
    //! Spawn failure surfaces as EngineUnavailable and leaves the editor as-is
    let session = EngineSession::new(EngineSettings {
        engine_path: PathBuf::from("/no/such/engine"),
        default_time_budget_secs: 0.25,
    });
    let mut editor = BoardEditor::new();
    let before = editor.board().fen();

    let err = editor.request_best_move(&session, 0.1).unwrap_err();
    assert!(matches!(err, EngineError::Unavailable { .. }));
    assert_eq!(editor.board().fen(), before);
    assert!(editor.analysis().is_none());
}

#[test]
fn test_editor_caches_then_invalidates_analysis() {
    //! A successful query is cached for display; the next committed move
    //! clears it. Applying the cached move pushes it onto the board first.
    let double = EngineDouble::new(
        "cache",
        "echo \"info depth 9 score cp 21\"; echo \"bestmove e2e4\"",
    );
    let session = double.session(0.25);

    let mut editor = BoardEditor::new();
    let outcome = editor.request_best_move(&session, 0.1).expect("query failed");
    assert!(matches!(outcome, BestMoveOutcome::Best(_)));
    assert_eq!(editor.analysis().unwrap().uci, "e2e4");

    assert!(editor.apply_best_move());
    assert!(editor.analysis().is_none());
    assert!(editor.board().piece_at("e4".parse().unwrap()).is_some());

    // Cache again, then invalidate by clicking a move.
    editor.reset();
    editor.request_best_move(&session, 0.1).expect("query failed");
    assert!(editor.analysis().is_some());
    editor.click_square("e2".parse().unwrap());
    editor.click_square("e4".parse().unwrap());
    assert!(editor.analysis().is_none());
}
