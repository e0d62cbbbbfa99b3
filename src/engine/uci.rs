//! Spawned UCI engine process
//!
//! [`UciProcess`] owns one engine child process for the duration of one
//! query: piped stdin/stdout, line-oriented send/receive, and teardown that
//! cannot be skipped. The graceful path is a `quit` handshake with a bounded
//! reap; if the engine ignores it, or if the session bails out early through
//! `?`, the `Drop` impl kills and reaps the child. Either way no process
//! outlives the query that spawned it.

use crate::engine::error::{EngineError, EngineResult};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// How long the graceful `quit` handshake may take before we kill
const QUIT_GRACE: Duration = Duration::from_millis(500);

/// Poll interval while waiting for a quitting engine to exit
const REAP_POLL: Duration = Duration::from_millis(10);

/// One engine child process with line-oriented pipes
#[derive(Debug)]
pub struct UciProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciProcess {
    /// Spawn the engine executable with piped stdio
    ///
    /// A missing or non-executable path surfaces as
    /// [`EngineError::Unavailable`]; there is no process to clean up in that
    /// case.
    pub fn spawn(path: &Path) -> EngineResult<Self> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Unavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| EngineError::Protocol {
            message: "engine stdin was not captured".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| EngineError::Protocol {
            message: "engine stdout was not captured".to_string(),
        })?;

        debug!("[ENGINE] Spawned engine process from {:?}", path);
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    /// Send one protocol line
    pub fn send(&mut self, line: &str) -> EngineResult<()> {
        trace!("[ENGINE] >> {}", line);
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read one protocol line; `None` means the engine closed its stdout
    pub fn read_line(&mut self) -> EngineResult<Option<String>> {
        let mut buf = String::new();
        if self.stdout.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let line = buf.trim_end().to_string();
        trace!("[ENGINE] << {}", line);
        Ok(Some(line))
    }

    /// Skip lines until an exact token line arrives
    pub fn expect(&mut self, token: &str) -> EngineResult<()> {
        loop {
            match self.read_line()? {
                Some(line) if line == token => return Ok(()),
                Some(_) => continue,
                None => {
                    return Err(EngineError::Protocol {
                        message: format!("engine closed its pipe before sending {token:?}"),
                    })
                }
            }
        }
    }

    /// The `uci`/`isready` initialization handshake
    pub fn handshake(&mut self) -> EngineResult<()> {
        self.send("uci")?;
        self.expect("uciok")?;
        self.send("isready")?;
        self.expect("readyok")?;
        Ok(())
    }

    /// Graceful shutdown: `quit`, then a bounded wait
    ///
    /// Consumes the handle. If the engine has not exited when the grace
    /// period runs out, the `Drop` impl takes over and kills it.
    pub fn shutdown(mut self) {
        if self.send("quit").is_err() {
            // Pipe already broken; Drop will kill.
            return;
        }
        let mut waited = Duration::ZERO;
        while waited < QUIT_GRACE {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    debug!("[ENGINE] Engine exited after quit: {}", status);
                    return;
                }
                Ok(None) => {
                    std::thread::sleep(REAP_POLL);
                    waited += REAP_POLL;
                }
                Err(e) => {
                    warn!("[ENGINE] try_wait failed during shutdown: {}", e);
                    return;
                }
            }
        }
        warn!("[ENGINE] Engine ignored quit; forcing termination");
    }
}

impl Drop for UciProcess {
    fn drop(&mut self) {
        // Already reaped by a successful shutdown?
        if matches!(self.child.try_wait(), Ok(Some(_))) {
            return;
        }
        if let Err(e) = self.child.kill() {
            warn!("[ENGINE] Failed to kill engine process: {}", e);
        }
        match self.child.wait() {
            Ok(status) => debug!("[ENGINE] Engine process reaped: {}", status),
            Err(e) => warn!("[ENGINE] Failed to reap engine process: {}", e),
        }
    }
}
