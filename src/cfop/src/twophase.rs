use std::{
    fs,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    sync::{Mutex, PoisonError},
    thread::available_parallelism,
};

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::solver::{SolveError, Solver};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwophaseConfig {
    /// Name or path of the rob-twophase executable.
    pub binary: PathBuf,
    pub max_length: u32,
    /// Defaults to the available parallelism.
    pub threads: Option<usize>,
    /// Where rob-twophase writes its pruning tables.
    pub table_dir: Option<PathBuf>,
}

impl Default for TwophaseConfig {
    fn default() -> Self {
        TwophaseConfig {
            binary: PathBuf::from("twophase"),
            max_length: 30,
            threads: None,
            table_dir: None,
        }
    }
}

impl TwophaseConfig {
    fn table_dir(&self) -> PathBuf {
        self.table_dir.clone().unwrap_or_else(|| {
            let mut dir = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
            dir.push("rob-twophase-tables");
            dir
        })
    }

    fn threads(&self) -> usize {
        self.threads.unwrap_or_else(|| match available_parallelism() {
            Ok(v) => v.get(),
            Err(e) => {
                warn!("Failed to get available parallelism; defaulting to 1: {e}");
                1
            }
        })
    }
}

struct Session {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// A long running rob-twophase process. It is started on the first solve and
/// reused afterwards; a session that fails is thrown away and restarted on
/// the next call.
pub struct TwophaseProcess {
    config: TwophaseConfig,
    session: Mutex<Option<Session>>,
}

impl TwophaseProcess {
    #[must_use]
    pub fn new(config: TwophaseConfig) -> Self {
        TwophaseProcess {
            config,
            session: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TwophaseConfig {
        &self.config
    }

    fn spawn(&self) -> Result<Session, SolveError> {
        let tables = self.config.table_dir();
        fs::create_dir_all(&tables)?;

        debug!(
            "Starting {} with tables in {}",
            self.config.binary.display(),
            tables.display()
        );

        let mut child = Command::new(&self.config.binary)
            .current_dir(tables)
            .args(["-c", "-m"])
            .arg(self.config.max_length.to_string())
            .arg("-t")
            .arg(self.config.threads().to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            child.kill()?;
            return Err(SolveError::SolverExited);
        };

        Ok(Session {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }
}

impl Session {
    fn read_line(&mut self) -> Result<String, SolveError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(SolveError::SolverExited);
        }
        Ok(line)
    }

    /*
    A session looks like

    ```
    Loading tables ...
    Done. 0.518s

    Ready!
    solve LBDLULDDURDRRRFRURBFFRFBFRDLDBDDBDFBBULRLFFBUFLUUBUULL
    30.177ms
    R F2 R' U R U2 F2 U2 F' D' R D2 L2 D2 L' U2 F2 (17)
    Ready!
    ```
    */
    fn solve(&mut self, facelets: &str) -> Result<String, SolveError> {
        while self.read_line()? != "Ready!\n" {}

        writeln!(self.stdin, "solve {facelets}")?;

        // Skips the timing line
        let line = loop {
            let line = self.read_line()?;
            if !line.trim_end().ends_with("ms") {
                break line;
            }
        };

        if line.starts_with("Error") {
            return Err(SolveError::Rejected(line.trim_end().to_owned()));
        }

        Ok(strip_move_count(&line))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!("rob-twophase already gone: {e}");
        }
        if let Err(e) = self.child.wait() {
            warn!("Could not reap rob-twophase: {e}");
        }
    }
}

/// Drops the parentheses, newline and the trailing `(N)` move count.
fn strip_move_count(line: &str) -> String {
    line.replace(['(', ')', '\n'], "")
        .split(' ')
        .filter(|v| v.chars().next().is_some_and(|v| !v.is_ascii_digit()))
        .join(" ")
}

impl Solver for TwophaseProcess {
    fn solve(&self, facelets: &str) -> Result<String, SolveError> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);

        if session.is_none() {
            *session = Some(self.spawn()?);
        }
        let Some(active) = session.as_mut() else {
            return Err(SolveError::SolverExited);
        };

        let result = active.solve(facelets);
        if matches!(result, Err(SolveError::Io(_) | SolveError::SolverExited)) {
            *session = None;
        }
        result
    }
}
