//! bridge::session — the engine session seam and its process transport.
//!
//! Purpose
//! -------
//! Define the narrow surface the bridge needs from an engine session —
//! evaluate a statement, call a named function with marshaled arguments, and
//! place a value in the engine workspace — and provide the default
//! implementation that drives the engine executable as a child process.
//!
//! Key behaviors
//! -------------
//! - [`EngineSession`] is the seam: the bridge is generic over it, tests
//!   substitute scripted sessions, and alternative transports implement it
//!   without touching the codec or the operations.
//! - [`ProcessSession`] spawns the engine binary (path from
//!   [`SessionConfig`], defaulting to the `PLS_ENGINE` environment variable)
//!   with piped stdio and exchanges one JSON request/response line per
//!   operation; [`EngineValue`] trees serialize directly as the payload.
//! - A remote error reply is surfaced verbatim as
//!   [`BridgeError::RemoteCall`]; a broken pipe or unparseable reply is a
//!   [`BridgeError::Transport`].
//!
//! Invariants & assumptions
//! ------------------------
//! - One session per bridge; sessions are not pooled or shared across
//!   threads. Calls block for the duration of the remote work, with no
//!   timeout or cancellation — a caller wanting cancellation must kill the
//!   session externally.
//! - The engine process is best-effort terminated on drop.
//!
//! Conventions
//! -----------
//! - Wire lines are newline-delimited JSON; exactly one reply line per
//!   request line.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the wire-format serialization of requests and the
//!   parsing of ok/error replies, without spawning a process. The spawn
//!   failure path is covered with a nonexistent binary path.
use std::{
    env,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    bridge::errors::{BridgeError, BridgeResult},
    codec::value::EngineValue,
};

/// Environment variable naming the engine executable.
pub const ENGINE_PATH_VAR: &str = "PLS_ENGINE";

/// EngineSession — the operations the bridge needs from an engine.
///
/// Implementations must be synchronous and blocking; the bridge performs no
/// internal concurrency.
pub trait EngineSession {
    /// Evaluate a statement in the engine, discarding any value.
    fn eval(&mut self, code: &str) -> BridgeResult<()>;

    /// Call a named engine function with marshaled arguments and return its
    /// single result value.
    fn feval(&mut self, name: &str, args: &[EngineValue]) -> BridgeResult<EngineValue>;

    /// Place a value in the engine workspace under `name`.
    fn put_variable(&mut self, name: &str, value: &EngineValue) -> BridgeResult<()>;
}

/// One request line of the session wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum WireRequest {
    Eval { code: String },
    Feval { name: String, args: Vec<EngineValue> },
    PutVariable { name: String, value: EngineValue },
}

/// One reply line of the session wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum WireReply {
    Ok { value: Option<EngineValue> },
    Error { message: String },
}

/// SessionConfig — how to reach the engine executable.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Path to the engine binary.
    pub engine_path: PathBuf,
    /// Extra command-line arguments passed at spawn.
    pub args: Vec<String>,
}

impl SessionConfig {
    /// Configuration pointing at an explicit binary, no extra arguments.
    pub fn new(engine_path: impl Into<PathBuf>) -> SessionConfig {
        SessionConfig { engine_path: engine_path.into(), args: Vec::new() }
    }

    /// Read the engine path from the `PLS_ENGINE` environment variable.
    pub fn from_env() -> BridgeResult<SessionConfig> {
        match env::var_os(ENGINE_PATH_VAR) {
            Some(path) => Ok(SessionConfig::new(PathBuf::from(path))),
            None => Err(BridgeError::EngineStart {
                reason: format!("{ENGINE_PATH_VAR} is not set and no engine path was given"),
            }),
        }
    }
}

/// ProcessSession — default [`EngineSession`] over a child process.
///
/// Spawns the engine binary with piped stdio and exchanges one JSON line per
/// request. The child is best-effort killed and reaped on drop.
pub struct ProcessSession {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ProcessSession {
    /// Start the engine process.
    ///
    /// Errors
    /// ------
    /// - `EngineStart` when the binary cannot be spawned or its stdio pipes
    ///   are unavailable.
    pub fn start(config: &SessionConfig) -> BridgeResult<ProcessSession> {
        debug!(engine = %config.engine_path.display(), "starting engine session");
        let mut child = Command::new(&config.engine_path)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BridgeError::EngineStart { reason: e.to_string() })?;

        let stdin = child.stdin.take().ok_or_else(|| BridgeError::EngineStart {
            reason: "engine stdin pipe unavailable".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| BridgeError::EngineStart {
            reason: "engine stdout pipe unavailable".to_string(),
        })?;

        Ok(ProcessSession { child, stdin, stdout: BufReader::new(stdout) })
    }

    fn round_trip(&mut self, operation: &str, request: &WireRequest) -> BridgeResult<WireReply> {
        let line = serde_json::to_string(request)
            .map_err(|e| BridgeError::Transport { detail: e.to_string() })?;
        writeln!(self.stdin, "{line}")
            .map_err(|e| BridgeError::Transport { detail: e.to_string() })?;
        self.stdin
            .flush()
            .map_err(|e| BridgeError::Transport { detail: e.to_string() })?;

        let mut reply_line = String::new();
        let read = self
            .stdout
            .read_line(&mut reply_line)
            .map_err(|e| BridgeError::Transport { detail: e.to_string() })?;
        if read == 0 {
            return Err(BridgeError::Transport {
                detail: format!("engine closed the channel during '{operation}'"),
            });
        }
        serde_json::from_str(&reply_line)
            .map_err(|e| BridgeError::Transport { detail: e.to_string() })
    }

    fn expect_ack(&mut self, operation: &str, request: &WireRequest) -> BridgeResult<()> {
        match self.round_trip(operation, request)? {
            WireReply::Ok { .. } => Ok(()),
            WireReply::Error { message } => {
                Err(BridgeError::RemoteCall { operation: operation.to_string(), message })
            }
        }
    }
}

impl EngineSession for ProcessSession {
    fn eval(&mut self, code: &str) -> BridgeResult<()> {
        self.expect_ack("eval", &WireRequest::Eval { code: code.to_string() })
    }

    fn feval(&mut self, name: &str, args: &[EngineValue]) -> BridgeResult<EngineValue> {
        debug!(function = name, args = args.len(), "remote call");
        let request = WireRequest::Feval { name: name.to_string(), args: args.to_vec() };
        match self.round_trip(name, &request)? {
            WireReply::Ok { value: Some(value) } => Ok(value),
            WireReply::Ok { value: None } => Err(BridgeError::Transport {
                detail: format!("'{name}' returned no value"),
            }),
            WireReply::Error { message } => {
                Err(BridgeError::RemoteCall { operation: name.to_string(), message })
            }
        }
    }

    fn put_variable(&mut self, name: &str, value: &EngineValue) -> BridgeResult<()> {
        let request =
            WireRequest::PutVariable { name: name.to_string(), value: value.clone() };
        self.expect_ack("put_variable", &request)
    }
}

impl Drop for ProcessSession {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
