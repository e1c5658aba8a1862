//! ExecResult: what every submitted line produces.
//!
//! Recoverable outcomes (unknown command, bad arity, missing file, permission
//! denial, wrong password, missing dependency) are [`CommandError`]s. The
//! kernel flattens them into an [`ExecResult`] so the caller only ever sees a
//! response string and the updated location.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted argument count of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub fn accepts(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// Recoverable, user-visible command failures. `Display` is the response text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("koopa: command not found: {0}")]
    CommandNotFound(String),
    #[error("{command}: wrong number of arguments (expected {expected}, got {got})")]
    WrongArgCount {
        command: String,
        expected: Arity,
        got: usize,
    },
    #[error("too many arguments")]
    TooManyArguments,
    #[error("no such file")]
    NoSuchFile,
    #[error("file not found")]
    FileNotFound,
    #[error("not a text file")]
    NotATextFile,
    #[error("not a directory")]
    NotADirectory,
    #[error("not executable")]
    NotExecutable,
    #[error("can only traverse to a directory")]
    CannotTraverse,
    #[error("permission denied")]
    PermissionDenied,
    #[error("say pretty please")]
    SayPlease,
    #[error("destination not found")]
    DestinationNotFound,
    #[error("destination must be a directory")]
    DestinationNotADirectory,
    #[error("source not found")]
    SourceNotFound,
    #[error("cannot relocate the root directory")]
    RelocateRoot,
    #[error("cannot relocate a directory into itself")]
    RelocateIntoSelf,
    #[error("permission denied: run {invocation} <password>")]
    WrongPassword { invocation: String },
    #[error("missing dependency: move {0} here first")]
    MissingDependency(String),
    #[error("unlock target not found: {0}")]
    UnlockTargetNotFound(String),
}

/// The result of one submitted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    /// 0 on success, 1 for a recoverable failure.
    pub code: i64,
    /// The response text shown to the player.
    pub out: String,
    /// Display path of the current directory after the line ran.
    pub cwd: String,
}

impl ExecResult {
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            cwd: String::new(),
        }
    }

    pub fn failure(err: &CommandError) -> Self {
        Self {
            code: 1,
            out: err.to_string(),
            cwd: String::new(),
        }
    }

    /// Attach the location indicator.
    pub fn at(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn ok(&self) -> bool {
        self.code == 0
    }
}

impl From<Result<String, CommandError>> for ExecResult {
    fn from(result: Result<String, CommandError>) -> Self {
        match result {
            Ok(out) => ExecResult::success(out),
            Err(err) => ExecResult::failure(&err),
        }
    }
}
