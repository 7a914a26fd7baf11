use std::{
  io::{self, Read},
  process::{ExitStatus, Stdio},
};
use tokio::{io::AsyncWriteExt, process::Command};

use crate::error::{Error, Result};

/// Interpreter looked up on `PATH` when none is configured.
pub const DEFAULT_INTERPRETER: &str = "js";

/// What came back from one run of the interpreter.
#[derive(Debug, Clone)]
pub struct Exchange {
  /// stdout and stderr, interleaved as the child wrote them.
  pub output: Vec<u8>,
  pub status: ExitStatus,
}

/// External script interpreter that reads a program on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
  pub program: String,
  pub args: Vec<String>,
}

impl Default for Interpreter {
  fn default() -> Self {
    Self::new(DEFAULT_INTERPRETER)
  }
}

impl Interpreter {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  fn io_error(&self, source: io::Error) -> Error {
    Error::Exchange {
      program: self.program.clone(),
      source,
    }
  }

  /// Feeds `script` to a fresh child and collects everything it prints.
  ///
  /// The whole script is written and stdin closed before the child is
  /// awaited. Output is drained on a blocking thread meanwhile, so a child
  /// that prints a lot before reading all of its input cannot stall us.
  pub async fn exchange(&self, script: &[u8]) -> Result<Exchange> {
    let (mut reader, writer) = io::pipe().map_err(|e| self.io_error(e))?;
    let writer_for_stderr = writer.try_clone().map_err(|e| self.io_error(e))?;

    // Both output streams share one pipe, so the child has no separate
    // error stream that could be left unread.
    let mut command = Command::new(&self.program);
    command
      .args(&self.args)
      .stdin(Stdio::piped())
      .stdout(writer)
      .stderr(writer_for_stderr)
      .kill_on_drop(true);

    tracing::debug!(program = %self.program, args = ?self.args, "spawning interpreter");
    let mut child = command.spawn().map_err(|source| Error::Spawn {
      program: self.program.clone(),
      source,
    })?;
    // The command keeps its own copies of the write end alive; the reader
    // only sees EOF once they are gone.
    drop(command);

    let drain = tokio::task::spawn_blocking(move || {
      let mut output = Vec::new();
      reader.read_to_end(&mut output).map(|_| output)
    });

    if let Some(mut stdin) = child.stdin.take() {
      match stdin.write_all(script).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
          tracing::debug!(program = %self.program, "interpreter closed stdin early");
        }
        Err(e) => return Err(self.io_error(e)),
      }
      drop(stdin);
    }

    let status = child.wait().await.map_err(|e| self.io_error(e))?;
    let output = drain
      .await
      .map_err(|e| self.io_error(io::Error::other(e)))?
      .map_err(|e| self.io_error(e))?;

    tracing::debug!(
      program = %self.program,
      bytes = output.len(),
      %status,
      "interpreter finished"
    );
    Ok(Exchange { output, status })
  }
}
