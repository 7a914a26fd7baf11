use std::{path::PathBuf, process::ExitStatus};

pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod options;
pub mod package;
pub mod program;

pub use diagnostic::{parse_diagnostics, Diagnostic, DiagnosticKind};
pub use engine::Engine;
pub use error::{Error, Result};
pub use interpreter::{Exchange, Interpreter};
pub use options::OptionsBlob;
pub use package::SourceFile;
pub use program::Program;

/// Everything needed for one lint run.
#[derive(Debug, Clone)]
pub struct LintRequest {
  pub files: Vec<String>,
  pub options: OptionsBlob,
  pub engine_path: PathBuf,
  pub interpreter: Interpreter,
}

impl LintRequest {
  pub fn new(files: Vec<String>) -> Self {
    Self {
      files,
      options: OptionsBlob::default(),
      engine_path: Engine::default_path(),
      interpreter: Interpreter::default(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct LintOutcome {
  pub output: Vec<u8>,
  pub status: ExitStatus,
}

impl LintOutcome {
  /// A run is clean when the engine printed nothing at all.
  pub fn is_clean(&self) -> bool {
    self.output.is_empty()
  }

  /// 0 for a clean run, 1 otherwise. The interpreter's own status does
  /// not take part.
  pub fn exit_code(&self) -> u8 {
    if self.is_clean() {
      0
    } else {
      1
    }
  }

  pub fn output_text(&self) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(&self.output)
  }

  pub fn diagnostics(&self, files: &[String]) -> Vec<Diagnostic> {
    parse_diagnostics(&self.output_text(), files)
  }
}

/// Lints `request.files` with the engine loaded from `request.engine_path`.
///
/// Every file is read before the interpreter starts; the first unreadable
/// one aborts the run.
pub async fn jslint(request: &LintRequest) -> Result<LintOutcome> {
  let engine = Engine::shared(&request.engine_path)?;
  lint_with(engine, request).await
}

/// Same as [`jslint`] with an engine the caller already holds.
pub async fn lint_with(engine: &Engine, request: &LintRequest) -> Result<LintOutcome> {
  let files = request
    .files
    .iter()
    .map(|path| SourceFile::read(path))
    .collect::<Result<Vec<_>>>()?;

  let program = Program::assemble(engine, &request.options, &files);
  let Exchange { output, status } = request.interpreter.exchange(program.as_bytes()).await?;

  if !status.success() {
    tracing::warn!(%status, "interpreter exited unsuccessfully");
  }
  Ok(LintOutcome { output, status })
}
