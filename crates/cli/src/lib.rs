use anyhow::Context;
use clap::{Parser, ValueEnum};
use jslint::{interpreter::DEFAULT_INTERPRETER, jslint, Engine, Interpreter, LintOutcome, LintRequest, OptionsBlob};
use serde::Serialize;
use std::{
  io::{self, Write},
  path::{Path, PathBuf},
  process::ExitCode,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JSLINT_LOG";
const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Exit code for runs that never got as far as a report.
pub const FAILURE_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "jslint", version, about = "Run JSLint over JavaScript files")]
struct Args {
  /// Options object handed to JSLINT verbatim, e.g. "{bitwise: false}"
  #[arg(long, value_name = "LITERAL", allow_hyphen_values = true)]
  options: Option<String>,

  /// Engine source; defaults to fulljslint.js next to this binary
  #[arg(long, env = "JSLINT_ENGINE", value_name = "PATH")]
  engine: Option<PathBuf>,

  /// Interpreter that runs the generated script from stdin
  #[arg(long, env = "JSLINT_INTERPRETER", default_value = DEFAULT_INTERPRETER)]
  interpreter: String,

  #[arg(short, long, value_enum, env = "JSLINT_FORMAT", default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Also fail when the interpreter itself exits unsuccessfully
  #[arg(long)]
  check_status: bool,

  #[arg(short, long)]
  verbose: bool,

  /// JavaScript files or glob patterns; flags must come before the first one
  #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
  files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  /// The engine's report, unchanged
  Text,
  Json,
}

pub async fn run(arguments: Vec<String>) -> ExitCode {
  let args = Args::parse_from(arguments);
  init_tracing(args.verbose);

  match lint(&args).await {
    Ok(code) => ExitCode::from(code),
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::from(FAILURE_EXIT_CODE)
    }
  }
}

fn init_tracing(verbose: bool) {
  let fallback = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .try_init();
}

async fn lint(args: &Args) -> anyhow::Result<u8> {
  let request = LintRequest {
    files: expand_inputs(&args.files),
    options: OptionsBlob::from(args.options.clone()),
    engine_path: args.engine.clone().unwrap_or_else(Engine::default_path),
    interpreter: Interpreter::new(&args.interpreter),
  };
  tracing::debug!(files = ?request.files, engine = %request.engine_path.display(), "starting lint run");

  let outcome = jslint(&request).await?;
  outcome
    .output(args.format, &request.files)
    .context("failed to write report")?;

  let mut code = outcome.exit_code();
  if args.check_status && !outcome.status.success() {
    code = 1;
  }
  Ok(code)
}

/// Replaces glob patterns with the files they match, keeping argument
/// order. An existing file is always taken as named, even when its name
/// looks like a pattern; patterns that match nothing are passed on as
/// plain paths.
pub fn expand_inputs(inputs: &[String]) -> Vec<String> {
  let mut files = Vec::with_capacity(inputs.len());
  for input in inputs {
    if !input.contains(GLOB_CHARS) || Path::new(input).is_file() {
      files.push(input.clone());
      continue;
    }

    let matches: Vec<String> = match glob::glob(input) {
      Ok(paths) => paths
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .map(|path| path.to_string_lossy().into_owned())
        .collect(),
      Err(err) => {
        tracing::debug!(pattern = %input, %err, "not a valid glob, using it as a path");
        Vec::new()
      }
    };

    if matches.is_empty() {
      files.push(input.clone());
    } else {
      files.extend(matches);
    }
  }
  files
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
  clean: bool,
  diagnostics: Vec<jslint::Diagnostic>,
  #[serde(skip_serializing_if = "Option::is_none")]
  unparsed: Option<&'a str>,
}

pub trait ReportOutput {
  fn output(&self, format: OutputFormat, files: &[String]) -> anyhow::Result<()>;
}

impl ReportOutput for LintOutcome {
  fn output(&self, format: OutputFormat, files: &[String]) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
      OutputFormat::Text => stdout.write_all(&self.output)?,
      OutputFormat::Json => {
        let text = self.output_text();
        let diagnostics = self.diagnostics(files);
        let report = JsonReport {
          clean: self.is_clean(),
          unparsed: (diagnostics.is_empty() && !self.is_clean()).then_some(&*text),
          diagnostics,
        };
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
      }
    }
    stdout.flush()?;
    Ok(())
  }
}
