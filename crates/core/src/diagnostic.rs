use serde::Serialize;

const IMPLIED_GLOBAL: &str = "implied global '";
const UNUSED_VARIABLE: &str = "unused variable '";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
  Error,
  ImpliedGlobal,
  UnusedVariable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub file: String,
  pub line: u32,
  pub kind: DiagnosticKind,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub evidence: Option<String>,
}

impl Diagnostic {
  /// The identifier named by an implied-global or unused-variable report.
  pub fn name(&self) -> Option<&str> {
    let prefix = match self.kind {
      DiagnosticKind::ImpliedGlobal => IMPLIED_GLOBAL,
      DiagnosticKind::UnusedVariable => UNUSED_VARIABLE,
      DiagnosticKind::Error => return None,
    };
    self.message.strip_prefix(prefix)?.strip_suffix('\'')
  }
}

fn classify(message: &str) -> DiagnosticKind {
  if message.starts_with(IMPLIED_GLOBAL) && message.ends_with('\'') {
    DiagnosticKind::ImpliedGlobal
  } else if message.starts_with(UNUSED_VARIABLE) && message.ends_with('\'') {
    DiagnosticKind::UnusedVariable
  } else {
    DiagnosticKind::Error
  }
}

/// Splits `<file> <line>: <message>` for one of the known files. File
/// names may contain spaces, so the longest matching name wins.
fn parse_header<'a>(line: &'a str, files: &[String]) -> Option<(&'a str, u32, &'a str)> {
  files
    .iter()
    .filter_map(|file| {
      let rest = line.strip_prefix(file.as_str())?.strip_prefix(' ')?;
      let (number, message) = rest.split_once(": ")?;
      let number = number.parse().ok()?;
      Some((&line[..file.len()], number, message))
    })
    .max_by_key(|(file, _, _)| file.len())
}

/// Reads the engine's printed report back into diagnostics.
pub fn parse_diagnostics(output: &str, files: &[String]) -> Vec<Diagnostic> {
  let mut diagnostics = Vec::new();
  let mut lines = output.lines().peekable();

  while let Some(line) = lines.next() {
    let Some((file, number, message)) = parse_header(line, files) else {
      continue;
    };
    let kind = classify(message);

    let evidence = if kind == DiagnosticKind::Error {
      match lines.peek() {
        Some(next) if !next.is_empty() && parse_header(next, files).is_none() => {
          lines.next().map(str::to_string)
        }
        _ => None,
      }
    } else {
      None
    };

    diagnostics.push(Diagnostic {
      file: file.to_string(),
      line: number,
      kind,
      message: message.to_string(),
      evidence,
    });
  }

  diagnostics
}
