use std::fs;

use crate::error::{Error, Result};

/// Name of the reporting routine each packaged file is handed to.
pub const REPORT_FUNCTION: &str = "jslintOneFile";

/// Escapes `text` so it can sit between double quotes in a script.
///
/// Backslashes go first: every later step inserts a backslash of its own,
/// which must not be doubled again. U+2028 and U+2029 end a string
/// literal in pre-ES2019 engines, so they are escaped too.
pub fn escape_literal(text: &str) -> String {
  text
    .replace('\\', "\\\\")
    .replace('"', "\\\"")
    .replace('\n', "\\n")
    .replace('\r', "\\r")
    .replace('\u{2028}', "\\u2028")
    .replace('\u{2029}', "\\u2029")
}

pub fn quote_literal(text: &str) -> String {
  format!("\"{}\"", escape_literal(text))
}

/// A file read for one packaging pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
  pub path: String,
  pub contents: String,
}

impl SourceFile {
  pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      contents: contents.into(),
    }
  }

  pub fn read(path: &str) -> Result<Self> {
    let bytes = fs::read(path).map_err(|source| Error::ReadSource {
      path: path.to_string(),
      source,
    })?;

    let contents = match String::from_utf8(bytes) {
      Ok(contents) => contents,
      Err(err) => {
        tracing::warn!(path, "source is not valid UTF-8, decoding lossily");
        String::from_utf8_lossy(err.as_bytes()).into_owned()
      }
    };

    tracing::debug!(path, bytes = contents.len(), "read source file");
    Ok(Self::new(path, contents))
  }

  /// The statement that lints this file, terminated by a newline.
  pub fn invocation(&self) -> String {
    format!(
      "{}({}, {});\n",
      REPORT_FUNCTION,
      quote_literal(&self.path),
      quote_literal(&self.contents)
    )
  }
}
