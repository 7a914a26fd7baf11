use once_cell::sync::OnceCell;
use std::{
  env, fs,
  path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// File name the engine is shipped under, next to the binary.
pub const ENGINE_FILE_NAME: &str = "fulljslint.js";

static ENGINE: OnceCell<Engine> = OnceCell::new();

/// Source text of the bundled analysis engine. It defines `JSLINT`.
#[derive(Debug, Clone)]
pub struct Engine {
  pub path: PathBuf,
  pub source: String,
}

impl Engine {
  pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      source: source.into(),
    }
  }

  pub fn load(path: &Path) -> Result<Self> {
    let source = fs::read_to_string(path).map_err(|source| Error::ReadEngine {
      path: path.to_path_buf(),
      source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "loaded engine");
    Ok(Self::new(path, source))
  }

  /// Loads the engine once per process. Later calls return the first
  /// instance whatever path they pass.
  pub fn shared(path: &Path) -> Result<&'static Engine> {
    ENGINE.get_or_try_init(|| Self::load(path))
  }

  pub fn default_path() -> PathBuf {
    env::current_exe()
      .ok()
      .and_then(|exe| exe.parent().map(|dir| dir.join(ENGINE_FILE_NAME)))
      .unwrap_or_else(|| PathBuf::from(ENGINE_FILE_NAME))
  }
}
