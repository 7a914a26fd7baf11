use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read source file `{path}`")]
  ReadSource {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to read engine source `{}`", path.display())]
  ReadEngine {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to launch interpreter `{program}`")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("i/o error while talking to interpreter `{program}`")]
  Exchange {
    program: String,
    #[source]
    source: io::Error,
  },
}
