use std::fmt;

/// Token the engine reads as "no configuration given".
pub const UNSPECIFIED_OPTIONS: &str = "undefined";

/// Engine configuration, passed through to the script untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OptionsBlob {
  #[default]
  Unspecified,
  Literal(String),
}

impl OptionsBlob {
  pub fn as_script(&self) -> &str {
    match self {
      Self::Unspecified => UNSPECIFIED_OPTIONS,
      Self::Literal(text) => text,
    }
  }
}

impl From<Option<String>> for OptionsBlob {
  fn from(value: Option<String>) -> Self {
    value.map_or(Self::Unspecified, Self::Literal)
  }
}

impl fmt::Display for OptionsBlob {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_script())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unspecified_is_the_engine_sentinel() {
    assert_eq!(OptionsBlob::default().as_script(), "undefined");
    assert_eq!(OptionsBlob::from(None).as_script(), "undefined");
  }

  #[test]
  fn literal_is_verbatim() {
    let blob = OptionsBlob::from(Some("{bitwise: false, \"x\": [1]}".to_string()));
    assert_eq!(blob.to_string(), "{bitwise: false, \"x\": [1]}");
  }
}
