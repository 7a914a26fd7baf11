use crate::{engine::Engine, options::OptionsBlob, package::SourceFile};

const OPTIONS_PLACEHOLDER: &str = "{options}";

/// Reporting routine appended after the engine. It prints every
/// diagnostic as `<file> <line>: <message>` followed by a blank line;
/// errors also carry their evidence line.
pub const REPORT_SHIM: &str = r#"
var JSLINT_OPTIONS = {options};

var jslintOneFile = function (fileName, fileContents) {
    var data, i, item;

    JSLINT(fileContents, JSLINT_OPTIONS);
    data = JSLINT.data();

    for (i = 0; data.errors && i < data.errors.length; i += 1) {
        item = data.errors[i];
        if (item) {
            print(fileName + " " + item.line + ": " + item.reason);
            print(item.evidence);
            print("");
        }
    }
    for (i = 0; data.implieds && i < data.implieds.length; i += 1) {
        item = data.implieds[i];
        if (item) {
            print(fileName + " " + item.line + ": implied global '" + item.name + "'");
            print("");
        }
    }
    for (i = 0; data.unused && i < data.unused.length; i += 1) {
        item = data.unused[i];
        if (item) {
            print(fileName + " " + item.line + ": unused variable '" + item.name + "'");
            print("");
        }
    }
};
"#;

pub fn report_shim(options: &OptionsBlob) -> String {
  REPORT_SHIM.replacen(OPTIONS_PLACEHOLDER, options.as_script(), 1)
}

/// A complete script: engine, shim, then one invocation per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
  pub text: String,
}

impl Program {
  pub fn assemble(engine: &Engine, options: &OptionsBlob, files: &[SourceFile]) -> Self {
    let shim = report_shim(options);
    let mut text = String::with_capacity(
      engine.source.len()
        + shim.len()
        + files.iter().map(|f| f.path.len() + f.contents.len() + 32).sum::<usize>(),
    );

    text.push_str(&engine.source);
    text.push_str(&shim);
    for file in files {
      text.push_str(&file.invocation());
    }

    tracing::debug!(files = files.len(), bytes = text.len(), "assembled program");
    Self { text }
  }

  pub fn as_bytes(&self) -> &[u8] {
    self.text.as_bytes()
  }
}
