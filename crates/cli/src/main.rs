use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
  jslint_cli::run(std::env::args().collect()).await
}
