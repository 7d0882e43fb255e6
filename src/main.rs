//! depviz - Render a package's dependency tree with Graphviz

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = depviz_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
