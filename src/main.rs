//! infragraph - Terraform resource dependency diagrams

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = infragraph::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
