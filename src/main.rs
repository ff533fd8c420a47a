//! Gtkpack - installer-asset packager for GTK applications.
//!
//! This binary stages the runtime libraries, compiled settings schemas and
//! locale catalogs an application needs at load time, then hands the result
//! to an external installer compiler.

use gtkpack::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
