//! Command line interface for the packager.

mod args;

pub use args::Args;

use crate::error::{CliError, Result};
use crate::packager::Packager;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    let settings = args.into_settings()?;
    let packager = Packager::new(settings);

    match packager.run().await {
        Ok(artifact) => {
            if let Some(artifact) = artifact {
                println!("{}", artifact.display());
            }
            Ok(0)
        }
        Err(e) => {
            // Stage failures carry the literal failing command; surface it
            // on stderr and exit 1 so scripts can rely on the status.
            eprintln!("Error: {}", e);
            Ok(1)
        }
    }
}
