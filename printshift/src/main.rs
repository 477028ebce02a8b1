//! Main binary entry point for the printshift migration tool.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()`
//! function so the command line and the integration tests exercise identical
//! behavior.

use anyhow::Result;

fn main() -> Result<()> {
    let code = printshift::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
