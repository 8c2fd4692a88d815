//! ColorGrid - Command-line editor for 4x4 color grids and their order codes

use std::process::ExitCode;

use colorgrid::cli;

fn main() -> ExitCode {
    cli::run()
}
