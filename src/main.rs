use clap::Parser;
use keyconf::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
