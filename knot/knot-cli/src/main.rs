//! Celtic knot generator.
//!
//! Builds a knot from command-line flags or a saved settings file, prints
//! its statistics and exports it as a PLY mesh.
//!
//! # Commands
//!
//! - `celtic-knot generate` - Generate a knot, optionally exporting it
//! - `celtic-knot inspect <file>` - Print the header of a PLY file
//!
//! Log output is controlled with `RUST_LOG` and defaults to `info`.

mod generate;
mod inspect;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Procedural Celtic knots as swept tubes
#[derive(Parser)]
#[command(name = "celtic-knot")]
#[command(about = "Generate Celtic knots and export them as PLY meshes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a knot and print its statistics
    Generate(generate::GenerateArgs),

    /// Print the header of a PLY file
    Inspect {
        /// The PLY file to read
        #[arg(name = "FILE")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Inspect { path } => inspect::run(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_cubic_generation() {
        let cli = Cli::try_parse_from([
            "celtic-knot",
            "generate",
            "--mode",
            "3d",
            "--depth",
            "4",
            "--symmetrify",
            "false",
            "--output",
            "knot.ply",
        ])
        .expect("parse");
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn ascii_conflicts_with_big_endian() {
        let parsed = Cli::try_parse_from(["celtic-knot", "generate", "--ascii", "--big-endian"]);
        assert!(parsed.is_err());
    }
}
