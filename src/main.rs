//! Version metadata generator for build systems.
//!
//! Renders project name, version, git revision, remote URL, and build host
//! into a source file. Meant to be called from a build graph:
//! - `--print-dependencies` / `--print-outputs` describe the node
//! - generation mode writes the file, optionally keeping an identical one
//! - `--check-changes` turns "nothing changed" into exit status 3

use std::fs;
use std::process::ExitCode;

use anyhow::Result;
use clap::{
    CommandFactory,
    Parser,
};
use version_gen::GenError;
use version_gen::commands::{
    self,
    GenerateArgs,
};

#[derive(Parser, Debug)]
#[command(name = "version-gen", version, about)]
struct Cli {
    /// Print semicolon separated list of dependency files.
    ///
    /// Takes precedence over `--print-outputs`.
    #[arg(long)]
    print_dependencies: bool,

    /// Print semicolon separated list of output files.
    #[arg(long)]
    print_outputs: bool,

    #[command(flatten)]
    generate: GenerateArgs,
}

/// Check if any .env* files exist in the current directory.
fn has_env_files() -> bool {
    let current_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(_) => return false,
    };

    let patterns = [".env", ".env.local", ".env.dev", ".env.test"];

    patterns.iter().any(|pattern| {
        fs::metadata(current_dir.join(pattern))
            .map(|m| m.is_file())
            .unwrap_or(false)
    })
}

fn run() -> Result<()> {
    // Let VERSION_GEN_* settings come from a project-local env file.
    if has_env_files()
        && let Err(e) = dotenvage::EnvLoader::new().and_then(|loader| loader.load())
    {
        eprintln!("Warning: Failed to load env files: {}", e);
        eprintln!("Continuing with existing environment variables...");
    }

    let cli = Cli::parse();

    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    if cli.print_dependencies {
        return commands::print_dependencies(cli.generate.genpattern.as_deref());
    }

    if cli.print_outputs {
        return commands::print_outputs(&cli.generate.output, cli.generate.dir.as_deref());
    }

    commands::generate(cli.generate).map(|_| ())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e.downcast_ref::<GenError>().map_or(1, GenError::exit_code);
            ExitCode::from(code)
        }
    }
}
