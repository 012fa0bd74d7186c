use anyhow::{Context, Result};
use clap::Parser;
use clara_core::{Config, Engine, OutputFormatter, VersionResult};
use std::process;

mod cli;
mod last;
mod logging;
mod run;
mod scan;
mod undo;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    logging::init_logger();

    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        process::exit(2);
    });

    let mut engine = Engine::new();
    let subscription = (!cli.quiet).then(|| engine.subscribe(|line| eprintln!("{line}")));

    let result = dispatch(&mut engine, cli.command, &config);

    if let Some(id) = subscription {
        engine.unsubscribe(id);
    }

    match result {
        Ok(true) => {},
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    }
}

/// Run a command. `Ok(false)` means it finished but reported per-file errors.
fn dispatch(engine: &mut Engine, command: Commands, config: &Config) -> Result<bool> {
    let default_output = config
        .defaults
        .output
        .parse::<OutputFormat>()
        .unwrap_or(OutputFormat::Summary);
    let default_extension = config.defaults.extension.as_deref();

    match command {
        Commands::Scan {
            dir,
            extension,
            output,
        } => scan::handle_scan(
            engine,
            &dir,
            extension.as_deref().or(default_extension),
            output.unwrap_or(default_output),
        )
        .map(|()| true),

        Commands::Run {
            dir,
            extension,
            start,
            output,
        } => run::handle_run(
            engine,
            &dir,
            extension.as_deref().or(default_extension),
            start.as_deref(),
            config.defaults.start_number,
            output.unwrap_or(default_output),
        )
        .map(|()| true),

        Commands::Undo { dir, id, output } => {
            undo::handle_undo(engine, &dir, id.as_deref(), output.unwrap_or(default_output))
        },

        Commands::Last { dir, output } => {
            last::handle_last(&dir, output.unwrap_or(default_output)).map(|()| true)
        },

        Commands::Version { output } => handle_version(output).map(|()| true),
    }
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "clara".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
