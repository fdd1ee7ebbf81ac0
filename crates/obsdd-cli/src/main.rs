//! obsdd CLI - observed data dictionaries for tabular data.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use commands::analyze::AnalyzeOptions;
use logging::{LogConfig, init_logging};

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(
        &LogConfig::from_verbosity(cli.verbose)
            .with_ansi(!cli.no_color)
            .with_timestamps(cli.timestamps),
    );

    let result = match cli.command {
        Commands::Analyze {
            file,
            output_dir,
            format,
            delimiter,
            parse_dates,
            config,
            skip_errors,
        } => commands::analyze::run(
            file,
            AnalyzeOptions {
                output_dir,
                format,
                delimiter,
                parse_dates,
                config,
                skip_errors,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
