use clap::Parser;
use miette::Result;
use sketchpad::cli::{init_tracing, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render(args) => sketchpad::cli::render::run(args)?,
        Commands::Check(args) => sketchpad::cli::check::run(args)?,
        Commands::Inspect(args) => sketchpad::cli::inspect::run(args)?,
        Commands::Natives(args) => sketchpad::cli::natives::run(args)?,
        Commands::Completions(args) => sketchpad::cli::completions::run(args)?,
    }

    Ok(())
}
