pub mod check;
pub mod completions;
pub mod inspect;
pub mod natives;
pub mod render;

use clap::{ArgAction, Parser, Subcommand};

/// sketchpad - generative vector art from scripted native calls
#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run sketches and write PNG images
    Render(render::RenderArgs),

    /// Check sketches without running them
    Check(check::CheckArgs),

    /// Run a sketch and print what it put on the canvas as JSON
    Inspect(inspect::InspectArgs),

    /// List every registered native and its signatures
    Natives(natives::NativesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Install the global log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks the level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("sketchpad={}", level))
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init();
}
