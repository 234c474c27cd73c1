use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use teamscfg::commands::{self, CheckStatus};
use teamscfg_core::config::Settings;

#[derive(Parser)]
#[command(name = "teamscfg", about = "Normalize and check course teams configuration")]
struct Cli {
    /// Settings file (defaults to ~/.config/teamscfg/config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized form of a teams document.
    Normalize { file: PathBuf },
    /// Summarize a teams document and report dropped clusters.
    Check { file: PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let filter = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.filter))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Normalize { file } => {
            commands::normalize(&file, &settings, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => match commands::check(&file, &settings, &mut stdout)? {
            CheckStatus::Passed => Ok(ExitCode::SUCCESS),
            CheckStatus::DroppedItems => Ok(ExitCode::FAILURE),
        },
    }
}
