mod cpf;
mod submit;

use clap::{Parser, Subcommand};
use kyf_core::Environment;
use tracing_subscriber::EnvFilter;

use crate::submit::SubmitArgs;

#[derive(Debug, Parser)]
#[command(name = "kyf")]
#[command(about = "Know Your Fan intake command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the fan's data and send it to the intake backend
    Submit(SubmitArgs),
    /// Print a CPF in the `000.000.000-00` display mask
    MaskCpf {
        /// Raw CPF text; non-digits are ignored
        input: String,
    },
    /// Check that a CPF has exactly 11 digits and print them
    CheckCpf {
        /// Raw CPF text; non-digits are ignored
        input: String,
    },
    /// Check that the intake backend is reachable
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = kyf_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.env != Environment::Production)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Submit(args) => submit::run_submit(&config, &args).await,
        Commands::MaskCpf { input } => {
            println!("{}", cpf::run_mask(&input));
            Ok(())
        }
        Commands::CheckCpf { input } => {
            println!("{}", cpf::run_check(&input)?);
            Ok(())
        }
        Commands::Ping => submit::run_ping(&config).await,
    }
}

#[cfg(test)]
mod tests;
