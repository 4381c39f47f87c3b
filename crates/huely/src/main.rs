mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use huely_config::{Config, KeyringCredentialStore};
use huely_core::{BridgeLocator, Hub, LinkButtonPairing};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

/// Hub wired with the production collaborators.
pub type CliHub = Hub<BridgeLocator, KeyringCredentialStore, LinkButtonPairing>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Completions never touch the bridge or the config file
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "huely", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let hub = build_hub(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &hub, &cli.global).await
        }
    }
}

/// Config file + `HUELY_*` env, then CLI flag overrides.
fn build_hub(global: &GlobalOpts) -> Result<CliHub, CliError> {
    let mut cfg = huely_config::load_config()?;
    apply_overrides(&mut cfg, global);
    let hub_config = cfg.to_hub_config()?;
    let store = KeyringCredentialStore::new()?;
    Ok(Hub::from_config(&hub_config, store)?)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref bridge) = global.bridge {
        cfg.bridge = Some(bridge.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
}
