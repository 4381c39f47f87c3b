//! Command handlers, one module per top-level subcommand.

pub mod bridge;
pub mod lights;

use crate::CliHub;
use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn dispatch(cmd: Command, hub: &CliHub, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Lights(args) => {
            let result = lights::handle(hub, args, global).await;
            // Reported even when the command itself failed afterwards
            for warning in hub.take_warnings() {
                output::print_notice(&format!("warning: {warning}"), global.quiet);
            }
            result
        }
        Command::Bridge(args) => bridge::handle(hub, args, global).await,
        // Handled before a hub is built
        Command::Completions(_) => Ok(()),
    }
}
