//! Bridge command handlers.

use serde::Serialize;

use crate::CliHub;
use crate::cli::{BridgeArgs, BridgeCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct BridgeInfo {
    address: String,
    paired: bool,
}

pub async fn handle(hub: &CliHub, args: BridgeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let info = match args.command {
        BridgeCommand::Discover => {
            let address = hub.discover().await?;
            BridgeInfo {
                address: address.to_string(),
                paired: false,
            }
        }
        BridgeCommand::Pair => {
            output::print_notice(
                "Pairing with the bridge (the link button must have been pressed)...",
                global.quiet,
            );
            let (address, _credential) = hub.pair().await?;
            BridgeInfo {
                address: address.to_string(),
                paired: true,
            }
        }
    };

    let rendered = output::render_single(
        &global.output,
        &info,
        |i| {
            if i.paired {
                format!("Paired with bridge at {}. Credential saved to the keyring.", i.address)
            } else {
                format!("Bridge found at {}", i.address)
            }
        },
        |i| i.address.clone(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
