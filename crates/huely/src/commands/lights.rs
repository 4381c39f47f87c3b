//! Light command handlers.

use tabled::Tabled;

use huely_core::Device;

use crate::CliHub;
use crate::cli::{GlobalOpts, LightsArgs, LightsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LightRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Reachable")]
    reachable: String,
}

fn row(d: &Device, color: bool) -> LightRow {
    LightRow {
        id: d.id.clone(),
        name: d.name.clone(),
        state: output::on_off(d.on, color),
        reachable: if d.reachable { "yes" } else { "no" }.into(),
    }
}

fn detail(d: &Device, color: bool) -> String {
    [
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.name),
        format!("State:     {}", output::on_off(d.on, color)),
        format!("Reachable: {}", if d.reachable { "yes" } else { "no" }),
    ]
    .join("\n")
}

fn plain(d: &Device) -> String {
    format!("{}\t{}\t{}", d.id, if d.on { "on" } else { "off" }, d.name)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(hub: &CliHub, args: LightsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let rendered = match args.command {
        LightsCommand::List => {
            let lights = hub.list_devices().await?;
            output::render_list(&global.output, &lights, |d| row(d, color), plain)?
        }
        LightsCommand::Get { id } => {
            let light = hub.get_device(&id).await?;
            output::render_single(&global.output, &light, |d| detail(d, color), plain)?
        }
        LightsCommand::Toggle { id } => {
            let light = hub.toggle_device_by_id(&id).await?;
            tracing::info!(light = %light.id, on = light.on, "light toggled");
            output::render_single(
                &global.output,
                &light,
                |d| format!("{} is now {}", d.name, output::on_off(d.on, color)),
                plain,
            )?
        }
    };

    output::print_output(&rendered, global.quiet);
    Ok(())
}
