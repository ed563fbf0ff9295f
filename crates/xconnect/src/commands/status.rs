//! `xconnect status`: stored sync state, no network access.

use tabled::Tabled;

use xconnect_core::{SyncStatus, sync_status};

use crate::cli::StatusArgs;
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Datacenter")]
    datacenter: String,
    #[tabled(rename = "Panel")]
    panel: String,
    #[tabled(rename = "Ports")]
    total: usize,
    #[tabled(rename = "Free")]
    available: usize,
    #[tabled(rename = "Occupied")]
    occupied: usize,
    #[tabled(rename = "Reserved")]
    reserved: usize,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Last sync")]
    last_sync: String,
}

impl From<&SyncStatus> for StatusRow {
    fn from(s: &SyncStatus) -> Self {
        Self {
            datacenter: s.datacenter_id.clone(),
            panel: s.patch_panel.clone().unwrap_or_else(|| "-".into()),
            total: s.total_ports,
            available: s.available_ports,
            occupied: s.occupied_ports,
            reserved: s.reserved_ports,
            source: s.source.clone(),
            last_sync: util::describe_sync(s.last_sync),
        }
    }
}

fn detail(s: &SyncStatus) -> String {
    output::detail_lines([
        ("Datacenter", s.datacenter_id.clone()),
        ("Patch panel", s.patch_panel.clone().unwrap_or_default()),
        ("Source", s.source.clone()),
        ("Last sync", util::describe_sync(s.last_sync)),
        ("Ports", s.total_ports.to_string()),
        ("Available", s.available_ports.to_string()),
        (
            "Occupied",
            format!("{} ({} named)", s.occupied_ports, s.named_occupants),
        ),
        ("Reserved", s.reserved_ports.to_string()),
    ])
}

pub fn handle(ctx: &Context, args: &StatusArgs) -> Result<(), CliError> {
    let out = if let Some(ref id) = args.datacenter {
        let status = sync_status(&ctx.store, id)?;
        output::render_single(ctx.output, &status, detail, |s| s.source.clone())
    } else {
        let all: Vec<SyncStatus> = ctx.store.load_all()?.iter().map(SyncStatus::of).collect();
        output::render_list(
            ctx.output,
            &all,
            |s| StatusRow::from(s),
            |s| format!("{}\t{}", s.datacenter_id, s.source),
        )
    };
    output::print_output(&out, ctx.quiet);
    Ok(())
}
