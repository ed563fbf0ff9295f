//! `xconnect sync`: pull live availability and reconcile stored ports.

use tabled::Tabled;
use tracing::warn;

use xconnect_core::{EquinixClient, ReservedPolicy, SyncReport, SyncRequest, sync_datacenter};

use crate::cli::{OutputFormat, SyncArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::ports::PortRow;
use super::util;

#[derive(Tabled)]
struct SyncRow {
    #[tabled(rename = "Datacenter")]
    datacenter: String,
    #[tabled(rename = "Panel")]
    panel: String,
    #[tabled(rename = "Ports")]
    total: u32,
    #[tabled(rename = "Occupied")]
    occupied: u32,
    #[tabled(rename = "Free")]
    free: usize,
    #[tabled(rename = "Kept occupants")]
    preserved: u32,
    #[tabled(rename = "Synced")]
    synced: String,
}

impl From<&SyncReport> for SyncRow {
    fn from(r: &SyncReport) -> Self {
        Self {
            datacenter: r.datacenter_id.clone(),
            panel: r.patch_panel.clone(),
            total: r.summary.total_ports,
            occupied: r.summary.occupied_ports,
            free: r.summary.available_ports.len(),
            preserved: r.summary.preserved_customer_records,
            synced: if r.dry_run {
                "dry run".into()
            } else {
                util::describe_sync(Some(r.synced_at))
            },
        }
    }
}

fn request_for(ctx: &Context, args: &SyncArgs, datacenter_id: String) -> SyncRequest {
    let mut request = SyncRequest::new(datacenter_id);
    request.patch_panel = util::non_blank(args.panel.clone());
    request.panel_size = args.panel_size;
    request.default_panel_size = ctx.config.default_panel_size;
    request.preserve_occupant_info = !args.no_preserve;
    request.reserved = if args.keep_reserved {
        ReservedPolicy::Keep
    } else {
        ctx.config.reserved_ports
    };
    request.source_label = util::non_blank(args.source_label.clone())
        .or_else(|| util::non_blank(ctx.config.sync_source.clone()));
    request.dry_run = args.dry_run;
    request
}

/// Datacenters `--all` covers: those with a patch panel on record.
fn all_targets(ctx: &Context) -> Result<Vec<String>, CliError> {
    Ok(ctx
        .store
        .load_all()?
        .into_iter()
        .filter(|dc| !dc.our_info.patch_panel.trim().is_empty())
        .map(|dc| dc.id)
        .collect())
}

async fn sync_one(
    ctx: &Context,
    client: &EquinixClient,
    request: &SyncRequest,
) -> Result<SyncReport, CliError> {
    let bar = output::spinner(format!("Syncing {}", request.datacenter_id), ctx.quiet);
    let result = sync_datacenter(client, &ctx.store, request).await;
    bar.finish_and_clear();
    Ok(result?)
}

pub async fn handle(ctx: &Context, args: SyncArgs) -> Result<(), CliError> {
    let targets = match args.datacenter.clone() {
        Some(id) => vec![id],
        None => all_targets(ctx)?,
    };
    if targets.is_empty() {
        if !ctx.quiet {
            eprintln!("No datacenters with a patch panel to sync.");
        }
        return Ok(());
    }

    let client = ctx.equinix()?;

    let mut reports = Vec::with_capacity(targets.len());
    let mut first_error = None;
    for id in targets {
        let request = request_for(ctx, &args, id);
        match sync_one(ctx, &client, &request).await {
            Ok(report) => reports.push(report),
            // With --all, one failing panel should not stop the rest
            Err(err) if args.all => {
                warn!(datacenter = %request.datacenter_id, error = %err, "sync failed");
                if !ctx.quiet {
                    eprintln!("✗ {}: {err}", request.datacenter_id);
                }
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
            Err(err) => return Err(err),
        }
    }

    let out = output::render_list(ctx.output, &reports, |r| SyncRow::from(r), |r| {
        r.datacenter_id.clone()
    });
    output::print_output(&out, ctx.quiet);

    // A dry run shows what would be written
    if args.dry_run && ctx.output == OutputFormat::Table {
        for report in &reports {
            let rows = output::render_list(
                ctx.output,
                &report.ports,
                |p| PortRow::new(p, ctx.color),
                |p| p.port_number.to_string(),
            );
            output::print_output(&rows, ctx.quiet);
        }
    }

    first_error.map_or(Ok(()), Err)
}
