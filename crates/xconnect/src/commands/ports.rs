//! `xconnect ports`: view and hand-edit a datacenter's port inventory.

use tabled::Tabled;
use tracing::info;

use xconnect_core::{CoreError, Datacenter, PortRecord, PortStatus, RecordStore};

use crate::cli::{PortSetArgs, PortStatusArg, PortsArgs, PortsCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
pub struct PortRow {
    #[tabled(rename = "Port")]
    port: u32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Occupant")]
    occupant: String,
    #[tabled(rename = "Installed")]
    installed: String,
    #[tabled(rename = "Media")]
    media: String,
    #[tabled(rename = "Order")]
    order: String,
}

impl PortRow {
    pub fn new(p: &PortRecord, color: bool) -> Self {
        Self {
            port: p.port_number,
            status: output::status_label(p.status, color),
            occupant: p.occupant_name.clone().unwrap_or_default(),
            installed: p.installed_on.clone().unwrap_or_default(),
            media: p.media_type.clone().unwrap_or_default(),
            order: p.order_number.clone().unwrap_or_default(),
        }
    }
}

impl From<PortStatusArg> for PortStatus {
    fn from(arg: PortStatusArg) -> Self {
        match arg {
            PortStatusArg::Available => Self::Available,
            PortStatusArg::Occupied => Self::Occupied,
            PortStatusArg::Reserved => Self::Reserved,
        }
    }
}

/// Number of ports a hand edit may address on this datacenter: the larger
/// of the inventory and `maxPorts`, else the configured default.
fn editable_range(dc: &Datacenter, default_panel_size: Option<u32>) -> u32 {
    let inventory = u32::try_from(dc.our_info.port_details.len()).unwrap_or(u32::MAX);
    match inventory.max(dc.our_info.max_ports.unwrap_or(0)) {
        0 => default_panel_size.unwrap_or(0),
        size => size,
    }
}

/// Find or create the record for `port`.
///
/// A missing record means the inventory is short of the panel; every gap in
/// `1..=panel_size` is filled with an available record so that the next sync
/// sizes the panel from a dense list.
fn slot(
    dc: &mut Datacenter,
    port: u32,
    default_panel_size: Option<u32>,
) -> Result<&mut PortRecord, CoreError> {
    let panel_size = editable_range(dc, default_panel_size);
    if port == 0 || port > panel_size {
        return Err(CoreError::PortOutOfRange { port, panel_size });
    }
    let ports = &mut dc.our_info.port_details;
    if !ports.iter().any(|p| p.port_number == port) {
        for n in 1..=panel_size {
            if !ports.iter().any(|p| p.port_number == n) {
                let at = ports.partition_point(|p| p.port_number < n);
                ports.insert(at, PortRecord::available(n));
            }
        }
    }
    ports
        .iter_mut()
        .find(|p| p.port_number == port)
        .ok_or(CoreError::PortOutOfRange { port, panel_size })
}

fn apply_set(record: &mut PortRecord, args: &PortSetArgs) {
    let status = PortStatus::from(args.status);
    if status == PortStatus::Available {
        record.release();
        return;
    }
    record.status = status;
    if let Some(occupant) = util::non_blank(args.occupant.clone()) {
        record.occupant_name = Some(occupant);
    }
    if let Some(installed) = util::non_blank(args.installed_on.clone()) {
        record.installed_on = Some(installed);
    }
    if let Some(media) = util::non_blank(args.media_type.clone()) {
        record.media_type = Some(media);
    }
    if let Some(order) = util::non_blank(args.order_number.clone()) {
        record.order_number = Some(order);
    }
}

fn print_port(ctx: &Context, record: &PortRecord) {
    let out = output::render_single(
        ctx.output,
        record,
        |p| {
            output::detail_lines([
                ("Port", p.port_number.to_string()),
                ("Status", output::status_label(p.status, ctx.color)),
                ("Occupant", p.occupant_name.clone().unwrap_or_default()),
                ("Installed", p.installed_on.clone().unwrap_or_default()),
                ("Media", p.media_type.clone().unwrap_or_default()),
                ("Order", p.order_number.clone().unwrap_or_default()),
            ])
        },
        |p| format!("{}\t{}", p.port_number, p.status),
    );
    output::print_output(&out, ctx.quiet);
}

pub fn handle(ctx: &Context, args: PortsArgs) -> Result<(), CliError> {
    match args.command {
        PortsCommand::List { datacenter, status } => {
            let dc = ctx.store.datacenter(&datacenter)?;
            let ports: Vec<PortRecord> = dc
                .our_info
                .port_details
                .into_iter()
                .filter(|p| status.is_none_or(|s| p.status == PortStatus::from(s)))
                .collect();
            let out = output::render_list(
                ctx.output,
                &ports,
                |p| PortRow::new(p, ctx.color),
                |p| format!("{}\t{}", p.port_number, p.status),
            );
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        PortsCommand::Set(args) => {
            let record = ctx.store.update(&args.datacenter, |dc| {
                let record = slot(dc, args.port, ctx.config.default_panel_size)?;
                apply_set(record, &args);
                Ok(record.clone())
            })?;
            info!(datacenter = %args.datacenter, port = args.port, status = %record.status, "port updated");
            print_port(ctx, &record);
            Ok(())
        }

        PortsCommand::Clear { datacenter, port } => {
            let record = ctx.store.update(&datacenter, |dc| {
                let record = slot(dc, port, ctx.config.default_panel_size)?;
                record.release();
                Ok(record.clone())
            })?;
            if !ctx.quiet {
                eprintln!("✓ Port {port} on {datacenter} is now available");
            }
            print_port(ctx, &record);
            Ok(())
        }
    }
}
