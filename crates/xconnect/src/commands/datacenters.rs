//! `xconnect datacenters`: manage datacenter records in the store.

use tabled::Tabled;

use xconnect_core::{Datacenter, RecordStore};

use crate::cli::{DatacenterAddArgs, DatacentersArgs, DatacentersCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct DatacenterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Site")]
    site_code: String,
    #[tabled(rename = "Patch panel")]
    panel: String,
    #[tabled(rename = "Ports")]
    ports: usize,
    #[tabled(rename = "Last sync")]
    last_sync: String,
}

impl From<&Datacenter> for DatacenterRow {
    fn from(dc: &Datacenter) -> Self {
        Self {
            id: dc.id.clone(),
            name: if dc.display_name.is_empty() {
                dc.name.clone()
            } else {
                dc.display_name.clone()
            },
            site_code: dc.site_code.clone(),
            panel: dc.our_info.patch_panel.clone(),
            ports: dc.our_info.port_details.len(),
            last_sync: util::describe_sync(dc.our_info.last_api_sync),
        }
    }
}

pub(crate) fn detail(dc: &Datacenter) -> String {
    let info = &dc.our_info;
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    output::detail_lines([
        ("ID", dc.id.clone()),
        ("Name", dc.name.clone()),
        ("Display name", dc.display_name.clone()),
        ("Address", dc.address.clone()),
        ("Site code", dc.site_code.clone()),
        (
            "PeeringDB",
            dc.facility_id.map(|id| format!("fac {id}")).unwrap_or_default(),
        ),
        ("Customer", info.customer.clone()),
        ("Account", opt(&info.account_number)),
        ("IBX", info.ibx.clone()),
        ("Cage", opt(&info.cage)),
        ("Cabinet", info.cabinet.clone()),
        ("Patch panel", info.patch_panel.clone()),
        ("Default port", opt(&info.default_port)),
        (
            "Max ports",
            info.max_ports.map(|n| n.to_string()).unwrap_or_default(),
        ),
        ("Ports on record", info.port_details.len().to_string()),
        ("Last sync", util::describe_sync(info.last_api_sync)),
        ("Sync source", opt(&info.sync_source)),
    ])
}

fn from_args(args: DatacenterAddArgs) -> Datacenter {
    let mut dc = Datacenter::new(args.id, args.name);
    if let Some(display) = util::non_blank(args.display_name) {
        dc.display_name = display;
    }
    dc.address = args.address.unwrap_or_default();
    dc.site_code = args.site_code.unwrap_or_default();

    let info = &mut dc.our_info;
    info.customer = args.customer.unwrap_or_default();
    info.account_number = util::non_blank(args.account_number);
    info.ibx = args.ibx.unwrap_or_default();
    info.cage = util::non_blank(args.cage);
    info.cabinet = args.cabinet.unwrap_or_default();
    info.patch_panel = args.patch_panel.unwrap_or_default();
    info.max_ports = args.max_ports;
    dc
}

pub fn handle(ctx: &Context, args: DatacentersArgs) -> Result<(), CliError> {
    match args.command {
        DatacentersCommand::List { filter } => {
            let all = match filter {
                Some(ref q) => ctx.store.search(q)?,
                None => ctx.store.load_all()?,
            };
            let out = output::render_list(
                ctx.output,
                &all,
                |dc| DatacenterRow::from(dc),
                |dc| dc.id.clone(),
            );
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        DatacentersCommand::Show { id } => {
            let dc = ctx.store.datacenter(&id)?;
            let out = output::render_single(ctx.output, &dc, detail, |dc| dc.id.clone());
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        DatacentersCommand::Add(args) => {
            if args.id.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "id".into(),
                    reason: "cannot be empty".into(),
                });
            }
            let dc = from_args(args);
            let id = dc.id.clone();
            ctx.store.insert(dc)?;
            if !ctx.quiet {
                eprintln!("✓ Added datacenter '{id}'");
            }
            Ok(())
        }

        DatacentersCommand::Remove { id } => {
            // Fail with not-found before asking
            ctx.store.datacenter(&id)?;
            if !util::confirm(&format!("Remove datacenter '{id}' and its port inventory?"), ctx.yes)? {
                return Ok(());
            }
            ctx.store.remove(&id)?;
            if !ctx.quiet {
                eprintln!("✓ Removed datacenter '{id}'");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_fill_our_info() {
        let dc = from_args(DatacenterAddArgs {
            id: "zh4".into(),
            name: "Equinix ZH4".into(),
            display_name: Some(" ".into()),
            address: Some("Josefstrasse 225, 8005 Zurich".into()),
            site_code: Some("ZH4".into()),
            customer: Some("Example AG".into()),
            account_number: None,
            ibx: Some("ZH4".into()),
            cage: Some("".into()),
            cabinet: Some("0102".into()),
            patch_panel: Some("PP:0201:0102:1374601".into()),
            max_ports: Some(24),
        });

        assert_eq!(dc.display_name, "Equinix ZH4");
        assert_eq!(dc.our_info.customer, "Example AG");
        assert_eq!(dc.our_info.cage, None);
        assert_eq!(dc.our_info.max_ports, Some(24));
        assert!(dc.our_info.port_details.is_empty());
    }
}
