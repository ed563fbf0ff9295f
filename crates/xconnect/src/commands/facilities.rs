//! `xconnect facilities`: PeeringDB facility search and import.

use tabled::Tabled;

use xconnect_core::{CoreError, Facility, Network, facility_to_datacenter, format_facility_address};

use crate::cli::{FacilitiesArgs, FacilitiesCommand, OutputFormat};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::{datacenters, util};

#[derive(Tabled)]
struct FacilityRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Networks")]
    networks: u32,
}

impl From<&Facility> for FacilityRow {
    fn from(f: &Facility) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            city: f.city.clone(),
            country: f.country.clone(),
            networks: f.net_count,
        }
    }
}

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "ASN")]
    asn: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    info_type: String,
}

impl From<&Network> for NetworkRow {
    fn from(n: &Network) -> Self {
        Self {
            id: n.id,
            asn: n.asn,
            name: n.name.clone(),
            info_type: n.info_type.clone(),
        }
    }
}

fn detail(f: &Facility) -> String {
    output::detail_lines([
        ("ID", f.id.to_string()),
        ("Name", f.name.clone()),
        ("Also known as", f.aka.clone()),
        ("Operator", f.org_name.clone()),
        ("Address", format_facility_address(f)),
        ("Networks", f.net_count.to_string()),
        ("Exchanges", f.ix_count.to_string()),
        ("Carriers", f.carrier_count.to_string()),
        ("Website", f.website.clone()),
    ])
}

pub async fn handle(ctx: &Context, args: FacilitiesArgs) -> Result<(), CliError> {
    let client = ctx.peeringdb()?;

    match args.command {
        FacilitiesCommand::Search { query } => {
            let query = query.join(" ");
            let bar = output::spinner(format!("Searching PeeringDB for '{query}'"), ctx.quiet);
            let found = client.search_facilities(&query).await;
            bar.finish_and_clear();
            let found = found.map_err(CoreError::from)?;

            let out = output::render_list(
                ctx.output,
                &found,
                |f| FacilityRow::from(f),
                |f| f.id.to_string(),
            );
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        FacilitiesCommand::Show { id, networks } => {
            let bar = output::spinner(format!("Fetching facility {id}"), ctx.quiet);
            let facility = client.facility(id).await;
            bar.finish_and_clear();
            let facility = facility.map_err(CoreError::from)?;

            let out = output::render_single(ctx.output, &facility, detail, |f| f.name.clone());
            output::print_output(&out, ctx.quiet);

            if networks {
                let present = client
                    .networks_in_facility(id)
                    .await
                    .map_err(CoreError::from)?;
                if ctx.output == OutputFormat::Table && !ctx.quiet {
                    println!();
                }
                let out = output::render_list(
                    ctx.output,
                    &present,
                    |n| NetworkRow::from(n),
                    |n| format!("AS{}", n.asn),
                );
                output::print_output(&out, ctx.quiet);
            }
            Ok(())
        }

        FacilitiesCommand::Import {
            id,
            datacenter_id,
            customer,
            patch_panel,
        } => {
            let bar = output::spinner(format!("Fetching facility {id}"), ctx.quiet);
            let facility = client.facility(id).await;
            bar.finish_and_clear();
            let facility = facility.map_err(CoreError::from)?;

            let mut dc = facility_to_datacenter(&facility);
            if let Some(custom) = util::non_blank(datacenter_id) {
                dc.id = custom;
            }
            if let Some(customer) = util::non_blank(customer) {
                dc.our_info.customer = customer;
            }
            if let Some(panel) = util::non_blank(patch_panel) {
                dc.our_info.patch_panel = panel;
            }

            ctx.store.insert(dc.clone())?;
            if !ctx.quiet {
                eprintln!(
                    "✓ Imported '{}' as datacenter '{}' (site {})",
                    facility.name, dc.id, dc.site_code
                );
            }
            let out =
                output::render_single(ctx.output, &dc, datacenters::detail, |dc| dc.id.clone());
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
