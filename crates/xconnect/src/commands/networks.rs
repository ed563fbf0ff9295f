//! `xconnect networks`: PeeringDB network lookups.

use serde::Serialize;

use xconnect_core::{AddressCache, CoreError, PeeringDbClient, network_address};

use crate::cli::{NetworksArgs, NetworksCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

/// A network id, or an AS number written `AS<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NetworkRef {
    Id(u64),
    Asn(u32),
}

fn parse_ref(raw: &str) -> Result<NetworkRef, CliError> {
    let raw = raw.trim();
    let invalid = || CliError::Validation {
        field: "network".into(),
        reason: format!("'{raw}' is neither a PeeringDB network id nor an AS number"),
    };
    match raw.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("as") => raw
            .get(2..)
            .and_then(|n| n.parse().ok())
            .map(NetworkRef::Asn)
            .ok_or_else(invalid),
        _ => raw.parse().map(NetworkRef::Id).map_err(|_| invalid()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkAddress {
    network_id: u64,
    asn: Option<u32>,
    name: Option<String>,
    address: Option<String>,
}

async fn resolve(
    client: &PeeringDbClient,
    cache: &AddressCache,
    network: &str,
) -> Result<NetworkAddress, CliError> {
    let (network_id, asn, name) = match parse_ref(network)? {
        NetworkRef::Id(id) => (id, None, None),
        NetworkRef::Asn(asn) => {
            let net = client
                .network_by_asn(asn)
                .await
                .map_err(CoreError::from)?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "network".into(),
                    identifier: format!("AS{asn}"),
                    list_command: "facilities show <id> --networks".into(),
                })?;
            (net.id, Some(net.asn), Some(net.name))
        }
    };

    Ok(NetworkAddress {
        network_id,
        asn,
        name,
        address: network_address(client, network_id, cache).await?,
    })
}

pub async fn handle(ctx: &Context, args: NetworksArgs) -> Result<(), CliError> {
    let client = ctx.peeringdb()?;

    match args.command {
        NetworksCommand::Address { network } => {
            let bar = output::spinner(format!("Resolving address of {network}"), ctx.quiet);
            let resolved = resolve(&client, ctx.addresses(), &network).await;
            bar.finish_and_clear();
            let result = resolved?;

            let out = output::render_single(
                ctx.output,
                &result,
                |r| {
                    r.address
                        .clone()
                        .unwrap_or_else(|| "(no address on record)".into())
                },
                |r| r.address.clone().unwrap_or_default(),
            );
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
