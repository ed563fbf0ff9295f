//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod datacenters;
pub mod facilities;
pub mod networks;
pub mod ports;
pub mod status;
pub mod sync;
pub mod util;

use crate::cli::Command;
use crate::config::Context;
use crate::error::CliError;

/// Route a command that needs a loaded context to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Sync(args) => sync::handle(ctx, args).await,
        Command::Status(args) => status::handle(ctx, &args),
        Command::Datacenters(args) => datacenters::handle(ctx, args),
        Command::Ports(args) => ports::handle(ctx, args),
        Command::Facilities(args) => facilities::handle(ctx, args).await,
        Command::Networks(args) => networks::handle(ctx, args).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
