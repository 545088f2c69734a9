//! Command dispatch: bridges CLI args -> core use cases -> output formatting.

pub mod health;
pub mod resource;
pub mod watch;

use rosmon_core::ConnectionConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: &ConnectionConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Resource => resource::handle(config, global).await,
        Command::Health(args) => health::handle(config, args, global).await,
        Command::Watch(args) => watch::handle(config, args, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}
