//! Application configuration initialization command.
//!
//! Seeds the built-in ibadah types and runs the interactive wizard for
//! minimum-viable-day targets. Safe to re-run: seeding only adds what is
//! missing and the wizard pre-fills existing targets.

use crate::db::ibadah_types::IbadahTypes;
use crate::libs::{config::Config, messages::Message};
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Seed defaults and skip the interactive wizard
    #[arg(short, long)]
    skip_wizard: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let mut types = IbadahTypes::new()?;
    let added = types.ensure_defaults()?;
    if added > 0 {
        msg_info!(Message::DefaultsSeeded(added));
    }

    if init_args.skip_wizard {
        return Ok(());
    }

    let active = types.fetch_active()?;
    Config::init(&active)?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
