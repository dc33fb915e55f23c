//! Ibadah type registry management command.
//!
//! Add, rename and reweigh trackable activities, archive and restore them,
//! or delete a user-created type for good. Archiving hides a type from
//! logging and suggestions while keeping its history; deletion is refused
//! for the built-in defaults.

use crate::db::ibadah_types::IbadahTypes;
use crate::libs::ibadah::{IbadahType, IbadahUnit, IbadahUpdate};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_error, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct IbadahArgs {
    #[command(subcommand)]
    command: IbadahCommands,
}

#[derive(Debug, Subcommand)]
enum IbadahCommands {
    #[command(about = "List all tracked ibadah")]
    List {
        /// Include archived types
        #[arg(long, short)]
        all: bool,
    },
    #[command(about = "Add a new ibadah type")]
    Add {
        name: String,
        #[arg(value_enum)]
        unit: IbadahUnitArg,
        /// Volume weight, defaults to 1
        #[arg(long, short)]
        weight: Option<f64>,
    },
    #[command(about = "Update a type's name, weight or unit")]
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_enum)]
        unit: Option<IbadahUnitArg>,
        #[arg(long)]
        weight: Option<f64>,
    },
    #[command(about = "Archive a type, hiding it without losing history")]
    Archive { id: String },
    #[command(about = "Restore an archived type")]
    Restore { id: String },
    #[command(about = "Permanently delete a user-created type")]
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum IbadahUnitArg {
    Pages,
    Minutes,
    Count,
    Currency,
    Binary,
    Ayat,
}

impl From<IbadahUnitArg> for IbadahUnit {
    fn from(arg: IbadahUnitArg) -> Self {
        match arg {
            IbadahUnitArg::Pages => IbadahUnit::Pages,
            IbadahUnitArg::Minutes => IbadahUnit::Minutes,
            IbadahUnitArg::Count => IbadahUnit::Count,
            IbadahUnitArg::Currency => IbadahUnit::Currency,
            IbadahUnitArg::Binary => IbadahUnit::Binary,
            IbadahUnitArg::Ayat => IbadahUnit::Ayat,
        }
    }
}

pub fn cmd(args: IbadahArgs) -> Result<()> {
    let mut types = IbadahTypes::new()?;
    types.ensure_defaults()?;

    match args.command {
        IbadahCommands::List { all } => {
            let list = if all { types.fetch_all()? } else { types.fetch_active()? };
            msg_print!(Message::IbadahHeader, true);
            View::ibadah_types(&list).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        IbadahCommands::Add { name, unit, weight } => {
            let sort_order = types.fetch_all()?.len() as i64;
            let ibadah = IbadahType::new(&name, unit.into(), weight, sort_order);
            types.insert(&ibadah)?;
            msg_success!(Message::IbadahCreated(ibadah.name));
        }
        IbadahCommands::Update { id, name, unit, weight } => {
            let updates = IbadahUpdate {
                name,
                unit: unit.map(Into::into),
                weight,
                sort_order: None,
            };
            if types.update(&id, &updates)? {
                msg_success!(Message::IbadahUpdated(id));
            } else {
                msg_error!(Message::IbadahNotFound(id));
            }
        }
        IbadahCommands::Archive { id } => {
            if types.set_archived(&id, true)? {
                msg_success!(Message::IbadahArchived(id));
            } else {
                msg_error!(Message::IbadahNotFound(id));
            }
        }
        IbadahCommands::Restore { id } => {
            if types.set_archived(&id, false)? {
                msg_success!(Message::IbadahRestored(id));
            } else {
                msg_error!(Message::IbadahNotFound(id));
            }
        }
        IbadahCommands::Delete { id } => delete_type(&mut types, &id)?,
    }

    Ok(())
}

fn delete_type(types: &mut IbadahTypes, id: &str) -> Result<()> {
    let Some(ibadah) = types.fetch_by_id(id)? else {
        msg_error!(Message::IbadahNotFound(id.to_string()));
        return Ok(());
    };

    // Built-in types carry shared history semantics, archive is the way out
    if ibadah.is_default {
        msg_error!(Message::IbadahDefaultDeleteRefused(ibadah.name));
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteIbadah(ibadah.name.clone()).to_string())
        .default(false)
        .interact()?;

    if confirmed {
        types.delete(id)?;
        msg_success!(Message::IbadahDeleted(ibadah.name));
    }

    Ok(())
}
