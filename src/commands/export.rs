//! Data export and import commands.
//!
//! `ajr export` writes a JSON backup envelope or a flat CSV set log;
//! `ajr import` validates a JSON backup and replaces the whole store with
//! it after an interactive confirmation.

use crate::libs::export::{read_backup, restore_backup, Exporter, ExportFormat};
use crate::libs::messages::Message;
use crate::{msg_print, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "json")]
    format: ExportFormat,

    /// Output file path, defaults to a timestamped name in the current directory
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Backup file to restore (JSON produced by 'ajr export')
    #[arg(required = true)]
    file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let exporter = Exporter::new(args.format, args.output);
    let path = exporter.export()?;
    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}

pub fn import_cmd(args: ImportArgs) -> Result<()> {
    let data = read_backup(&args.file)?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmImportReplace.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_print!(Message::ImportCancelled);
            return Ok(());
        }
    }

    let (types, sessions, sets) = restore_backup(&data)?;
    msg_success!(Message::ImportCompleted(types, sessions, sets));

    Ok(())
}
