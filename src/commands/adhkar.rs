//! Daily adhkar tracking command.
//!
//! Drives the morning and evening recitation sets: show progress, count
//! repetitions, mark a set complete and reset. The stored record resets
//! itself on the first mutation of a new day. Completing a set logs a
//! value-1 set under the reserved `adhkar` type id into today's session,
//! so adhkar days count towards streaks and volume.

use crate::libs::adhkar::{adhkar_items, AdhkarSet, AdhkarStore};
use crate::libs::ibadah::ADHKAR_TYPE_ID;
use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct AdhkarArgs {
    #[command(subcommand)]
    command: AdhkarCommands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AdhkarSetArg {
    Sabah,
    Masaa,
}

impl From<AdhkarSetArg> for AdhkarSet {
    fn from(arg: AdhkarSetArg) -> Self {
        match arg {
            AdhkarSetArg::Sabah => AdhkarSet::Sabah,
            AdhkarSetArg::Masaa => AdhkarSet::Masaa,
        }
    }
}

#[derive(Debug, Subcommand)]
enum AdhkarCommands {
    #[command(about = "Show today's progress for a set")]
    Show {
        #[arg(value_enum)]
        set: AdhkarSetArg,
    },
    #[command(about = "Count one repetition of an item")]
    Inc {
        #[arg(value_enum)]
        set: AdhkarSetArg,
        item: String,
    },
    #[command(about = "Set an item's repetition count directly")]
    Set {
        #[arg(value_enum)]
        set: AdhkarSetArg,
        item: String,
        count: u32,
    },
    #[command(about = "Mark a set complete and log it to today's session")]
    Complete {
        #[arg(value_enum)]
        set: AdhkarSetArg,
    },
    #[command(about = "Reset a set's progress for today")]
    Reset {
        #[arg(value_enum)]
        set: AdhkarSetArg,
    },
}

pub fn cmd(args: AdhkarArgs) -> Result<()> {
    let mut store = AdhkarStore::read()?;

    match args.command {
        AdhkarCommands::Show { set } => show(&store, set.into())?,
        AdhkarCommands::Inc { set, item } => {
            let set = set.into();
            if !item_exists(set, &item) {
                msg_error!(Message::AdhkarItemNotFound(item));
                return Ok(());
            }
            store.increment(set, &item)?;
            show(&store, set)?;
        }
        AdhkarCommands::Set { set, item, count } => {
            let set = set.into();
            if !item_exists(set, &item) {
                msg_error!(Message::AdhkarItemNotFound(item));
                return Ok(());
            }
            store.set_count(set, &item, count)?;
            show(&store, set)?;
        }
        AdhkarCommands::Complete { set } => complete(&mut store, set.into())?,
        AdhkarCommands::Reset { set } => {
            let set = set.into();
            store.reset_progress(set)?;
            msg_print!(Message::AdhkarReset(set.label().to_string()));
        }
    }

    Ok(())
}

fn show(store: &AdhkarStore, set: AdhkarSet) -> Result<()> {
    let date = store.state.date.to_string();
    msg_print!(Message::AdhkarHeader(set.label().to_string(), date), true);
    View::adhkar(store, set, adhkar_items(set)).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (completed, total) = store.total_progress(set);
    if store.is_completed(set) {
        msg_print!(Message::Custom(format!("Completed ({}/{} items at target)", completed, total)));
    } else {
        msg_print!(Message::Custom(format!("{}/{} items at target", completed, total)));
    }

    Ok(())
}

/// Marks the set complete and, when it was not already, feeds the
/// completion into the session model as a value-1 set.
fn complete(store: &mut AdhkarStore, set: AdhkarSet) -> Result<()> {
    if !store.mark_complete(set)? {
        msg_info!(Message::AdhkarAlreadyCompleted(set.label().to_string()));
        return Ok(());
    }

    msg_success!(Message::AdhkarSetCompleted(set.label().to_string()));

    let mut service = SessionService::new()?;
    let session = service.get_or_create_today()?;
    service.add_set(session.id, ADHKAR_TYPE_ID, 1.0, None, Some(set.completion_note()))?;
    msg_info!(Message::AdhkarLinkedToSession(session.session_date.to_string()));

    Ok(())
}

fn item_exists(set: AdhkarSet, item_id: &str) -> bool {
    adhkar_items(set).iter().any(|item| item.id == item_id)
}
