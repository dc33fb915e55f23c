//! Display and mutate logged sets.
//!
//! Lists the sets of any date, and applies point mutations: a value
//! correction or a deletion. Both go through the session service so the
//! owning session's volume stays in sync with the change.

use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::libs::set::SetUpdate;
use crate::libs::view::View;
use crate::{msg_print, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct SetsArgs {
    /// Date to fetch sets for (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today")]
    date: String,

    /// Delete the set with this id
    #[arg(long, conflicts_with_all = ["set", "value"])]
    delete: Option<i64>,

    /// Id of the set to update (used with --value)
    #[arg(long, requires = "value")]
    set: Option<i64>,

    /// New value for the set addressed by --set
    #[arg(long, requires = "set")]
    value: Option<f64>,
}

pub fn cmd(args: SetsArgs) -> Result<()> {
    let mut service = SessionService::new()?;

    if let Some(set_id) = args.delete {
        if service.delete_set(set_id)? {
            msg_success!(Message::SetDeleted(set_id));
        } else {
            msg_print!(Message::SetNotFound(set_id));
        }
        return Ok(());
    }

    if let (Some(set_id), Some(value)) = (args.set, args.value) {
        let updates = SetUpdate { value: Some(value), ..SetUpdate::default() };
        if service.update_set(set_id, &updates)? {
            msg_success!(Message::SetUpdated(set_id));
        } else {
            msg_print!(Message::SetNotFound(set_id));
        }
        return Ok(());
    }

    let date = parse_date(&args.date)?;
    let Some(session) = service.sessions.fetch_by_date(date)? else {
        msg_print!(Message::SessionNotFoundForDate(date.to_string()));
        return Ok(());
    };

    let sets = service.sets.fetch_by_session(session.id)?;
    if sets.is_empty() {
        msg_print!(Message::NoSetsForDate(date.to_string()));
        return Ok(());
    }

    let types = service.types.fetch_all()?;
    msg_print!(Message::SetsHeader(date.to_string()), true);
    View::sets(&sets, &types).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
