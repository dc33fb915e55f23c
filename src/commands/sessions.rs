//! Session listing and deletion command.
//!
//! Shows the sessions of a date range, newest first, and deletes a session
//! together with all of its sets after an interactive confirmation.

use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::libs::view::View;
use crate::{msg_print, msg_success};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Range start (YYYY-MM-DD), defaults to 30 days back
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Delete the session with this id (cascades to its sets)
    #[arg(long)]
    delete: Option<i64>,
}

pub fn cmd(args: SessionsArgs) -> Result<()> {
    let mut service = SessionService::new()?;

    if let Some(session_id) = args.delete {
        return delete_session(&mut service, session_id);
    }

    let to = args.to.unwrap_or_else(|| Local::now().date_naive());
    let from = args.from.unwrap_or(to - Duration::days(30));

    let sessions = service.sessions.fetch_range(from, to)?;
    if sessions.is_empty() {
        msg_print!(Message::NoSessionsInRange(from.to_string(), to.to_string()));
        return Ok(());
    }

    msg_print!(Message::SessionsHeader(from.to_string(), to.to_string()), true);
    View::sessions(&sessions).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}

fn delete_session(service: &mut SessionService, session_id: i64) -> Result<()> {
    let Some(session) = service.sessions.fetch_by_id(session_id)? else {
        msg_print!(Message::SessionNotFound(session_id));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteSession(session.session_date.to_string()).to_string())
        .default(false)
        .interact()?;

    if confirmed && service.delete_session(session_id)? {
        msg_success!(Message::SessionDeleted(session_id));
    }

    Ok(())
}
