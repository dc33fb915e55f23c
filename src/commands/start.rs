//! Session start command.
//!
//! Opens today's session, resuming the existing one when the day already
//! started. The expiry sweep for stale sessions runs first, so a session
//! forgotten open yesterday gets closed before a new day begins.

use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::{msg_info, msg_print, msg_warning};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let mut service = SessionService::new()?;

    // Make sure defaults exist even when init was never run
    service.types.ensure_defaults()?;

    if service.check_and_expire()? {
        msg_info!(Message::SessionsExpired);
    }

    let had_session = service.get_today()?.is_some();
    let session = service.start_session()?;

    if session.is_open() {
        if had_session {
            msg_print!(Message::SessionResumed(session.session_date.to_string()));
        } else {
            msg_print!(Message::SessionStarted(session.session_date.to_string()));
        }
    } else {
        // Today's session was already ended; continue is the explicit way back in
        msg_warning!(Message::Custom(
            "Today's session is already completed. Use 'ajr continue' to reopen it, or 'ajr log' to keep adding sets.".to_string()
        ));
    }

    Ok(())
}
