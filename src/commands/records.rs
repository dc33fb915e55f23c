//! Personal records and all-time breakdown command.

use crate::libs::calculations::{find_personal_records, ibadah_breakdown};
use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let mut service = SessionService::new()?;

    let sessions = service.sessions.fetch_all()?;
    let sets = service.sets.fetch_all()?;
    let types = service.types.fetch_all()?;

    if sets.is_empty() {
        msg_print!(Message::NoDataToShow);
        return Ok(());
    }

    let records = find_personal_records(&sessions, &sets);
    msg_print!(Message::RecordsHeader, true);
    View::records(&records, &types).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let breakdown = ibadah_breakdown(&sets, &types);
    msg_print!(Message::BreakdownHeader, true);
    View::breakdown(&breakdown, &types).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}
