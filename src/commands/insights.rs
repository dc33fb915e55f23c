//! Insights command: overload suggestions and the burnout check.
//!
//! Suggestions only appear after two consistent weeks of logging; the
//! burnout check compares the last seven days against the seven before
//! that. Both read the same history snapshot, so one command surfaces the
//! push and the brake together.

use crate::libs::burnout::detect_burnout;
use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::libs::suggestions::generate_overload_suggestions;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::Local;
use rand::thread_rng;

pub fn cmd() -> Result<()> {
    let mut service = SessionService::new()?;

    let today = Local::now().date_naive();
    let sessions = service.sessions.fetch_all()?;
    let sets = service.sets.fetch_all()?;
    let types = service.types.fetch_all()?;

    let suggestions = generate_overload_suggestions(&sessions, &sets, &types, today, &mut thread_rng());
    msg_print!(Message::SuggestionsHeader, true);
    if suggestions.is_empty() {
        msg_print!(Message::NoSuggestions);
    } else {
        View::suggestions(&suggestions).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    }

    let warning = detect_burnout(&sessions, &sets, today);
    msg_print!(Message::BurnoutHeader, true);
    if warning.detected {
        View::burnout(&warning).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    } else {
        msg_print!(Message::BurnoutNotDetected);
    }

    Ok(())
}
