//! Set logging command.
//!
//! The fastest path into the tracker: `ajr log quran 5` finds or creates
//! today's session and appends a set, recomputing the session volume in
//! the same call. Ibadah can be addressed by id or by name,
//! case-insensitively.

use crate::libs::formatter::format_volume;
use crate::libs::ibadah::{IbadahType, IbadahUnit};
use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::{msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Ibadah id or name, e.g. 'quran' or 'Dhikr'
    #[arg(required = true)]
    ibadah: String,

    /// Logged amount in the ibadah's unit
    #[arg(required = true)]
    value: f64,

    /// Time spent, in minutes
    #[arg(long, short)]
    duration: Option<u64>,

    #[arg(long, short, help = "Notes to attach to the set")]
    notes: Option<String>,
}

pub fn cmd(args: LogArgs) -> Result<()> {
    let mut service = SessionService::new()?;
    service.types.ensure_defaults()?;

    let Some(ibadah) = resolve_ibadah(&mut service, &args.ibadah)? else {
        msg_error!(Message::IbadahNotFound(args.ibadah));
        return Ok(());
    };

    if args.value <= 0.0 {
        msg_error!(Message::InvalidSetValue(args.value));
        return Ok(());
    }

    // Binary activities record presence, not magnitude
    let value = if ibadah.unit == IbadahUnit::Binary { 1.0 } else { args.value };
    let duration_seconds = args.duration.map(|minutes| (minutes * 60) as i64);

    let session = service.get_or_create_today()?;
    service.add_set(session.id, &ibadah.id, value, duration_seconds, args.notes.as_deref())?;

    msg_success!(Message::SetLogged(
        ibadah.name.clone(),
        format!("{} {}", format_volume(value, ibadah.unit), ibadah.unit.label())
    ));

    Ok(())
}

/// Finds a type by exact id first, then by case-insensitive name.
fn resolve_ibadah(service: &mut SessionService, key: &str) -> Result<Option<IbadahType>> {
    if let Some(ibadah) = service.types.fetch_by_id(key)? {
        return Ok(Some(ibadah));
    }

    let lowered = key.to_lowercase();
    Ok(service
        .types
        .fetch_all()?
        .into_iter()
        .find(|t| t.name.to_lowercase() == lowered))
}
