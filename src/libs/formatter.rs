//! Value and duration formatting for user-friendly display.
//!
//! Small pure helpers used by table views, log confirmations and data
//! export so that every surface renders amounts the same way.

use crate::libs::ibadah::IbadahUnit;

/// Formats a logged value for display in its unit.
///
/// Currency keeps two decimals, whole numbers drop the fraction, anything
/// else keeps one decimal.
///
/// # Examples
///
/// ```rust
/// use ajr::libs::formatter::format_volume;
/// use ajr::libs::ibadah::IbadahUnit;
///
/// assert_eq!(format_volume(5.0, IbadahUnit::Pages), "5");
/// assert_eq!(format_volume(2.5, IbadahUnit::Minutes), "2.5");
/// assert_eq!(format_volume(10.0, IbadahUnit::Currency), "$10.00");
/// ```
pub fn format_volume(value: f64, unit: IbadahUnit) -> String {
    if unit == IbadahUnit::Currency {
        return format!("${:.2}", value);
    }

    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Formats a second count the way the session views expect.
///
/// Hours drop the seconds, minutes keep them, sub-minute values show
/// seconds only.
///
/// # Examples
///
/// ```rust
/// use ajr::libs::formatter::format_duration;
///
/// assert_eq!(format_duration(3900), "1h 5m");
/// assert_eq!(format_duration(90), "1m 30s");
/// assert_eq!(format_duration(45), "45s");
/// ```
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
