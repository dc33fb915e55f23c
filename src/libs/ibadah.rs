//! Ibadah type definitions and the built-in defaults.
//!
//! An ibadah type describes one trackable worship activity: its measuring
//! unit, its weight (the multiplier that turns a raw logged value into
//! comparable "volume" units) and its registry state. The six default types
//! ship with fixed slug ids so that logged history stays portable across
//! installations; user-created types get generated ids.

use chrono::{Local, NaiveDateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved type id used when an adhkar set completion is logged into the
/// day's session. It is intentionally absent from the registry; volume
/// computation falls back to weight 1 for it.
pub const ADHKAR_TYPE_ID: &str = "adhkar";

/// Measuring unit of an ibadah type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IbadahUnit {
    Pages,
    Minutes,
    Count,
    Currency,
    Binary,
    Ayat,
}

impl IbadahUnit {
    /// Short label used in tables and log confirmations.
    pub fn label(&self) -> &'static str {
        match self {
            IbadahUnit::Pages => "pages",
            IbadahUnit::Minutes => "min",
            IbadahUnit::Count => "x",
            IbadahUnit::Currency => "AED",
            IbadahUnit::Binary => "day",
            IbadahUnit::Ayat => "ayat",
        }
    }
}

impl fmt::Display for IbadahUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IbadahUnit::Pages => "pages",
            IbadahUnit::Minutes => "minutes",
            IbadahUnit::Count => "count",
            IbadahUnit::Currency => "currency",
            IbadahUnit::Binary => "binary",
            IbadahUnit::Ayat => "ayat",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for IbadahUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pages" => Ok(IbadahUnit::Pages),
            "minutes" => Ok(IbadahUnit::Minutes),
            "count" => Ok(IbadahUnit::Count),
            "currency" => Ok(IbadahUnit::Currency),
            "binary" => Ok(IbadahUnit::Binary),
            "ayat" => Ok(IbadahUnit::Ayat),
            other => Err(format!("unknown unit '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbadahType {
    pub id: String,
    pub name: String,
    pub unit: IbadahUnit,
    pub weight: f64,
    pub is_default: bool,
    pub is_archived: bool,
    pub sort_order: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl IbadahType {
    pub fn new(name: &str, unit: IbadahUnit, weight: Option<f64>, sort_order: i64) -> Self {
        let now = Local::now().naive_local();
        IbadahType {
            id: generate_id(),
            name: name.to_string(),
            unit,
            weight: weight.unwrap_or(1.0),
            is_default: false,
            is_archived: false,
            sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied to an existing type. `None` fields are left as is.
#[derive(Debug, Clone, Default)]
pub struct IbadahUpdate {
    pub name: Option<String>,
    pub unit: Option<IbadahUnit>,
    pub weight: Option<f64>,
    pub sort_order: Option<i64>,
}

/// Seed definition of a built-in ibadah type.
pub struct DefaultIbadah {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: IbadahUnit,
    pub weight: f64,
    pub sort_order: i64,
}

/// The six built-in activities and their volume weights.
///
/// The weights encode a rough relative effort scale: one fasted day
/// dominates a normal day's volume, one dhikr repetition barely registers.
pub const DEFAULT_IBADAH_TYPES: &[DefaultIbadah] = &[
    DefaultIbadah {
        id: "quran",
        name: "Quran",
        unit: IbadahUnit::Pages,
        weight: 6.0,
        sort_order: 0,
    },
    DefaultIbadah {
        id: "qiyam",
        name: "Qiyam",
        unit: IbadahUnit::Minutes,
        weight: 4.0,
        sort_order: 1,
    },
    DefaultIbadah {
        id: "dhikr",
        name: "Dhikr",
        unit: IbadahUnit::Count,
        weight: 0.1,
        sort_order: 2,
    },
    DefaultIbadah {
        id: "sadaqah",
        name: "Sadaqah",
        unit: IbadahUnit::Currency,
        weight: 8.0,
        sort_order: 3,
    },
    DefaultIbadah {
        id: "fasting",
        name: "Fasting",
        unit: IbadahUnit::Binary,
        weight: 100.0,
        sort_order: 4,
    },
    DefaultIbadah {
        id: "dua",
        name: "Dua",
        unit: IbadahUnit::Minutes,
        weight: 2.0,
        sort_order: 5,
    },
];

/// Generates a unique id for a user-created ibadah type.
///
/// Base36 millisecond timestamp plus a short random suffix, compact enough
/// for table output while avoiding collisions between quickly repeated
/// creations.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let timestamp = to_base36(millis as u64);
    let random: u32 = rand::thread_rng().gen_range(0..36_u32.pow(5));
    format!("{}-{}", timestamp, to_base36(random as u64))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
