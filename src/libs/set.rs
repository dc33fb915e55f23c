use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One logged occurrence of an ibadah within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSet {
    pub id: i64,
    pub session_id: i64,
    pub ibadah_type_id: String,
    pub value: f64,
    pub duration_seconds: Option<i64>,
    pub notes: Option<String>,
    pub set_order: i64,
    pub logged_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update applied to an existing set. `None` fields are left as is.
#[derive(Debug, Clone, Default)]
pub struct SetUpdate {
    pub value: Option<f64>,
    pub duration_seconds: Option<i64>,
    pub notes: Option<String>,
}
