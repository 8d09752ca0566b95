use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::Period;

/// Database model for one member's submission for one month
#[derive(Debug, Clone, FromRow)]
pub struct ActivityReport {
    pub id: Uuid,
    pub member_id: Uuid,
    #[sqlx(try_from = "String")]
    pub period: Period,
    pub solo_visits: i32,
    pub shared_visits: i32,
    pub partner_names: String,
    pub preventive_visits: i32,
    pub created_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

/// A report joined with its submitter's display name
#[derive(Debug, Clone, FromRow)]
pub struct RosterRow {
    #[sqlx(flatten)]
    pub report: ActivityReport,
    pub member_name: String,
}

/// Storage key: at most one report exists per key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub member_id: Uuid,
    pub period: Period,
}

impl ReportKey {
    pub fn new(member_id: Uuid, period: Period) -> Self {
        Self { member_id, period }
    }
}

/// Submitted values, already coerced to storable form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFields {
    pub solo_visits: i32,
    pub shared_visits: i32,
    pub preventive_visits: i32,
    pub partner_names: String,
}

impl ReportFields {
    /// Build fields from raw counts; negatives become 0 and large values saturate.
    pub fn coerced(solo: i64, shared: i64, preventive: i64, partner_names: &str) -> Self {
        Self {
            solo_visits: clamp_count(solo),
            shared_visits: clamp_count(shared),
            preventive_visits: clamp_count(preventive),
            partner_names: partner_names.trim().to_string(),
        }
    }
}

fn clamp_count(value: i64) -> i32 {
    value.clamp(0, i64::from(i32::MAX)) as i32
}
