use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::activity_reports::models::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Done,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberSubmissionDto {
    pub member_id: Uuid,
    pub member_name: String,
    pub status: SubmissionStatus,
    /// When the member first submitted for the period
    pub delivered_at: Option<DateTime<Utc>>,
    pub whatsapp: Option<String>,
    /// Ready-to-open WhatsApp reminder, only for pending members with a number
    pub reminder_link: Option<String>,
}

/// Who has and has not delivered a report for a period
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionOverviewDto {
    #[schema(value_type = String, example = "2026-01")]
    pub period: Period,
    pub total_members: i64,
    pub delivered: i64,
    pub pending: i64,
    pub members: Vec<MemberSubmissionDto>,
}

impl SubmissionOverviewDto {
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            total_members: 0,
            delivered: 0,
            pending: 0,
            members: Vec::new(),
        }
    }
}
