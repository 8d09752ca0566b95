use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::activity_reports::aggregation::{CaseTotals, HistoryScope};
use crate::features::activity_reports::models::{ActivityReport, Period, ReportFields, RosterRow};

// ============================================================================
// Query parameters
// ============================================================================

/// `?period=YYYY-MM`, defaulting to the current month
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PeriodQuery {
    /// Reporting period (YYYY-MM). Defaults to the current month.
    #[param(example = "2026-01")]
    pub period: Option<String>,
}

impl PeriodQuery {
    pub fn resolve(&self) -> Result<Period> {
        match &self.period {
            Some(raw) => parse_period(raw),
            None => Ok(Period::current()),
        }
    }
}

/// Parse a period coming from a request
pub fn parse_period(raw: &str) -> Result<Period> {
    raw.parse::<Period>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Calendar year. Defaults to the current year.
    #[param(example = 2026)]
    pub year: Option<i32>,

    /// Restrict to one member (only honored for privileged callers)
    pub member_id: Option<Uuid>,
}

impl HistoryQuery {
    pub fn resolve_year(&self) -> Result<i32> {
        let year = self.year.unwrap_or_else(|| Period::current().year());
        Period::check_year(year).map_err(|e| AppError::Validation(e.to_string()))
    }
}

// ============================================================================
// Submission
// ============================================================================

/// Request body for submitting a month's report.
///
/// Counts accept numbers or numeric strings; anything negative, non-numeric
/// or missing is stored as 0.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SubmitActivityReportDto {
    #[serde(default, deserialize_with = "lenient_count")]
    #[schema(value_type = i64, example = 3)]
    pub solo_visits: i64,

    #[serde(default, deserialize_with = "lenient_count")]
    #[schema(value_type = i64, example = 2)]
    pub shared_visits: i64,

    #[serde(default, deserialize_with = "lenient_count")]
    #[schema(value_type = i64, example = 5)]
    pub preventive_visits: i64,

    /// Free-text names of the partners in shared cases
    #[serde(default)]
    #[validate(length(max = 500, message = "Partner names must not exceed 500 characters"))]
    pub partner_names: String,
}

impl From<SubmitActivityReportDto> for ReportFields {
    fn from(dto: SubmitActivityReportDto) -> Self {
        ReportFields::coerced(
            dto.solo_visits,
            dto.shared_visits,
            dto.preventive_visits,
            &dto.partner_names,
        )
    }
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(count_from_value).unwrap_or(0))
}

/// Read a count out of loosely typed JSON
pub fn count_from_value(value: &Value) -> i64 {
    let count = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    };

    count.unwrap_or(0).max(0)
}

// ============================================================================
// Responses
// ============================================================================

/// A member's report for one period (all zeros when nothing was submitted)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityReportDto {
    /// Absent when the member has not submitted for this period
    pub id: Option<Uuid>,
    pub member_id: Uuid,
    #[schema(value_type = String, example = "2026-01")]
    pub period: Period,
    pub solo_visits: i32,
    pub shared_visits: i32,
    pub partner_names: String,
    pub preventive_visits: i32,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ActivityReportDto {
    pub fn empty(member_id: Uuid, period: Period) -> Self {
        Self {
            id: None,
            member_id,
            period,
            solo_visits: 0,
            shared_visits: 0,
            partner_names: String::new(),
            preventive_visits: 0,
            submitted_at: None,
        }
    }
}

impl From<ActivityReport> for ActivityReportDto {
    fn from(r: ActivityReport) -> Self {
        Self {
            id: Some(r.id),
            member_id: r.member_id,
            period: r.period,
            solo_visits: r.solo_visits,
            shared_visits: r.shared_visits,
            partner_names: r.partner_names,
            preventive_visits: r.preventive_visits,
            submitted_at: Some(r.submitted_at),
        }
    }
}

/// Summed counters plus the adjusted case total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CaseTotalsDto {
    pub solo_total: i64,
    pub shared_total: i64,
    pub preventive_total: i64,
    pub adjusted_total: i64,
}

impl CaseTotalsDto {
    pub fn new(totals: CaseTotals, adjusted_total: i64) -> Self {
        Self {
            solo_total: totals.solo,
            shared_total: totals.shared,
            preventive_total: totals.preventive,
            adjusted_total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterEntryDto {
    pub member_id: Uuid,
    pub member_name: String,
    pub solo_visits: i32,
    pub shared_visits: i32,
    pub partner_names: String,
    pub preventive_visits: i32,
    pub submitted_at: DateTime<Utc>,
}

impl From<RosterRow> for RosterEntryDto {
    fn from(row: RosterRow) -> Self {
        Self {
            member_id: row.report.member_id,
            member_name: row.member_name,
            solo_visits: row.report.solo_visits,
            shared_visits: row.report.shared_visits,
            partner_names: row.report.partner_names,
            preventive_visits: row.report.preventive_visits,
            submitted_at: row.report.submitted_at,
        }
    }
}

/// Every submission for a period, ordered by member name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeriodRosterDto {
    #[schema(value_type = String, example = "2026-01")]
    pub period: Period,
    pub entries: Vec<RosterEntryDto>,
    pub totals: CaseTotalsDto,
}

impl PeriodRosterDto {
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            entries: Vec::new(),
            totals: CaseTotalsDto::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HistoryScopeDto {
    AllMembers,
    Member,
}

impl From<HistoryScope> for HistoryScopeDto {
    fn from(scope: HistoryScope) -> Self {
        match scope {
            HistoryScope::AllMembers => HistoryScopeDto::AllMembers,
            HistoryScope::Member(_) => HistoryScopeDto::Member,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyHistoryRowDto {
    #[schema(value_type = String, example = "2026-01")]
    pub period: Period,
    #[serde(flatten)]
    pub totals: CaseTotalsDto,
}

/// Year-to-date table: one row per month with reports, plus the year's totals
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnnualHistoryDto {
    pub year: i32,
    pub scope: HistoryScopeDto,
    /// Set when the history covers a single member
    pub member_id: Option<Uuid>,
    pub months: Vec<MonthlyHistoryRowDto>,
    pub totals: CaseTotalsDto,
}
