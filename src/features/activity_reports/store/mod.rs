//! Persistence seam for activity reports.
//!
//! The services only ever talk to [`ReportStore`]; `PgReportStore` is the
//! production implementation.

mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::activity_reports::models::{
    ActivityReport, MemberSnapshot, MemberSubmission, Period, ReportFields, ReportKey, RosterRow,
};

pub use postgres::PgReportStore;

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Equality lookup by `(member_id, period)`
    async fn find_report(&self, key: &ReportKey) -> Result<Option<ActivityReport>>;

    /// Insert or refresh the member's name and role, leaving other member data alone
    async fn upsert_member(&self, member: &MemberSnapshot) -> Result<()>;

    /// Insert or fully replace the report stored under `key`.
    ///
    /// A replacement keeps `created_at` and refreshes `submitted_at`.
    async fn upsert_report(&self, key: &ReportKey, fields: &ReportFields)
        -> Result<ActivityReport>;

    /// Every report for `period` with the submitter's name
    async fn list_period_reports(&self, period: Period) -> Result<Vec<RosterRow>>;

    /// Reports whose period falls in `year`, optionally for one member only
    async fn list_year_reports(
        &self,
        year: i32,
        member_id: Option<Uuid>,
    ) -> Result<Vec<ActivityReport>>;

    /// Members holding one of `roles` (upper-case), each with their delivery for `period`
    async fn list_reporting_members(
        &self,
        period: Period,
        roles: &[String],
    ) -> Result<Vec<MemberSubmission>>;
}
