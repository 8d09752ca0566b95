use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::activity_reports::aggregation::{
    adjust_roster_total, totals_by_month, CaseTotals, HistoryScope,
};
use crate::features::activity_reports::dtos::{
    ActivityReportDto, AnnualHistoryDto, CaseTotalsDto, MonthlyHistoryRowDto, PeriodRosterDto,
    RosterEntryDto,
};
use crate::features::activity_reports::models::{MemberSnapshot, Period, ReportFields, ReportKey};
use crate::features::activity_reports::store::ReportStore;
use crate::features::auth::model::AuthenticatedUser;

/// Monthly report submission and aggregation
pub struct ActivityReportService {
    store: Arc<dyn ReportStore>,
}

impl ActivityReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// The member's report for `period`, or an all-zero record if none exists yet
    pub async fn get_own_report(&self, member_id: Uuid, period: Period) -> Result<ActivityReportDto> {
        let report = self
            .store
            .find_report(&ReportKey::new(member_id, period))
            .await?;

        Ok(report
            .map(ActivityReportDto::from)
            .unwrap_or_else(|| ActivityReportDto::empty(member_id, period)))
    }

    /// Store the caller's report for `period`, replacing any earlier submission
    pub async fn submit_report(
        &self,
        caller: &AuthenticatedUser,
        period: Period,
        fields: ReportFields,
    ) -> Result<ActivityReportDto> {
        self.store.upsert_member(&MemberSnapshot::from(caller)).await?;

        let report = self
            .store
            .upsert_report(&ReportKey::new(caller.member_id, period), &fields)
            .await?;

        tracing::info!(
            "Activity report saved: member={}, period={}, solo={}, shared={}, preventive={}",
            report.member_id,
            report.period,
            report.solo_visits,
            report.shared_visits,
            report.preventive_visits
        );

        Ok(report.into())
    }

    /// All submissions for `period` with cross-member totals.
    ///
    /// Unprivileged callers get an empty roster rather than an error.
    pub async fn get_period_roster(
        &self,
        caller: &AuthenticatedUser,
        period: Period,
    ) -> Result<PeriodRosterDto> {
        if !caller.privileged {
            return Ok(PeriodRosterDto::empty(period));
        }

        let mut rows = self.store.list_period_reports(period).await?;
        rows.sort_by_cached_key(|row| row.member_name.to_lowercase());

        let totals: CaseTotals = rows.iter().map(|row| CaseTotals::of(&row.report)).sum();
        let adjusted = adjust_roster_total(totals.solo, totals.shared);

        Ok(PeriodRosterDto {
            period,
            entries: rows.into_iter().map(RosterEntryDto::from).collect(),
            totals: CaseTotalsDto::new(totals, adjusted),
        })
    }

    /// Per-month totals for `year` plus the year's grand totals.
    ///
    /// Unprivileged callers always get their own history whatever `member_id` says.
    pub async fn get_annual_history(
        &self,
        caller: &AuthenticatedUser,
        year: i32,
        member_id: Option<Uuid>,
    ) -> Result<AnnualHistoryDto> {
        let scope = Self::history_scope(caller, member_id);

        let reports = self
            .store
            .list_year_reports(year, scope.member_id())
            .await?;
        let months = totals_by_month(reports.iter().filter(|r| r.period.year() == year));

        // Raw sums first, then a single adjustment for the year.
        let grand: CaseTotals = months.values().copied().sum();

        let rows = months
            .into_iter()
            .map(|(period, totals)| MonthlyHistoryRowDto {
                period,
                totals: CaseTotalsDto::new(totals, scope.adjusted_total(&totals)),
            })
            .collect();

        Ok(AnnualHistoryDto {
            year,
            scope: scope.into(),
            member_id: scope.member_id(),
            months: rows,
            totals: CaseTotalsDto::new(grand, scope.adjusted_total(&grand)),
        })
    }

    fn history_scope(caller: &AuthenticatedUser, requested: Option<Uuid>) -> HistoryScope {
        if !caller.privileged {
            return HistoryScope::Member(caller.member_id);
        }

        requested
            .map(HistoryScope::Member)
            .unwrap_or(HistoryScope::AllMembers)
    }
}
