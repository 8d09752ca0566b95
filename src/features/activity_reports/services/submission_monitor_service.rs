use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::error::Result;
use crate::features::activity_reports::dtos::{
    MemberSubmissionDto, SubmissionOverviewDto, SubmissionStatus,
};
use crate::features::activity_reports::models::{MemberSubmission, Period};
use crate::features::activity_reports::reminders::ReminderPolicy;
use crate::features::activity_reports::store::ReportStore;
use crate::features::auth::model::AuthenticatedUser;

/// Tracks which reporting members have delivered for a period
pub struct SubmissionMonitorService {
    store: Arc<dyn ReportStore>,
    reporting_roles: Vec<String>,
    reminders: ReminderPolicy,
}

impl SubmissionMonitorService {
    pub fn new(
        store: Arc<dyn ReportStore>,
        reporting_roles: impl IntoIterator<Item = impl AsRef<str>>,
        reminders: ReminderPolicy,
    ) -> Self {
        Self {
            store,
            reporting_roles: reporting_roles
                .into_iter()
                .map(|role| role.as_ref().trim().to_uppercase())
                .filter(|role| !role.is_empty())
                .collect(),
            reminders,
        }
    }

    /// Delivery status of every reporting member for `period`.
    ///
    /// `today` picks the reminder wording. Unprivileged callers get an empty overview.
    pub async fn get_submission_status(
        &self,
        caller: &AuthenticatedUser,
        period: Period,
        today: NaiveDate,
    ) -> Result<SubmissionOverviewDto> {
        if !caller.privileged {
            return Ok(SubmissionOverviewDto::empty(period));
        }

        let mut rows = self
            .store
            .list_reporting_members(period, &self.reporting_roles)
            .await?;
        rows.sort_by_cached_key(|row| row.member_name.to_lowercase());

        let members: Vec<MemberSubmissionDto> = rows
            .into_iter()
            .map(|row| self.to_dto(row, period, today))
            .collect();

        let delivered = members
            .iter()
            .filter(|m| m.status == SubmissionStatus::Done)
            .count() as i64;
        let total_members = members.len() as i64;

        tracing::debug!(
            "Submission status for {}: {}/{} delivered",
            period,
            delivered,
            total_members
        );

        Ok(SubmissionOverviewDto {
            period,
            total_members,
            delivered,
            pending: total_members - delivered,
            members,
        })
    }

    fn to_dto(&self, row: MemberSubmission, period: Period, today: NaiveDate) -> MemberSubmissionDto {
        let status = match row.delivered_at {
            Some(_) => SubmissionStatus::Done,
            None => SubmissionStatus::Pending,
        };

        let reminder_link = match (status, row.whatsapp.as_deref()) {
            (SubmissionStatus::Pending, Some(phone)) => {
                let message = self.reminders.message(&row.member_name, period, today);
                self.reminders.whatsapp_link(phone, &message)
            }
            _ => None,
        };

        MemberSubmissionDto {
            member_id: row.member_id,
            member_name: row.member_name,
            status,
            delivered_at: row.delivered_at,
            whatsapp: row.whatsapp,
            reminder_link,
        }
    }
}
