#![cfg(test)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{Extension, Router};
use chrono::Utc;
use fake::{faker::name::en::Name, Fake};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::activity_reports::models::{
    ActivityReport, MemberSnapshot, MemberSubmission, Period, ReportFields, ReportKey, RosterRow,
};
use crate::features::activity_reports::store::ReportStore;
use crate::features::auth::model::AuthenticatedUser;

pub fn member_user(name: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        member_id: Uuid::new_v4(),
        display_name: name.to_string(),
        role: "COLIH".to_string(),
        privileged: false,
    }
}

pub fn admin_user(name: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        member_id: Uuid::new_v4(),
        display_name: name.to_string(),
        role: "ADMIN".to_string(),
        privileged: true,
    }
}

/// A non-privileged member with a generated name
pub fn fake_member() -> AuthenticatedUser {
    let name: String = Name().fake();
    member_user(&name)
}

/// Attach `user` to every request, standing in for `auth_middleware`
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(Extension(user))
}

#[derive(Debug, Clone)]
struct StoredMember {
    name: String,
    role: String,
    whatsapp: Option<String>,
}

/// In-memory `ReportStore` with the same keying and ordering rules as Postgres
#[derive(Default)]
pub struct InMemoryReportStore {
    members: RwLock<HashMap<Uuid, StoredMember>>,
    reports: RwLock<HashMap<ReportKey, ActivityReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a member the way the external registry would
    pub async fn add_member(&self, id: Uuid, name: &str, role: &str, whatsapp: Option<&str>) {
        self.members.write().await.insert(
            id,
            StoredMember {
                name: name.to_string(),
                role: role.to_string(),
                whatsapp: whatsapp.map(str::to_string),
            },
        );
    }

    pub async fn report_count(&self) -> usize {
        self.reports.read().await.len()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn find_report(&self, key: &ReportKey) -> Result<Option<ActivityReport>> {
        Ok(self.reports.read().await.get(key).cloned())
    }

    async fn upsert_member(&self, member: &MemberSnapshot) -> Result<()> {
        let mut members = self.members.write().await;
        let entry = members.entry(member.id).or_insert_with(|| StoredMember {
            name: String::new(),
            role: String::new(),
            whatsapp: None,
        });
        entry.name = member.name.clone();
        entry.role = member.role.clone();
        Ok(())
    }

    async fn upsert_report(
        &self,
        key: &ReportKey,
        fields: &ReportFields,
    ) -> Result<ActivityReport> {
        let now = Utc::now();
        let mut reports = self.reports.write().await;

        let (id, created_at) = reports
            .get(key)
            .map(|existing| (existing.id, existing.created_at))
            .unwrap_or_else(|| (Uuid::new_v4(), now));

        let report = ActivityReport {
            id,
            member_id: key.member_id,
            period: key.period,
            solo_visits: fields.solo_visits,
            shared_visits: fields.shared_visits,
            partner_names: fields.partner_names.clone(),
            preventive_visits: fields.preventive_visits,
            created_at,
            submitted_at: now,
        };
        reports.insert(*key, report.clone());
        Ok(report)
    }

    async fn list_period_reports(&self, period: Period) -> Result<Vec<RosterRow>> {
        let members = self.members.read().await;
        let reports = self.reports.read().await;

        let mut rows: Vec<RosterRow> = reports
            .values()
            .filter(|r| r.period == period)
            .filter_map(|r| {
                members.get(&r.member_id).map(|m| RosterRow {
                    report: r.clone(),
                    member_name: m.name.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|row| row.member_name.to_lowercase());
        Ok(rows)
    }

    async fn list_year_reports(
        &self,
        year: i32,
        member_id: Option<Uuid>,
    ) -> Result<Vec<ActivityReport>> {
        let mut reports: Vec<ActivityReport> = self
            .reports
            .read()
            .await
            .values()
            .filter(|r| r.period.year() == year)
            .filter(|r| member_id.map_or(true, |id| r.member_id == id))
            .cloned()
            .collect();
        reports.sort_by_key(|r| r.period);
        Ok(reports)
    }

    async fn list_reporting_members(
        &self,
        period: Period,
        roles: &[String],
    ) -> Result<Vec<MemberSubmission>> {
        let members = self.members.read().await;
        let reports = self.reports.read().await;

        let mut rows: Vec<MemberSubmission> = members
            .iter()
            .filter(|(_, m)| roles.contains(&m.role.to_uppercase()))
            .map(|(id, m)| MemberSubmission {
                member_id: *id,
                member_name: m.name.clone(),
                whatsapp: m.whatsapp.clone(),
                delivered_at: reports
                    .get(&ReportKey::new(*id, period))
                    .map(|r| r.created_at),
            })
            .collect();
        rows.sort_by_key(|row| row.member_name.to_lowercase());
        Ok(rows)
    }
}
