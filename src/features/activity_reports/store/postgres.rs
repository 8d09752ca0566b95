use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ReportStore;
use crate::core::error::{AppError, Result};
use crate::features::activity_reports::models::{
    ActivityReport, MemberSnapshot, MemberSubmission, Period, ReportFields, ReportKey, RosterRow,
};

const REPORT_COLUMNS: &str = r#"
    r.id, r.member_id, r.period, r.solo_visits, r.shared_visits,
    r.partner_names, r.preventive_visits, r.created_at, r.submitted_at
"#;

/// PostgreSQL-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn find_report(&self, key: &ReportKey) -> Result<Option<ActivityReport>> {
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM activity_reports r WHERE r.member_id = $1 AND r.period = $2"
        );

        sqlx::query_as::<_, ActivityReport>(&sql)
            .bind(key.member_id)
            .bind(key.period.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch activity report: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn upsert_member(&self, member: &MemberSnapshot) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members (id, name, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, role = EXCLUDED.role, updated_at = NOW()
            "#,
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(&member.role)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert member {}: {:?}", member.id, e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn upsert_report(
        &self,
        key: &ReportKey,
        fields: &ReportFields,
    ) -> Result<ActivityReport> {
        let sql = format!(
            r#"
            INSERT INTO activity_reports AS r (
                member_id, period, solo_visits, shared_visits, partner_names, preventive_visits
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (member_id, period) DO UPDATE
            SET solo_visits = EXCLUDED.solo_visits,
                shared_visits = EXCLUDED.shared_visits,
                partner_names = EXCLUDED.partner_names,
                preventive_visits = EXCLUDED.preventive_visits,
                submitted_at = NOW()
            RETURNING {REPORT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ActivityReport>(&sql)
            .bind(key.member_id)
            .bind(key.period.to_string())
            .bind(fields.solo_visits)
            .bind(fields.shared_visits)
            .bind(&fields.partner_names)
            .bind(fields.preventive_visits)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to upsert activity report: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_period_reports(&self, period: Period) -> Result<Vec<RosterRow>> {
        let sql = format!(
            r#"
            SELECT {REPORT_COLUMNS}, m.name AS member_name
            FROM activity_reports r
            JOIN members m ON m.id = r.member_id
            WHERE r.period = $1
            ORDER BY LOWER(m.name) ASC
            "#
        );

        sqlx::query_as::<_, RosterRow>(&sql)
            .bind(period.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports for {}: {:?}", period, e);
                AppError::Database(e)
            })
    }

    async fn list_year_reports(
        &self,
        year: i32,
        member_id: Option<Uuid>,
    ) -> Result<Vec<ActivityReport>> {
        let sql = format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM activity_reports r
            WHERE r.period LIKE $1
              AND ($2::uuid IS NULL OR r.member_id = $2)
            ORDER BY r.period ASC
            "#
        );

        sqlx::query_as::<_, ActivityReport>(&sql)
            .bind(format!("{}%", Period::year_prefix(year)))
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports for year {}: {:?}", year, e);
                AppError::Database(e)
            })
    }

    async fn list_reporting_members(
        &self,
        period: Period,
        roles: &[String],
    ) -> Result<Vec<MemberSubmission>> {
        sqlx::query_as::<_, MemberSubmission>(
            r#"
            SELECT
                m.id AS member_id,
                m.name AS member_name,
                m.whatsapp,
                r.created_at AS delivered_at
            FROM members m
            LEFT JOIN activity_reports r ON r.member_id = m.id AND r.period = $1
            WHERE UPPER(m.role) = ANY($2)
            ORDER BY LOWER(m.name) ASC
            "#,
        )
        .bind(period.to_string())
        .bind(roles)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reporting members for {}: {:?}", period, e);
            AppError::Database(e)
        })
    }
}
