//! Activity report handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::activity_reports::dtos::{
    parse_period, ActivityReportDto, AnnualHistoryDto, HistoryQuery, PeriodQuery,
    PeriodRosterDto, SubmitActivityReportDto,
};
use crate::features::activity_reports::services::ActivityReportService;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::{ApiResponse, Meta};

/// Get the caller's report for a period
///
/// Returns an all-zero report when nothing has been submitted yet.
#[utoipa::path(
    get,
    path = "/api/activity-reports/own",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Caller's report", body = ApiResponse<ActivityReportDto>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "activity-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_own_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ActivityReportService>>,
    AppQuery(query): AppQuery<PeriodQuery>,
) -> Result<Json<ApiResponse<ActivityReportDto>>> {
    let period = query.resolve()?;
    let report = service.get_own_report(user.member_id, period).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Submit or replace the caller's report for a period
#[utoipa::path(
    put,
    path = "/api/activity-reports/own/{period}",
    params(
        ("period" = String, Path, description = "Reporting period (YYYY-MM)", example = "2026-01")
    ),
    request_body = SubmitActivityReportDto,
    responses(
        (status = 200, description = "Report saved", body = ApiResponse<ActivityReportDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "activity-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ActivityReportService>>,
    Path(period): Path<String>,
    AppJson(dto): AppJson<SubmitActivityReportDto>,
) -> Result<Json<ApiResponse<ActivityReportDto>>> {
    let period = parse_period(&period)?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.submit_report(&user, period, dto.into()).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Relatório salvo com sucesso!".to_string()),
        None,
    )))
}

/// List every submission for a period with cross-member totals
///
/// Callers without a privileged role receive an empty roster.
#[utoipa::path(
    get,
    path = "/api/activity-reports/roster",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Period roster", body = ApiResponse<PeriodRosterDto>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "activity-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_period_roster(
    user: AuthenticatedUser,
    State(service): State<Arc<ActivityReportService>>,
    AppQuery(query): AppQuery<PeriodQuery>,
) -> Result<Json<ApiResponse<PeriodRosterDto>>> {
    let period = query.resolve()?;
    let roster = service.get_period_roster(&user, period).await?;
    let total = roster.entries.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(roster),
        None,
        Some(Meta { total }),
    )))
}

/// Month-by-month totals for a year
#[utoipa::path(
    get,
    path = "/api/activity-reports/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Annual history", body = ApiResponse<AnnualHistoryDto>),
        (status = 400, description = "Invalid year"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "activity-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_annual_history(
    user: AuthenticatedUser,
    State(service): State<Arc<ActivityReportService>>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> Result<Json<ApiResponse<AnnualHistoryDto>>> {
    let year = query.resolve_year()?;
    let history = service
        .get_annual_history(&user, year, query.member_id)
        .await?;
    Ok(Json(ApiResponse::success(Some(history), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::middleware::body_limit_layer;
    use crate::features::activity_reports::dtos::{
        ActivityReportDto, AnnualHistoryDto, PeriodRosterDto,
    };
    use crate::features::activity_reports::reminders::ReminderPolicy;
    use crate::features::activity_reports::routes::routes;
    use crate::features::activity_reports::services::{
        ActivityReportService, SubmissionMonitorService,
    };
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{admin_user, fake_member, with_user, InMemoryReportStore};
    use crate::shared::types::ApiResponse;
    use std::sync::Arc;

    fn server(store: Arc<InMemoryReportStore>, user: Option<AuthenticatedUser>) -> TestServer {
        let router = routes(
            Arc::new(ActivityReportService::new(store.clone())),
            Arc::new(SubmissionMonitorService::new(
                store,
                ["ADMIN", "COLIH"],
                ReminderPolicy::new(10, "55"),
            )),
        );
        let router = match user {
            Some(user) => with_user(router, user),
            None => router,
        };
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_requires_identity() {
        let server = server(InMemoryReportStore::new(), None);

        let response = server.get("/api/activity-reports/own").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_period_is_rejected() {
        let server = server(InMemoryReportStore::new(), Some(fake_member()));

        server
            .get("/api/activity-reports/own")
            .add_query_param("period", "2026-13")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put("/api/activity-reports/own/2026-1")
            .json(&json!({ "solo_visits": 1 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_year_is_rejected() {
        let server = server(InMemoryReportStore::new(), Some(fake_member()));

        server
            .get("/api/activity-reports/history")
            .add_query_param("year", 10000)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_query_uses_envelope() {
        let server = server(InMemoryReportStore::new(), Some(fake_member()));

        let response = server
            .get("/api/activity-reports/history")
            .add_query_param("year", "abc")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: ApiResponse<()> = response.json();
        assert!(!body.success);
        assert!(body.message.unwrap().starts_with("Invalid query parameters"));

        server
            .get("/api/activity-reports/history")
            .add_query_param("member_id", "not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let store = InMemoryReportStore::new();
        let router = routes(
            Arc::new(ActivityReportService::new(store.clone())),
            Arc::new(SubmissionMonitorService::new(
                store.clone(),
                ["ADMIN", "COLIH"],
                ReminderPolicy::new(10, "55"),
            )),
        )
        .layer(body_limit_layer(64));
        let server = TestServer::new(with_user(router, fake_member())).unwrap();

        let response = server
            .put("/api/activity-reports/own/2026-01")
            .json(&json!({ "partner_names": "x".repeat(200) }))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        let body: ApiResponse<()> = response.json();
        assert!(!body.success);
        assert_eq!(store.report_count().await, 0);
    }

    #[tokio::test]
    async fn test_submit_then_read_own_report() {
        let member = fake_member();
        let server = server(InMemoryReportStore::new(), Some(member.clone()));

        server
            .put("/api/activity-reports/own/2026-01")
            .json(&json!({
                "solo_visits": "3",
                "shared_visits": 2,
                "preventive_visits": -1,
                "partner_names": "  Ana  "
            }))
            .await
            .assert_status_ok();

        let response = server
            .get("/api/activity-reports/own")
            .add_query_param("period", "2026-01")
            .await;
        response.assert_status_ok();

        let body: ApiResponse<ActivityReportDto> = response.json();
        let report = body.data.unwrap();
        assert_eq!(report.member_id, member.member_id);
        assert_eq!(report.solo_visits, 3);
        assert_eq!(report.shared_visits, 2);
        assert_eq!(report.preventive_visits, 0);
        assert_eq!(report.partner_names, "Ana");
    }

    #[tokio::test]
    async fn test_overlong_partner_names_are_rejected() {
        let server = server(InMemoryReportStore::new(), Some(fake_member()));

        server
            .put("/api/activity-reports/own/2026-01")
            .json(&json!({ "partner_names": "x".repeat(501) }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_roster_is_empty_for_member() {
        let store = InMemoryReportStore::new();
        let member = fake_member();

        server(store.clone(), Some(member.clone()))
            .put("/api/activity-reports/own/2026-01")
            .json(&json!({ "solo_visits": 4 }))
            .await
            .assert_status_ok();

        let body: ApiResponse<PeriodRosterDto> = server(store.clone(), Some(member))
            .get("/api/activity-reports/roster")
            .add_query_param("period", "2026-01")
            .await
            .json();
        assert!(body.data.unwrap().entries.is_empty());

        let body: ApiResponse<PeriodRosterDto> = server(store, Some(admin_user("Admin")))
            .get("/api/activity-reports/roster")
            .add_query_param("period", "2026-01")
            .await
            .json();
        assert_eq!(body.meta.unwrap().total, 1);
        assert_eq!(body.data.unwrap().totals.adjusted_total, 4);
    }

    #[tokio::test]
    async fn test_history_for_caller() {
        let member = fake_member();
        let server = server(InMemoryReportStore::new(), Some(member.clone()));

        server
            .put("/api/activity-reports/own/2026-02")
            .json(&json!({ "solo_visits": 4, "shared_visits": 3 }))
            .await
            .assert_status_ok();

        let body: ApiResponse<AnnualHistoryDto> = server
            .get("/api/activity-reports/history")
            .add_query_param("year", 2026)
            .await
            .json();
        let history = body.data.unwrap();

        assert_eq!(history.member_id, Some(member.member_id));
        assert_eq!(history.months.len(), 1);
        assert_eq!(history.totals.adjusted_total, 7);
    }
}
