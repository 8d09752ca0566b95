//! Activity report routes

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::activity_reports::handlers;
use crate::features::activity_reports::services::{
    ActivityReportService, SubmissionMonitorService,
};

/// Create routes for the activity reports feature
///
/// Every route expects `auth_middleware` to have stored the caller identity.
pub fn routes(
    report_service: Arc<ActivityReportService>,
    monitor_service: Arc<SubmissionMonitorService>,
) -> Router {
    let reports = Router::new()
        .route("/api/activity-reports/own", get(handlers::get_own_report))
        .route(
            "/api/activity-reports/own/{period}",
            put(handlers::submit_report),
        )
        .route(
            "/api/activity-reports/roster",
            get(handlers::get_period_roster),
        )
        .route(
            "/api/activity-reports/history",
            get(handlers::get_annual_history),
        )
        .with_state(report_service);

    let monitoring = Router::new()
        .route(
            "/api/activity-reports/submissions",
            get(handlers::get_submission_status),
        )
        .with_state(monitor_service);

    reports.merge(monitoring)
}
