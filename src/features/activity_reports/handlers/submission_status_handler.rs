use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};
use chrono::Local;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::activity_reports::dtos::{PeriodQuery, SubmissionOverviewDto};
use crate::features::activity_reports::services::SubmissionMonitorService;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;

/// Delivery status of every reporting member for a period
///
/// Pending members with a WhatsApp number get a ready-made reminder link.
/// Callers without a privileged role receive an empty overview.
#[utoipa::path(
    get,
    path = "/api/activity-reports/submissions",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Submission overview", body = ApiResponse<SubmissionOverviewDto>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "activity-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_submission_status(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionMonitorService>>,
    AppQuery(query): AppQuery<PeriodQuery>,
) -> Result<Json<ApiResponse<SubmissionOverviewDto>>> {
    let period = query.resolve()?;
    let today = Local::now().date_naive();

    let overview = service.get_submission_status(&user, period, today).await?;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}
