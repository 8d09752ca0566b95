use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::activity_reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::auth;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Activity reports
        reports_handlers::activity_report_handler::get_own_report,
        reports_handlers::activity_report_handler::submit_report,
        reports_handlers::activity_report_handler::get_period_roster,
        reports_handlers::activity_report_handler::get_annual_history,
        // Submission monitoring
        reports_handlers::submission_status_handler::get_submission_status,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            // Activity reports
            reports_dtos::SubmitActivityReportDto,
            reports_dtos::ActivityReportDto,
            reports_dtos::CaseTotalsDto,
            reports_dtos::RosterEntryDto,
            reports_dtos::PeriodRosterDto,
            reports_dtos::HistoryScopeDto,
            reports_dtos::MonthlyHistoryRowDto,
            reports_dtos::AnnualHistoryDto,
            ApiResponse<reports_dtos::ActivityReportDto>,
            ApiResponse<reports_dtos::PeriodRosterDto>,
            ApiResponse<reports_dtos::AnnualHistoryDto>,
            // Submission monitoring
            reports_dtos::SubmissionStatus,
            reports_dtos::MemberSubmissionDto,
            reports_dtos::SubmissionOverviewDto,
            ApiResponse<reports_dtos::SubmissionOverviewDto>,
        )
    ),
    tags(
        (name = "activity-reports", description = "Monthly COLIH activity reports and submission monitoring"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "COLIH API",
        version = "0.1.0",
        description = "API documentation for COLIH activity reports",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_report_paths() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/activity-reports/own",
            "/api/activity-reports/own/{period}",
            "/api/activity-reports/roster",
            "/api/activity-reports/history",
            "/api/activity-reports/submissions",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }

        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Relatórios".to_string(),
            version: "2.0.0".to_string(),
            description: "docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Relatórios");
        assert_eq!(doc.info.description.as_deref(), Some("docs"));
    }
}
