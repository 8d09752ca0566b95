mod activity_report_service;
mod submission_monitor_service;

pub use activity_report_service::ActivityReportService;
pub use submission_monitor_service::SubmissionMonitorService;
