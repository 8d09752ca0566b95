mod activity_report_dto;
mod submission_status_dto;

pub use activity_report_dto::*;
pub use submission_status_dto::*;
