pub mod activity_report_handler;
pub mod submission_status_handler;

pub use activity_report_handler::*;
pub use submission_status_handler::*;
