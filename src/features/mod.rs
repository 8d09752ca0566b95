pub mod activity_reports;
pub mod auth;
