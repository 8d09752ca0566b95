//! Monthly activity reports of COLIH members.
//!
//! Members submit one report per month with their solo, shared and preventive
//! case counts. Privileged members see the whole roster for a month, every
//! member sees a year-to-date history, and privileged members can check who
//! is still missing a report.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/activity-reports/own` | Yes | Caller's report for a period |
//! | PUT | `/api/activity-reports/own/{period}` | Yes | Submit or replace caller's report |
//! | GET | `/api/activity-reports/roster` | Yes (privileged) | All reports for a period |
//! | GET | `/api/activity-reports/history` | Yes | Monthly totals for a year |
//! | GET | `/api/activity-reports/submissions` | Yes (privileged) | Delivery status per member |

pub mod aggregation;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod reminders;
pub mod routes;
pub mod services;
pub mod store;

pub use reminders::ReminderPolicy;
pub use services::{ActivityReportService, SubmissionMonitorService};
pub use store::PgReportStore;
