mod activity_report;
mod member;
mod period;

pub use activity_report::{ActivityReport, ReportFields, ReportKey, RosterRow};
pub use member::{MemberSnapshot, MemberSubmission};
pub use period::Period;
