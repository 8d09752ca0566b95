//! Case-count arithmetic for activity reports.
//!
//! A shared case is reported once by each of the two members who handled it,
//! so totals summed across members count it twice. Views spanning several
//! members therefore halve the shared sum (rounding up); a single member's
//! own numbers are taken as reported.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use uuid::Uuid;

use crate::features::activity_reports::models::{ActivityReport, Period};

/// Raw sums of the three counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseTotals {
    pub solo: i64,
    pub shared: i64,
    pub preventive: i64,
}

impl CaseTotals {
    pub fn of(report: &ActivityReport) -> Self {
        Self {
            solo: i64::from(report.solo_visits),
            shared: i64::from(report.shared_visits),
            preventive: i64::from(report.preventive_visits),
        }
    }
}

impl Add for CaseTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            solo: self.solo + rhs.solo,
            shared: self.shared + rhs.shared,
            preventive: self.preventive + rhs.preventive,
        }
    }
}

impl AddAssign for CaseTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for CaseTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// `n / 2` rounded toward positive infinity, for `n >= 0`
pub fn ceil_half(n: i64) -> i64 {
    (n + 1) / 2
}

/// Adjusted total for sums spanning several members
pub fn adjust_roster_total(solo: i64, shared: i64) -> i64 {
    solo + ceil_half(shared)
}

/// Adjusted total for one member's own numbers
pub fn adjust_own_total(solo: i64, shared: i64) -> i64 {
    solo + shared
}

/// Whose reports a history covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryScope {
    AllMembers,
    Member(Uuid),
}

impl HistoryScope {
    pub fn member_id(&self) -> Option<Uuid> {
        match self {
            HistoryScope::AllMembers => None,
            HistoryScope::Member(id) => Some(*id),
        }
    }

    pub fn adjusted_total(&self, totals: &CaseTotals) -> i64 {
        match self {
            HistoryScope::AllMembers => adjust_roster_total(totals.solo, totals.shared),
            HistoryScope::Member(_) => adjust_own_total(totals.solo, totals.shared),
        }
    }
}

/// Sum reports per month; months without reports are absent
pub fn totals_by_month<'a, I>(reports: I) -> BTreeMap<Period, CaseTotals>
where
    I: IntoIterator<Item = &'a ActivityReport>,
{
    let mut months: BTreeMap<Period, CaseTotals> = BTreeMap::new();

    for report in reports {
        *months.entry(report.period).or_default() += CaseTotals::of(report);
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn report(period: &str, solo: i32, shared: i32, preventive: i32) -> ActivityReport {
        ActivityReport {
            id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            period: period.parse().unwrap(),
            solo_visits: solo,
            shared_visits: shared,
            partner_names: String::new(),
            preventive_visits: preventive,
            created_at: Utc::now(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_ceil_half_rounds_up() {
        assert_eq!(ceil_half(0), 0);
        assert_eq!(ceil_half(1), 1);
        assert_eq!(ceil_half(7), 4);
        assert_eq!(ceil_half(8), 4);
    }

    #[test]
    fn test_roster_adjustment_halves_shared() {
        // 3 solo + 5 shared and 2 solo + 3 shared in the same month
        let totals = CaseTotals::of(&report("2026-01", 3, 5, 0))
            + CaseTotals::of(&report("2026-01", 2, 3, 0));

        assert_eq!(totals.solo, 5);
        assert_eq!(totals.shared, 8);
        assert_eq!(adjust_roster_total(totals.solo, totals.shared), 9);
    }

    #[test]
    fn test_own_adjustment_keeps_shared() {
        assert_eq!(adjust_own_total(4, 3), 7);
        assert_ne!(adjust_own_total(4, 3), adjust_roster_total(4, 3));
    }

    #[test]
    fn test_scope_picks_formula() {
        let totals = CaseTotals {
            solo: 4,
            shared: 3,
            preventive: 0,
        };
        assert_eq!(HistoryScope::AllMembers.adjusted_total(&totals), 6);
        assert_eq!(HistoryScope::Member(Uuid::new_v4()).adjusted_total(&totals), 7);
    }

    #[test]
    fn test_totals_by_month_groups_and_orders() {
        let reports = vec![
            report("2026-03", 1, 0, 2),
            report("2026-01", 2, 1, 0),
            report("2026-01", 1, 1, 5),
        ];

        let months = totals_by_month(&reports);
        let keys: Vec<String> = months.keys().map(Period::to_string).collect();

        assert_eq!(keys, vec!["2026-01", "2026-03"]);
        assert_eq!(
            months[&"2026-01".parse::<Period>().unwrap()],
            CaseTotals {
                solo: 3,
                shared: 2,
                preventive: 5
            }
        );
    }

    #[test]
    fn test_grand_total_adjusts_once() {
        let reports = vec![
            report("2026-01", 0, 1, 0),
            report("2026-02", 0, 1, 0),
            report("2026-03", 0, 1, 0),
        ];
        let months = totals_by_month(&reports);

        let grand: CaseTotals = months.values().copied().sum();
        let per_month_sum: i64 = months
            .values()
            .map(|t| adjust_roster_total(t.solo, t.shared))
            .sum();

        assert_eq!(adjust_roster_total(grand.solo, grand.shared), 2);
        assert_eq!(per_month_sum, 3);
    }
}
