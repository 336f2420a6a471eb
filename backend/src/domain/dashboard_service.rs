//! Dashboard and report numbers computed across collections.
//!
//! The dashboard summary is cached against the data version and the date it
//! was computed for; any mutation or a new day invalidates it.

use chrono::NaiveDate;
use log::debug;
use shared::{AgeGroup, BirthdayList, DashboardSummary, Member, ReportSummary};
use std::sync::{Arc, Mutex, PoisonError};

use super::aggregations;
use super::attendance_service::AttendanceService;
use super::ids::DataVersion;
use super::member_service::MemberService;
use super::transaction_service::TransactionService;
use super::visitor_service::VisitorService;

/// Display settings the dashboard aggregations depend on
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub birthday_display_limit: usize,
    pub new_member_window_days: i64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            birthday_display_limit: 5,
            new_member_window_days: 30,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    members: MemberService,
    transactions: TransactionService,
    attendance: AttendanceService,
    visitors: VisitorService,
    version: DataVersion,
    options: DashboardOptions,
    cache: Arc<Mutex<Option<(u64, NaiveDate, DashboardSummary)>>>,
}

impl DashboardService {
    pub fn new(
        members: MemberService,
        transactions: TransactionService,
        attendance: AttendanceService,
        visitors: VisitorService,
        version: DataVersion,
        options: DashboardOptions,
    ) -> Self {
        Self {
            members,
            transactions,
            attendance,
            visitors,
            version,
            options,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Headline numbers as of `today`
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        let version = self.version.current();
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((cached_version, cached_day, summary)) = cache.as_ref() {
            if *cached_version == version && *cached_day == today {
                debug!("Dashboard summary served from cache (version {})", version);
                return summary.clone();
            }
        }

        debug!("Computing dashboard summary for {} (version {})", today, version);
        let summary = self.compute(today);
        *cache = Some((version, today, summary.clone()));
        summary
    }

    pub fn birthdays(&self, today: NaiveDate) -> BirthdayList {
        let limit = self.options.birthday_display_limit;
        self.members
            .collection()
            .with_records(|members| aggregations::birthdays_this_month(members, today, limit))
    }

    pub fn new_members(&self, today: NaiveDate) -> Vec<Member> {
        let window = self.options.new_member_window_days;
        self.members
            .collection()
            .with_records(|members| aggregations::new_members(members, today, window))
    }

    /// Age bucket label and member count, youngest bucket first
    pub fn age_distribution(&self, today: NaiveDate) -> Vec<(&'static str, usize)> {
        let groups = self
            .members
            .collection()
            .with_records(|members| aggregations::age_groups(members, today));
        AgeGroup::ALL
            .iter()
            .map(|group| (group.label(), groups.count(*group)))
            .collect()
    }

    /// The summary sheet of a report generated on `today`
    pub fn report_summary(&self, today: NaiveDate) -> ReportSummary {
        let financials = self.transactions.summary();
        ReportSummary {
            generated_on: today,
            total_members: self.members.count(),
            total_visitors: self.visitors.collection().len(),
            total_transactions: self.transactions.collection().len(),
            total_attendance_records: self.attendance.collection().len(),
            total_income: financials.total_income,
            total_expenses: financials.total_expenses,
            net_balance: financials.balance,
        }
    }

    fn compute(&self, today: NaiveDate) -> DashboardSummary {
        let (total_members, gender, age_groups) = self.members.collection().with_records(|m| {
            (m.len(), aggregations::gender_breakdown(m), aggregations::age_groups(m, today))
        });
        let financials = self.transactions.summary();
        let visitors = self.visitors.summary();

        DashboardSummary {
            as_of: today,
            total_members,
            new_members: self.new_members(today).len(),
            financial_balance: financials.balance,
            total_income: financials.total_income,
            birthdays_this_month: self.birthdays(today).total(),
            gender,
            age_groups,
            attendance_rate: self.attendance.summary().rate,
            total_visitors: visitors.total,
            pending_follow_ups: visitors.pending_follow_ups,
        }
    }
}
