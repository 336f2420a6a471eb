//! Derived numbers for the dashboard and the per-page summaries.
//!
//! Everything here is a pure function over record slices plus an explicit
//! `today`, so callers decide when to recompute.

use chrono::{Datelike, Days, NaiveDate};
use shared::{
    ActivityStatus, AgeGroup, AgeGroups, AttendanceRecord, AttendanceSummary, BirthdayList,
    Equipment, EquipmentStatus, EquipmentSummary, FinancialSummary, Gender, GenderBreakdown,
    Member, MessageStatus, MessageSummary, RecipientGroup, RecipientOption, SmsMessage,
    Transaction, TransactionType, User, UserRole, UserSummary, Visitor, VisitorSummary,
};

/// Age as shown on the dashboard: calendar year difference, ignoring month
/// and day, so someone whose birthday is later this year counts one year older.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth_date.year()
}

/// Members born in `today`'s month, earliest day first, capped at `limit`
pub fn birthdays_this_month(members: &[Member], today: NaiveDate, limit: usize) -> BirthdayList {
    let mut matching: Vec<&Member> = members
        .iter()
        .filter(|m| m.birth_date.month() == today.month())
        .collect();
    matching.sort_by_key(|m| m.birth_date.day());

    let remaining = matching.len().saturating_sub(limit);
    let upcoming = matching.into_iter().take(limit).cloned().collect();

    BirthdayList { upcoming, remaining }
}

pub fn gender_breakdown(members: &[Member]) -> GenderBreakdown {
    members
        .iter()
        .fold(GenderBreakdown::default(), |mut acc, m| {
            match m.gender {
                Gender::Male => acc.male += 1,
                Gender::Female => acc.female += 1,
            }
            acc
        })
}

pub fn age_groups(members: &[Member], today: NaiveDate) -> AgeGroups {
    let mut groups = AgeGroups::default();
    for member in members {
        groups.increment(AgeGroup::for_age(age_in_years(member.birth_date, today)));
    }
    groups
}

/// Income minus expenses
pub fn financial_balance(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::signed_amount).sum()
}

pub fn total_of(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .map(|t| t.amount)
        .sum()
}

pub fn financial_summary(transactions: &[Transaction]) -> FinancialSummary {
    FinancialSummary {
        total_income: total_of(transactions, TransactionType::Income),
        total_expenses: total_of(transactions, TransactionType::Expense),
        balance: financial_balance(transactions),
    }
}

/// Percentage of present marks; 0 for an empty slice
pub fn attendance_rate(records: &[AttendanceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let present = records.iter().filter(|r| r.present).count();
    present as f64 / records.len() as f64 * 100.0
}

pub fn attendance_summary(records: &[AttendanceRecord]) -> AttendanceSummary {
    let present = records.iter().filter(|r| r.present).count();
    AttendanceSummary {
        present,
        absent: records.len() - present,
        total: records.len(),
        rate: attendance_rate(records),
    }
}

/// Records for one service on one date
pub fn attendance_for_service(
    records: &[AttendanceRecord],
    date: NaiveDate,
    service: &str,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|r| r.date == date && r.service == service)
        .cloned()
        .collect()
}

/// A member's mark for a service: `Some(present)` or `None` when unmarked
pub fn member_mark(
    records: &[AttendanceRecord],
    member_id: &str,
    date: NaiveDate,
    service: &str,
) -> Option<bool> {
    records
        .iter()
        .find(|r| r.same_slot(member_id, date, service))
        .map(|r| r.present)
}

/// Members who joined within the trailing `window_days` of `today`.
/// A negative window counts as 0; one reaching past the calendar start keeps everyone.
pub fn new_members(members: &[Member], today: NaiveDate, window_days: i64) -> Vec<Member> {
    let window = Days::new(window_days.max(0) as u64);
    let cutoff = today.checked_sub_days(window).unwrap_or(NaiveDate::MIN);
    members
        .iter()
        .filter(|m| m.join_date >= cutoff)
        .cloned()
        .collect()
}

/// Case-insensitive substring match on name or email; an empty term matches all
pub fn search_members(members: &[Member], term: &str) -> Vec<Member> {
    let needle = term.trim().to_lowercase();
    members
        .iter()
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn visitor_summary(visitors: &[Visitor]) -> VisitorSummary {
    let completed = visitors.iter().filter(|v| v.followed_up).count();
    VisitorSummary {
        total: visitors.len(),
        pending_follow_ups: visitors.len() - completed,
        completed_follow_ups: completed,
    }
}

pub fn pending_follow_ups(visitors: &[Visitor]) -> Vec<Visitor> {
    visitors.iter().filter(|v| !v.followed_up).cloned().collect()
}

pub fn completed_follow_ups(visitors: &[Visitor]) -> Vec<Visitor> {
    visitors.iter().filter(|v| v.followed_up).cloned().collect()
}

/// Equipment whose next maintenance date has arrived
pub fn maintenance_due(equipment: &[Equipment], today: NaiveDate) -> Vec<Equipment> {
    equipment
        .iter()
        .filter(|e| e.next_maintenance <= today)
        .cloned()
        .collect()
}

pub fn equipment_summary(equipment: &[Equipment], today: NaiveDate) -> EquipmentSummary {
    let count = |status: EquipmentStatus| equipment.iter().filter(|e| e.status == status).count();
    EquipmentSummary {
        total: equipment.len(),
        excellent: count(EquipmentStatus::Excellent),
        good: count(EquipmentStatus::Good),
        needs_attention: count(EquipmentStatus::NeedsAttention),
        poor: count(EquipmentStatus::Poor),
        maintenance_due: equipment.iter().filter(|e| e.next_maintenance <= today).count(),
    }
}

pub fn messages_with_status(messages: &[SmsMessage], status: MessageStatus) -> Vec<SmsMessage> {
    messages
        .iter()
        .filter(|m| m.status == status)
        .cloned()
        .collect()
}

pub fn message_summary(messages: &[SmsMessage]) -> MessageSummary {
    let count = |status: MessageStatus| messages.iter().filter(|m| m.status == status).count();
    MessageSummary {
        total: messages.len(),
        drafts: count(MessageStatus::Draft),
        scheduled: count(MessageStatus::Scheduled),
        sent: count(MessageStatus::Sent),
        failed: count(MessageStatus::Failed),
    }
}

pub fn user_summary(users: &[User]) -> UserSummary {
    UserSummary {
        total: users.len(),
        admins: users.iter().filter(|u| u.role == UserRole::Admin).count(),
        active: users
            .iter()
            .filter(|u| u.status == ActivityStatus::Active)
            .count(),
        roles: UserRole::ALL.len(),
    }
}

/// Estimated audience size for a recipient group.
///
/// Youth and Bible Study have no membership data, so they are approximated
/// as 30% and 40% of the roster.
pub fn recipient_count(members: &[Member], group: RecipientGroup) -> usize {
    let with_role = |role: &str| members.iter().filter(|m| m.role == role).count();
    match group {
        RecipientGroup::AllMembers => members.len(),
        RecipientGroup::Elders => with_role("Elder"),
        RecipientGroup::Volunteers => with_role("Volunteer"),
        RecipientGroup::Youth => members.len() * 3 / 10,
        RecipientGroup::BibleStudy => members.len() * 4 / 10,
    }
}

pub fn recipient_options(members: &[Member]) -> Vec<RecipientOption> {
    RecipientGroup::ALL
        .iter()
        .map(|group| RecipientOption {
            group: *group,
            label: group.label().to_string(),
            count: recipient_count(members, *group),
        })
        .collect()
}
