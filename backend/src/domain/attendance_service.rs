//! Attendance marks, one per (member, date, service).
//!
//! Marking a slot that already has a record replaces it, so the collection
//! never holds two records for the same member at the same service.

use chrono::NaiveDate;
use log::{debug, info};
use shared::{AttendanceRecord, AttendanceSummary};

use super::aggregations;
use super::commands::attendance::MarkAttendanceCommand;
use super::errors::StoreResult;
use super::ids::IdGenerator;
use super::member_service::MemberService;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Collection};

/// Name recorded when the member id does not resolve
pub const UNKNOWN_MEMBER: &str = "Unknown Member";

#[derive(Clone)]
pub struct AttendanceService {
    records: Collection<AttendanceRecord>,
    members: MemberService,
    ids: IdGenerator,
}

impl AttendanceService {
    pub fn new(context: &StoreContext, members: MemberService) -> Self {
        let records = Collection::load(
            keys::ATTENDANCE,
            context.persistence.clone(),
            context.version.clone(),
            seed::attendance,
        );
        Self {
            records,
            members,
            ids: context.ids.clone(),
        }
    }

    /// Mark a member present or absent, replacing any earlier mark for the
    /// same slot. The member's current name is copied onto the record.
    pub fn mark(&self, command: MarkAttendanceCommand) -> StoreResult<AttendanceRecord> {
        let service = validation::required_text("Service", &command.service)?;
        let member_id = validation::required_text("Member", &command.member_id)?;

        let member_name = self
            .members
            .name_of(&member_id)
            .unwrap_or_else(|| UNKNOWN_MEMBER.to_string());

        let record = AttendanceRecord {
            id: self.ids.next_id(),
            member_id,
            member_name,
            date: command.date,
            service,
            present: command.present,
        };

        let replaced = {
            let (member_id, date, service) = (&record.member_id, record.date, &record.service);
            self.records
                .upsert(|r| r.same_slot(member_id, date, service), record.clone())
        };

        info!(
            "Marked {} ({}) {} for {} on {} (replaced {})",
            record.member_name,
            record.member_id,
            if record.present { "present" } else { "absent" },
            record.service,
            record.date,
            replaced
        );

        Ok(record)
    }

    pub fn list(&self) -> Vec<AttendanceRecord> {
        debug!("Listing all attendance records");
        self.records.all()
    }

    /// Records for one service on one date
    pub fn for_service(&self, date: NaiveDate, service: &str) -> Vec<AttendanceRecord> {
        self.records
            .with_records(|records| aggregations::attendance_for_service(records, date, service))
    }

    /// `Some(present)` when the member has been marked for the service
    pub fn member_mark(&self, member_id: &str, date: NaiveDate, service: &str) -> Option<bool> {
        self.records
            .with_records(|records| aggregations::member_mark(records, member_id, date, service))
    }

    /// Present/absent counts and rate over every record
    pub fn summary(&self) -> AttendanceSummary {
        self.records.with_records(aggregations::attendance_summary)
    }

    /// Present/absent counts and rate for one service
    pub fn service_summary(&self, date: NaiveDate, service: &str) -> AttendanceSummary {
        aggregations::attendance_summary(&self.for_service(date, service))
    }

    pub(crate) fn collection(&self) -> &Collection<AttendanceRecord> {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, test_context};

    fn setup() -> (AttendanceService, MemberService) {
        let (context, _) = test_context();
        let members = MemberService::new(&context);
        (AttendanceService::new(&context, members.clone()), members)
    }

    fn mark(member_id: &str, service: &str, present: bool) -> MarkAttendanceCommand {
        MarkAttendanceCommand {
            member_id: member_id.to_string(),
            date: date(2024, 1, 28),
            service: service.to_string(),
            present,
        }
    }

    #[test]
    fn test_mark_snapshots_member_name() {
        let (attendance, _) = setup();

        let record = attendance.mark(mark("2", "Sunday Morning", true)).unwrap();

        assert_eq!(record.member_name, "Sarah Johnson");
        assert_eq!(attendance.list().len(), 4);
    }

    #[test]
    fn test_unknown_member_name() {
        let (attendance, _) = setup();
        let record = attendance.mark(mark("404", "Sunday Morning", true)).unwrap();
        assert_eq!(record.member_name, UNKNOWN_MEMBER);
    }

    #[test]
    fn test_marking_same_slot_replaces_record() {
        let (attendance, _) = setup();

        attendance.mark(mark("1", "Sunday Morning", true)).unwrap();
        attendance.mark(mark("1", "Sunday Morning", false)).unwrap();

        let slot = attendance.for_service(date(2024, 1, 28), "Sunday Morning");
        assert_eq!(slot.len(), 1);
        assert!(!slot[0].present);
        assert_eq!(
            attendance.member_mark("1", date(2024, 1, 28), "Sunday Morning"),
            Some(false)
        );
    }

    #[test]
    fn test_different_service_is_a_different_slot() {
        let (attendance, _) = setup();

        attendance.mark(mark("1", "Sunday Morning", true)).unwrap();
        attendance.mark(mark("1", "Sunday Evening", true)).unwrap();

        assert_eq!(attendance.list().len(), 5);
    }

    #[test]
    fn test_no_two_records_share_a_slot() {
        let (attendance, _) = setup();
        for present in [true, false, true, true] {
            attendance.mark(mark("3", "Bible Study", present)).unwrap();
        }

        let records = attendance.list();
        for (i, a) in records.iter().enumerate() {
            for b in &records[i + 1..] {
                assert!(!a.same_slot(&b.member_id, b.date, &b.service));
            }
        }
    }

    #[test]
    fn test_deleting_member_leaves_attendance() {
        let (attendance, members) = setup();

        assert!(members.delete("1"));

        let orphaned: Vec<_> = attendance
            .list()
            .into_iter()
            .filter(|r| r.member_id == "1")
            .collect();
        assert_eq!(orphaned.len(), 1);
        assert_eq!(orphaned[0].member_name, "John Smith");
    }

    #[test]
    fn test_summaries() {
        let (attendance, _) = setup();

        let overall = attendance.summary();
        assert_eq!((overall.present, overall.absent), (2, 1));

        let empty = attendance.service_summary(date(2024, 1, 28), "Sunday Morning");
        assert_eq!(empty.total, 0);
        assert_eq!(empty.rate, 0.0);
    }

    #[test]
    fn test_blank_service_rejected() {
        let (attendance, _) = setup();
        assert!(attendance.mark(mark("1", "  ", true)).is_err());
        assert_eq!(attendance.list().len(), 3);
    }
}
