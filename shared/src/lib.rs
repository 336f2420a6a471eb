use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Whether a member (or a system user) is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    Active,
    Inactive,
}

/// A church member as stored in the `church_members` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Creation timestamp in epoch milliseconds
    pub id: String,
    pub name: String,
    /// Not checked for uniqueness
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub join_date: NaiveDate,
    pub status: ActivityStatus,
    pub address: String,
    /// Free-form church role, e.g. "Member", "Elder", "Volunteer"
    pub role: String,
}

// ---------------------------------------------------------------------------
// Finances
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money received (offerings, tithes, donations)
    Income,
    /// Money spent
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Always non-negative; the sign comes from `transaction_type`
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub category: String,
}

impl Transaction {
    /// Amount with the sign implied by the transaction type applied
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Attendance & visitors
// ---------------------------------------------------------------------------

/// One attendance mark. Identity is the (member_id, date, service) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub member_id: String,
    /// Snapshot of the member's name when the mark was written
    pub member_name: String,
    pub date: NaiveDate,
    pub service: String,
    pub present: bool,
}

impl AttendanceRecord {
    /// True when this record occupies the given composite key
    pub fn same_slot(&self, member_id: &str, date: NaiveDate, service: &str) -> bool {
        self.member_id == member_id && self.date == date && self.service == service
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub visit_date: NaiveDate,
    /// How the visitor heard about the church (Walk-in, Online, ...)
    pub source: String,
    pub followed_up: bool,
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: EquipmentStatus,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// SMS broadcasts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageStatus {
    Draft,
    Scheduled,
    Sent,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsMessage {
    pub id: String,
    pub message: String,
    /// Display label of the recipient group, e.g. "All Members"
    pub recipients: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_date: Option<NaiveDateTime>,
    pub status: MessageStatus,
}

/// Predefined recipient groups offered when composing a broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecipientGroup {
    #[serde(rename = "all")]
    AllMembers,
    Elders,
    Volunteers,
    Youth,
    BibleStudy,
}

impl RecipientGroup {
    pub const ALL: [RecipientGroup; 5] = [
        RecipientGroup::AllMembers,
        RecipientGroup::Elders,
        RecipientGroup::Volunteers,
        RecipientGroup::Youth,
        RecipientGroup::BibleStudy,
    ];

    /// Label stored in `SmsMessage::recipients`
    pub fn label(&self) -> &'static str {
        match self {
            RecipientGroup::AllMembers => "All Members",
            RecipientGroup::Elders => "Elders",
            RecipientGroup::Volunteers => "Volunteers",
            RecipientGroup::Youth => "Youth Group",
            RecipientGroup::BibleStudy => "Bible Study Group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientOption {
    pub group: RecipientGroup,
    pub label: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// System users & authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Secretary,
    Treasurer,
    Volunteer,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Secretary,
        UserRole::Treasurer,
        UserRole::Volunteer,
    ];
}

/// A dashboard user managed from the Users page.
///
/// This is a separate record from [`AuthAccount`]; the two are not reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: ActivityStatus,
    pub last_login: NaiveDateTime,
}

/// A registered login. Passwords are stored in plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// Id of the organization created alongside the account
    pub church_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AuthAccount {
    /// The account as exposed to the rest of the application, minus the password
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            church_id: self.church_id.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// The signed-in account, stored under `auth_current_user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub church_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A church registered together with its first admin account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub admin_id: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurchSettings {
    pub church_name: String,
    pub pastor_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub appearance: AppearanceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub birthdays: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    /// Minutes of inactivity before sign-out
    pub session_timeout: u32,
    pub two_factor_auth: bool,
    pub password_requirements: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub theme: Theme,
    pub language: String,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub male: usize,
    pub female: usize,
}

/// Fixed age ranges used by the demographics chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-18")]
    Youth,
    #[serde(rename = "19-35")]
    YoungAdult,
    #[serde(rename = "36-55")]
    Adult,
    #[serde(rename = "56+")]
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Youth,
        AgeGroup::YoungAdult,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    /// Bucket an age in whole years: <=18, <=35, <=55, else 56+
    pub fn for_age(age: i32) -> Self {
        if age <= 18 {
            AgeGroup::Youth
        } else if age <= 35 {
            AgeGroup::YoungAdult
        } else if age <= 55 {
            AgeGroup::Adult
        } else {
            AgeGroup::Senior
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Youth => "0-18",
            AgeGroup::YoungAdult => "19-35",
            AgeGroup::Adult => "36-55",
            AgeGroup::Senior => "56+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeGroups {
    #[serde(rename = "0-18")]
    pub youth: usize,
    #[serde(rename = "19-35")]
    pub young_adult: usize,
    #[serde(rename = "36-55")]
    pub adult: usize,
    #[serde(rename = "56+")]
    pub senior: usize,
}

impl AgeGroups {
    pub fn count(&self, group: AgeGroup) -> usize {
        match group {
            AgeGroup::Youth => self.youth,
            AgeGroup::YoungAdult => self.young_adult,
            AgeGroup::Adult => self.adult,
            AgeGroup::Senior => self.senior,
        }
    }

    pub fn increment(&mut self, group: AgeGroup) {
        match group {
            AgeGroup::Youth => self.youth += 1,
            AgeGroup::YoungAdult => self.young_adult += 1,
            AgeGroup::Adult => self.adult += 1,
            AgeGroup::Senior => self.senior += 1,
        }
    }
}

/// Birthdays falling in the current month, capped for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthdayList {
    /// Sorted by day of month
    pub upcoming: Vec<Member>,
    /// How many more birthdays this month were cut by the display cap
    pub remaining: usize,
}

impl BirthdayList {
    pub fn total(&self) -> usize {
        self.upcoming.len() + self.remaining
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    /// Percentage of present marks, 0 when there are no records
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisitorSummary {
    pub total: usize,
    pub pending_follow_ups: usize,
    pub completed_follow_ups: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub total: usize,
    pub excellent: usize,
    pub good: usize,
    pub needs_attention: usize,
    pub poor: usize,
    /// Items whose next maintenance date is today or earlier
    pub maintenance_due: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageSummary {
    pub total: usize,
    pub drafts: usize,
    pub scheduled: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSummary {
    pub total: usize,
    pub admins: usize,
    pub active: usize,
    /// Number of roles available for assignment
    pub roles: usize,
}

/// Headline numbers shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub total_members: usize,
    pub new_members: usize,
    pub financial_balance: f64,
    pub total_income: f64,
    pub birthdays_this_month: usize,
    pub gender: GenderBreakdown,
    pub age_groups: AgeGroups,
    pub attendance_rate: f64,
    pub total_visitors: usize,
    pub pending_follow_ups: usize,
}

/// The summary sheet of a report export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub generated_on: NaiveDate,
    pub total_members: usize,
    pub total_visitors: usize,
    pub total_transactions: usize,
    pub total_attendance_records: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityStatus::Active => write!(f, "Active"),
            ActivityStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentStatus::Excellent => write!(f, "Excellent"),
            EquipmentStatus::Good => write!(f, "Good"),
            EquipmentStatus::NeedsAttention => write!(f, "Needs Attention"),
            EquipmentStatus::Poor => write!(f, "Poor"),
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageStatus::Draft => write!(f, "Draft"),
            MessageStatus::Scheduled => write!(f, "Scheduled"),
            MessageStatus::Sent => write!(f, "Sent"),
            MessageStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "Admin"),
            UserRole::Secretary => write!(f, "Secretary"),
            UserRole::Treasurer => write!(f, "Treasurer"),
            UserRole::Volunteer => write!(f, "Volunteer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_serializes_camel_case() {
        let member = Member {
            id: "1".to_string(),
            name: "John Smith".to_string(),
            email: "john.smith@email.com".to_string(),
            phone: "+1234567890".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 15).unwrap(),
            gender: Gender::Male,
            join_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            status: ActivityStatus::Active,
            address: "123 Main St, City".to_string(),
            role: "Member".to_string(),
        };

        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["birthDate"], "1990-03-15");
        assert_eq!(json["joinDate"], "2020-01-15");
        assert_eq!(json["gender"], "Male");
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn test_transaction_type_field_and_signed_amount() {
        let json = r#"{"id":"3","type":"Expense","amount":800,"description":"Utilities Payment","date":"2024-01-15","category":"Utilities"}"#;
        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.signed_amount(), -800.0);
    }

    #[test]
    fn test_equipment_status_wire_names() {
        let status: EquipmentStatus = serde_json::from_str("\"Needs Attention\"").unwrap();
        assert_eq!(status, EquipmentStatus::NeedsAttention);
        assert_eq!(status.to_string(), "Needs Attention");
    }

    #[test]
    fn test_equipment_without_notes_omits_field() {
        let equipment = Equipment {
            id: "1".to_string(),
            name: "Sound System".to_string(),
            category: "Audio".to_string(),
            status: EquipmentStatus::Good,
            last_maintenance: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            next_maintenance: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            location: "Main Sanctuary".to_string(),
            notes: None,
        };

        let json = serde_json::to_value(&equipment).unwrap();
        assert!(json.get("notes").is_none());
        assert_eq!(json["nextMaintenance"], "2024-04-15");
    }

    #[test]
    fn test_sms_message_timestamps() {
        let json = r#"{"id":"1","message":"Sunday service starts at 10 AM. See you there!","recipients":"All Members","sentDate":"2024-01-21T08:00:00","status":"Sent"}"#;
        let message: SmsMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.status, MessageStatus::Sent);
        assert!(message.scheduled_date.is_none());
        assert_eq!(
            message.sent_date.unwrap().to_string(),
            "2024-01-21 08:00:00"
        );
    }

    #[test]
    fn test_session_user_drops_password() {
        let account = AuthAccount {
            id: "100".to_string(),
            name: "Grace Admin".to_string(),
            email: "admin@grace.org".to_string(),
            password: "secret".to_string(),
            role: UserRole::Admin,
            church_id: "99".to_string(),
            avatar: None,
        };

        let session = account.to_session_user();
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["churchId"], "99");
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::for_age(0), AgeGroup::Youth);
        assert_eq!(AgeGroup::for_age(18), AgeGroup::Youth);
        assert_eq!(AgeGroup::for_age(19), AgeGroup::YoungAdult);
        assert_eq!(AgeGroup::for_age(35), AgeGroup::YoungAdult);
        assert_eq!(AgeGroup::for_age(36), AgeGroup::Adult);
        assert_eq!(AgeGroup::for_age(55), AgeGroup::Adult);
        assert_eq!(AgeGroup::for_age(56), AgeGroup::Senior);
    }

    #[test]
    fn test_age_groups_count_matches_increment() {
        let mut groups = AgeGroups::default();
        for age in [4, 17, 30, 60] {
            groups.increment(AgeGroup::for_age(age));
        }

        let counts: Vec<(&str, usize)> = AgeGroup::ALL
            .iter()
            .map(|g| (g.label(), groups.count(*g)))
            .collect();
        assert_eq!(counts, vec![("0-18", 2), ("19-35", 1), ("36-55", 0), ("56+", 1)]);
    }

    #[test]
    fn test_recipient_group_labels() {
        assert_eq!(RecipientGroup::AllMembers.label(), "All Members");
        assert_eq!(RecipientGroup::BibleStudy.label(), "Bible Study Group");
        assert_eq!(
            serde_json::to_string(&RecipientGroup::BibleStudy).unwrap(),
            "\"bible-study\""
        );
        assert_eq!(serde_json::to_string(&RecipientGroup::AllMembers).unwrap(), "\"all\"");
    }

    #[test]
    fn test_theme_lowercase() {
        let appearance: AppearanceSettings =
            serde_json::from_str(r#"{"theme":"dark","language":"en"}"#).unwrap();
        assert_eq!(appearance.theme, Theme::Dark);
    }
}
