//! Fixed storage keys. Domain data and authentication data live in separate
//! namespaces (`church_*` and `auth_*`).

pub const MEMBERS: &str = "church_members";
pub const TRANSACTIONS: &str = "church_transactions";
pub const ATTENDANCE: &str = "church_attendance";
pub const VISITORS: &str = "church_visitors";
pub const EQUIPMENT: &str = "church_equipment";
pub const SMS_MESSAGES: &str = "church_sms_messages";
pub const USERS: &str = "church_users";
pub const SETTINGS: &str = "church_settings";

pub const AUTH_USERS: &str = "auth_users";
pub const AUTH_CURRENT_USER: &str = "auth_current_user";
pub const AUTH_CHURCHES: &str = "auth_churches";
