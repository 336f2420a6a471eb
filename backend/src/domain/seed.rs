//! Sample records used when a collection has never been stored.

use chrono::{NaiveDate, NaiveDateTime};
use shared::{
    ActivityStatus, AppearanceSettings, AttendanceRecord, ChurchSettings, Equipment,
    EquipmentStatus, Gender, Member, MessageStatus, NotificationSettings, SecuritySettings,
    SmsMessage, Theme, Transaction, TransactionType, User, UserRole, Visitor,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    ymd(year, month, day)
        .and_hms_opt(hour, min, sec)
        .unwrap_or_default()
}

pub fn members() -> Vec<Member> {
    vec![
        Member {
            id: "1".to_string(),
            name: "John Smith".to_string(),
            email: "john.smith@email.com".to_string(),
            phone: "+1234567890".to_string(),
            birth_date: ymd(1990, 3, 15),
            gender: Gender::Male,
            join_date: ymd(2020, 1, 15),
            status: ActivityStatus::Active,
            address: "123 Main St, City".to_string(),
            role: "Member".to_string(),
        },
        Member {
            id: "2".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            phone: "+1234567891".to_string(),
            birth_date: ymd(1985, 7, 22),
            gender: Gender::Female,
            join_date: ymd(2019, 5, 10),
            status: ActivityStatus::Active,
            address: "456 Oak Ave, City".to_string(),
            role: "Elder".to_string(),
        },
        Member {
            id: "3".to_string(),
            name: "Michael Davis".to_string(),
            email: "michael.davis@email.com".to_string(),
            phone: "+1234567892".to_string(),
            birth_date: ymd(1992, 12, 3),
            gender: Gender::Male,
            join_date: ymd(2024, 1, 8),
            status: ActivityStatus::Active,
            address: "789 Pine St, City".to_string(),
            role: "Member".to_string(),
        },
    ]
}

pub fn transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "1".to_string(),
            transaction_type: TransactionType::Income,
            amount: 5000.0,
            description: "Sunday Offering".to_string(),
            date: ymd(2024, 1, 7),
            category: "Offerings".to_string(),
        },
        Transaction {
            id: "2".to_string(),
            transaction_type: TransactionType::Income,
            amount: 2500.0,
            description: "Tithe Collection".to_string(),
            date: ymd(2024, 1, 14),
            category: "Tithes".to_string(),
        },
        Transaction {
            id: "3".to_string(),
            transaction_type: TransactionType::Expense,
            amount: 800.0,
            description: "Utilities Payment".to_string(),
            date: ymd(2024, 1, 15),
            category: "Utilities".to_string(),
        },
    ]
}

pub fn attendance() -> Vec<AttendanceRecord> {
    let service = "Sunday Morning";
    vec![
        AttendanceRecord {
            id: "1".to_string(),
            member_id: "1".to_string(),
            member_name: "John Smith".to_string(),
            date: ymd(2024, 1, 21),
            service: service.to_string(),
            present: true,
        },
        AttendanceRecord {
            id: "2".to_string(),
            member_id: "2".to_string(),
            member_name: "Sarah Johnson".to_string(),
            date: ymd(2024, 1, 21),
            service: service.to_string(),
            present: true,
        },
        AttendanceRecord {
            id: "3".to_string(),
            member_id: "3".to_string(),
            member_name: "Michael Davis".to_string(),
            date: ymd(2024, 1, 21),
            service: service.to_string(),
            present: false,
        },
    ]
}

pub fn visitors() -> Vec<Visitor> {
    vec![
        Visitor {
            id: "1".to_string(),
            name: "Emma Wilson".to_string(),
            email: "emma.wilson@email.com".to_string(),
            phone: "+1234567893".to_string(),
            visit_date: ymd(2024, 1, 21),
            source: "Friend Invitation".to_string(),
            followed_up: false,
        },
        Visitor {
            id: "2".to_string(),
            name: "David Brown".to_string(),
            email: "david.brown@email.com".to_string(),
            phone: "+1234567894".to_string(),
            visit_date: ymd(2024, 1, 14),
            source: "Walk-in".to_string(),
            followed_up: true,
        },
    ]
}

pub fn equipment() -> Vec<Equipment> {
    vec![
        Equipment {
            id: "1".to_string(),
            name: "Sound System".to_string(),
            category: "Audio".to_string(),
            status: EquipmentStatus::Good,
            last_maintenance: ymd(2024, 1, 15),
            next_maintenance: ymd(2024, 4, 15),
            location: "Main Sanctuary".to_string(),
            notes: None,
        },
        Equipment {
            id: "2".to_string(),
            name: "Projector".to_string(),
            category: "Visual".to_string(),
            status: EquipmentStatus::NeedsAttention,
            last_maintenance: ymd(2023, 12, 1),
            next_maintenance: ymd(2024, 3, 1),
            location: "Main Sanctuary".to_string(),
            notes: None,
        },
        Equipment {
            id: "3".to_string(),
            name: "Piano".to_string(),
            category: "Musical".to_string(),
            status: EquipmentStatus::Excellent,
            last_maintenance: ymd(2024, 1, 8),
            next_maintenance: ymd(2024, 7, 8),
            location: "Main Sanctuary".to_string(),
            notes: None,
        },
    ]
}

pub fn sms_messages() -> Vec<SmsMessage> {
    vec![
        SmsMessage {
            id: "1".to_string(),
            message: "Sunday service starts at 10 AM. See you there!".to_string(),
            recipients: "All Members".to_string(),
            scheduled_date: None,
            sent_date: Some(ymd_hms(2024, 1, 21, 8, 0, 0)),
            status: MessageStatus::Sent,
        },
        SmsMessage {
            id: "2".to_string(),
            message: "Bible study this Wednesday at 7 PM".to_string(),
            recipients: "Bible Study Group".to_string(),
            scheduled_date: None,
            sent_date: Some(ymd_hms(2024, 1, 19, 15, 30, 0)),
            status: MessageStatus::Sent,
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Pastor John Smith".to_string(),
            email: "pastor@church.com".to_string(),
            role: UserRole::Admin,
            status: ActivityStatus::Active,
            last_login: ymd_hms(2024, 1, 21, 10, 30, 0),
        },
        User {
            id: "2".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah@church.com".to_string(),
            role: UserRole::Secretary,
            status: ActivityStatus::Active,
            last_login: ymd_hms(2024, 1, 20, 14, 15, 0),
        },
        User {
            id: "3".to_string(),
            name: "Michael Davis".to_string(),
            email: "michael@church.com".to_string(),
            role: UserRole::Treasurer,
            status: ActivityStatus::Active,
            last_login: ymd_hms(2024, 1, 19, 9, 45, 0),
        },
    ]
}

pub fn settings() -> ChurchSettings {
    ChurchSettings {
        church_name: "Grace Community Church".to_string(),
        pastor_name: "Pastor John Smith".to_string(),
        address: "123 Church Street, Community City, State 12345".to_string(),
        phone: "(555) 123-4567".to_string(),
        email: "info@gracechurch.com".to_string(),
        notifications: NotificationSettings {
            email: true,
            sms: false,
            birthdays: true,
        },
        security: SecuritySettings {
            session_timeout: 60,
            two_factor_auth: false,
            password_requirements: true,
        },
        appearance: AppearanceSettings {
            theme: Theme::Light,
            language: "en".to_string(),
        },
    }
}
