use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;

use church_dashboard::domain::commands::attendance::MarkAttendanceCommand;
use church_dashboard::domain::commands::auth::RegisterCommand;
use church_dashboard::domain::commands::member::CreateMemberCommand;
use church_dashboard::domain::commands::transactions::CreateTransactionCommand;
use church_dashboard::{AppConfig, Backend};
use shared::{ActivityStatus, Gender, TransactionType};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn config_for(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        data_directory: temp_dir.path().join("data"),
        auth_latency_ms: 0,
        ..AppConfig::default()
    }
}

#[test]
fn test_balance_survives_reload() {
    let temp_dir = TempDir::new().unwrap();
    let backend = Backend::open(config_for(&temp_dir)).unwrap();

    backend
        .transactions
        .add(CreateTransactionCommand {
            transaction_type: TransactionType::Expense,
            amount: 123.45,
            description: "Hymnals".to_string(),
            date: date(2024, 2, 1),
            category: "Supplies".to_string(),
        })
        .unwrap();
    let balance = backend.transactions.balance();
    drop(backend);

    let reloaded = Backend::open(config_for(&temp_dir)).unwrap();
    assert_eq!(reloaded.transactions.balance(), balance);
    assert_eq!(reloaded.transactions.list().len(), 4);
}

#[test]
fn test_collections_written_as_json_files() {
    let temp_dir = TempDir::new().unwrap();
    let backend = Backend::open(config_for(&temp_dir)).unwrap();

    let member = backend
        .members
        .add(CreateMemberCommand {
            name: "Lydia Grant".to_string(),
            email: "lydia@example.com".to_string(),
            phone: "".to_string(),
            birth_date: date(1978, 9, 30),
            gender: Gender::Female,
            join_date: date(2024, 2, 1),
            status: ActivityStatus::Active,
            address: "".to_string(),
            role: "Volunteer".to_string(),
        })
        .unwrap();

    let raw = fs::read_to_string(temp_dir.path().join("data").join("church_members.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let last = stored.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["id"], member.id.as_str());
    assert_eq!(last["birthDate"], "1978-09-30");

    // Untouched collections stay unwritten and keep coming from the sample data
    assert!(!temp_dir.path().join("data").join("church_visitors.json").exists());
    let reloaded = Backend::open(config_for(&temp_dir)).unwrap();
    assert_eq!(reloaded.members.count(), 4);
    assert_eq!(reloaded.visitors.list().len(), 2);
}

#[test]
fn test_attendance_upsert_survives_reload() {
    let temp_dir = TempDir::new().unwrap();
    let mark = |present| MarkAttendanceCommand {
        member_id: "2".to_string(),
        date: date(2024, 1, 21),
        service: "Sunday Morning".to_string(),
        present,
    };

    let backend = Backend::open(config_for(&temp_dir)).unwrap();
    backend.attendance.mark(mark(false)).unwrap();
    drop(backend);

    let reloaded = Backend::open(config_for(&temp_dir)).unwrap();
    reloaded.attendance.mark(mark(true)).unwrap();

    let slot = reloaded
        .attendance
        .for_service(date(2024, 1, 21), "Sunday Morning");
    assert_eq!(slot.len(), 3);
    assert_eq!(
        reloaded
            .attendance
            .member_mark("2", date(2024, 1, 21), "Sunday Morning"),
        Some(true)
    );
}

#[test]
fn test_corrupt_collection_falls_back_to_sample_data() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("church_transactions.json"), "{ truncated").unwrap();

    let backend = Backend::open(config_for(&temp_dir)).unwrap();
    assert_eq!(backend.transactions.balance(), 6700.0);
}

#[tokio::test]
async fn test_registered_account_logs_in_after_restart() {
    let temp_dir = TempDir::new().unwrap();

    let backend = Backend::open(config_for(&temp_dir)).unwrap();
    let registered = backend
        .auth
        .register(RegisterCommand {
            name: "Grace Admin".to_string(),
            email: "admin@grace.org".to_string(),
            password: "hunter2".to_string(),
            church_name: "Grace Chapel".to_string(),
        })
        .await
        .unwrap();
    backend.auth.logout();
    drop(backend);

    let reloaded = Backend::open(config_for(&temp_dir)).unwrap();
    assert!(!reloaded.auth.is_authenticated());

    let user = reloaded.auth.login("admin@grace.org", "hunter2").await.unwrap();
    assert_eq!(user, registered);
    assert_eq!(reloaded.auth.organizations().len(), 1);
}
