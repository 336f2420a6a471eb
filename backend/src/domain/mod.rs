//! # Domain Layer
//!
//! Business logic for the church dashboard. Each collection has its own
//! service that owns validation and write-through persistence; the
//! [`DashboardService`](dashboard_service::DashboardService) derives the
//! headline numbers from all of them and [`AuthService`](auth_service::AuthService)
//! keeps the login state.
//!
//! Services are cheap to clone and share their state between clones.

pub mod aggregations;
pub mod attendance_service;
pub mod auth_service;
pub mod commands;
pub mod dashboard_service;
pub mod equipment_service;
pub mod errors;
pub mod export_service;
pub mod ids;
pub mod member_service;
pub mod message_service;
pub mod seed;
pub mod settings_service;
pub mod transaction_service;
pub mod user_service;
pub mod validation;
pub mod visitor_service;

pub use attendance_service::AttendanceService;
pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use equipment_service::EquipmentService;
pub use errors::{StoreError, StoreResult};
pub use export_service::ExportService;
pub use member_service::MemberService;
pub use message_service::MessageService;
pub use settings_service::SettingsService;
pub use transaction_service::TransactionService;
pub use user_service::UserService;
pub use visitor_service::VisitorService;

use shared::{AttendanceRecord, Equipment, Member, SmsMessage, Transaction, User, Visitor};

use crate::storage::{Entity, Persistence};
use ids::{DataVersion, IdGenerator};

/// Handles every collection service is built from
#[derive(Clone)]
pub struct StoreContext {
    pub persistence: Persistence,
    pub version: DataVersion,
    pub ids: IdGenerator,
}

impl StoreContext {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence,
            version: DataVersion::new(),
            ids: IdGenerator::new(),
        }
    }
}

macro_rules! impl_entity {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Entity for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_entity! {
    Member => "Member",
    Transaction => "Transaction",
    AttendanceRecord => "Attendance record",
    Visitor => "Visitor",
    Equipment => "Equipment",
    SmsMessage => "Message",
    User => "User",
}
