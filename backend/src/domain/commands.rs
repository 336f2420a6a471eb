//! Domain-level input types.
//!
//! Each collection takes an explicit create command and an update command
//! whose fields are all optional: `None` leaves the stored value alone.
//! Commands are validated by the owning service before anything is merged.

pub mod member {
    use chrono::NaiveDate;
    use shared::{ActivityStatus, Gender};

    #[derive(Debug, Clone)]
    pub struct CreateMemberCommand {
        pub name: String,
        pub email: String,
        pub phone: String,
        pub birth_date: NaiveDate,
        pub gender: Gender,
        pub join_date: NaiveDate,
        pub status: ActivityStatus,
        pub address: String,
        pub role: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateMemberCommand {
        pub name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub birth_date: Option<NaiveDate>,
        pub gender: Option<Gender>,
        pub join_date: Option<NaiveDate>,
        pub status: Option<ActivityStatus>,
        pub address: Option<String>,
        pub role: Option<String>,
    }
}

pub mod transactions {
    use chrono::NaiveDate;
    use shared::TransactionType;

    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub transaction_type: TransactionType,
        /// Non-negative; the sign is implied by `transaction_type`
        pub amount: f64,
        pub description: String,
        pub date: NaiveDate,
        pub category: String,
    }
}

pub mod attendance {
    use chrono::NaiveDate;

    /// Mark a member present or absent for one service.
    ///
    /// The member name is looked up at write time, so it is not part of the input.
    #[derive(Debug, Clone)]
    pub struct MarkAttendanceCommand {
        pub member_id: String,
        pub date: NaiveDate,
        pub service: String,
        pub present: bool,
    }
}

pub mod visitor {
    use chrono::NaiveDate;

    #[derive(Debug, Clone)]
    pub struct CreateVisitorCommand {
        pub name: String,
        pub email: String,
        pub phone: String,
        pub visit_date: NaiveDate,
        pub source: String,
    }

    /// `followed_up` is deliberately absent; it only changes through
    /// `VisitorService::mark_followed_up`.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateVisitorCommand {
        pub name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub visit_date: Option<NaiveDate>,
        pub source: Option<String>,
    }
}

pub mod equipment {
    use chrono::NaiveDate;
    use shared::EquipmentStatus;

    #[derive(Debug, Clone)]
    pub struct CreateEquipmentCommand {
        pub name: String,
        pub category: String,
        pub status: EquipmentStatus,
        pub last_maintenance: NaiveDate,
        pub next_maintenance: NaiveDate,
        pub location: String,
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateEquipmentCommand {
        pub name: Option<String>,
        pub category: Option<String>,
        pub status: Option<EquipmentStatus>,
        pub last_maintenance: Option<NaiveDate>,
        pub next_maintenance: Option<NaiveDate>,
        pub location: Option<String>,
        /// `Some("")` clears the notes
        pub notes: Option<String>,
    }
}

pub mod message {
    use chrono::NaiveDateTime;
    use shared::{MessageStatus, RecipientGroup};

    #[derive(Debug, Clone)]
    pub struct CreateMessageCommand {
        pub message: String,
        pub recipients: String,
        pub status: MessageStatus,
        pub scheduled_date: Option<NaiveDateTime>,
        pub sent_date: Option<NaiveDateTime>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateMessageCommand {
        pub message: Option<String>,
        pub recipients: Option<String>,
        pub status: Option<MessageStatus>,
        pub scheduled_date: Option<NaiveDateTime>,
        pub sent_date: Option<NaiveDateTime>,
    }

    /// Compose-and-send input from the broadcast form
    #[derive(Debug, Clone)]
    pub struct ComposeBroadcastCommand {
        pub message: String,
        pub group: RecipientGroup,
        /// When set the message is scheduled instead of sent now
        pub schedule: Option<NaiveDateTime>,
    }
}

pub mod user {
    use chrono::NaiveDateTime;
    use shared::{ActivityStatus, UserRole};

    #[derive(Debug, Clone)]
    pub struct CreateUserCommand {
        pub name: String,
        pub email: String,
        pub role: UserRole,
        pub status: ActivityStatus,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateUserCommand {
        pub name: Option<String>,
        pub email: Option<String>,
        pub role: Option<UserRole>,
        pub status: Option<ActivityStatus>,
        pub last_login: Option<NaiveDateTime>,
    }
}

pub mod settings {
    use shared::{AppearanceSettings, NotificationSettings, SecuritySettings};

    /// Shallow merge: a provided section replaces the stored section wholesale.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSettingsCommand {
        pub church_name: Option<String>,
        pub pastor_name: Option<String>,
        pub address: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub notifications: Option<NotificationSettings>,
        pub security: Option<SecuritySettings>,
        pub appearance: Option<AppearanceSettings>,
    }
}

pub mod auth {
    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub name: String,
        pub email: String,
        pub password: String,
        pub church_name: String,
    }
}
