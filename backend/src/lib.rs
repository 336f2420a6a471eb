//! # Church Dashboard Backend
//!
//! Data layer for a small church management dashboard: members, finances,
//! attendance, visitors, equipment, SMS broadcasts, dashboard users, church
//! settings and a simulated login.
//!
//! Everything is kept in memory and written through to a key-value store
//! after each change. [`Backend`] is built once at startup and hands out the
//! services:
//! - Uses synchronous operations, except for login/registration latency
//! - Each collection is one JSON document under a fixed storage key
//! - Storage failures are logged and never surface to callers

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::AppConfig;
pub use domain::{StoreError, StoreResult};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use domain::ids::DataVersion;
use domain::StoreContext;
use storage::Persistence;

/// Main backend struct that owns every service
pub struct Backend {
    pub config: AppConfig,
    pub auth: domain::AuthService,
    pub members: domain::MemberService,
    pub transactions: domain::TransactionService,
    pub attendance: domain::AttendanceService,
    pub visitors: domain::VisitorService,
    pub equipment: domain::EquipmentService,
    pub messages: domain::MessageService,
    pub users: domain::UserService,
    pub settings: domain::SettingsService,
    pub dashboard: domain::DashboardService,
    pub export: domain::ExportService,
    version: DataVersion,
}

impl Backend {
    /// Build the backend over any key-value store. Collections missing from
    /// the store start out with the sample data.
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let context = StoreContext::new(Persistence::new(store));

        let members = domain::MemberService::new(&context);
        let transactions = domain::TransactionService::new(&context);
        let attendance = domain::AttendanceService::new(&context, members.clone());
        let visitors = domain::VisitorService::new(&context);
        let equipment = domain::EquipmentService::new(&context);
        let messages = domain::MessageService::new(&context);
        let users = domain::UserService::new(&context);
        let settings = domain::SettingsService::new(&context);
        let auth = domain::AuthService::new(
            context.persistence.clone(),
            context.ids.clone(),
            config.auth_latency(),
        );
        let dashboard = domain::DashboardService::new(
            members.clone(),
            transactions.clone(),
            attendance.clone(),
            visitors.clone(),
            context.version.clone(),
            config.dashboard_options(),
        );

        Backend {
            config,
            auth,
            members,
            transactions,
            attendance,
            visitors,
            equipment,
            messages,
            users,
            settings,
            dashboard,
            export: domain::ExportService::new(),
            version: context.version,
        }
    }

    /// Build the backend over JSON files in the configured data directory
    pub fn open(config: AppConfig) -> Result<Self> {
        let store = FileStore::new(&config.data_directory).with_context(|| {
            format!(
                "Failed to open data directory {}",
                config.data_directory.display()
            )
        })?;
        info!("Opened data directory {:?}", store.base_directory());
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Build the backend over an in-process store; nothing outlives the process
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Counter bumped by every successful mutation of any collection
    pub fn version(&self) -> u64 {
        self.version.current()
    }

    /// Service names offered when recording attendance
    pub fn services(&self) -> &[String] {
        &self.config.services
    }

    /// Answers offered for how a visitor heard about the church
    pub fn visitor_sources(&self) -> &[String] {
        &self.config.visitor_sources
    }
}
