//! # Authentication
//!
//! A local, simulated login: registered accounts live in storage next to the
//! church data and every login/register waits a fixed latency before
//! answering. Passwords are compared and stored as plain text.
//!
//! Failures are reported as `None` together with [`AuthService::FAILURE_MESSAGE`];
//! the caller is never told whether the email or the password was wrong.

use chrono::Utc;
use log::{debug, info, warn};
use shared::{AuthAccount, Organization, SessionUser, UserRole};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use super::commands::auth::RegisterCommand;
use super::ids::IdGenerator;
use crate::storage::{keys, Persistence};

/// Avatar image generated from the account name
pub fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=3B82F6&color=fff",
        urlencoding::encode(name)
    )
}

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<RwLock<Vec<AuthAccount>>>,
    organizations: Arc<RwLock<Vec<Organization>>>,
    current: Arc<RwLock<Option<SessionUser>>>,
    persistence: Persistence,
    ids: IdGenerator,
    latency: Duration,
}

impl AuthService {
    pub const FAILURE_MESSAGE: &'static str = "Authentication failed. Please check your details and try again.";

    /// Create a new AuthService, restoring any signed-in session from storage
    pub fn new(persistence: Persistence, ids: IdGenerator, latency: Duration) -> Self {
        let accounts: Vec<AuthAccount> = persistence.load(keys::AUTH_USERS, Vec::new());
        let organizations: Vec<Organization> = persistence.load(keys::AUTH_CHURCHES, Vec::new());
        let current: Option<SessionUser> = persistence.load(keys::AUTH_CURRENT_USER, None);

        if let Some(user) = &current {
            info!("Restored session for {}", user.email);
        }
        debug!(
            "Loaded {} accounts and {} organizations",
            accounts.len(),
            organizations.len()
        );

        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            organizations: Arc::new(RwLock::new(organizations)),
            current: Arc::new(RwLock::new(current)),
            persistence,
            ids,
            latency,
        }
    }

    /// Sign in with an exact email and password match
    pub async fn login(&self, email: &str, password: &str) -> Option<SessionUser> {
        info!("Login attempt for {}", email);
        self.simulate_latency().await;

        let session = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(AuthAccount::to_session_user);

        match session {
            Some(user) => {
                self.start_session(user.clone());
                info!("Logged in {}", user.email);
                Some(user)
            }
            None => {
                warn!("Login failed for {}", email);
                None
            }
        }
    }

    /// Create an admin account and its organization, then sign it in.
    /// Fails when the email is already registered.
    pub async fn register(&self, command: RegisterCommand) -> Option<SessionUser> {
        info!("Registering {} for {}", command.email, command.church_name);
        self.simulate_latency().await;

        let session = {
            let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);

            if accounts.iter().any(|a| a.email == command.email) {
                warn!("Registration rejected, email already registered: {}", command.email);
                return None;
            }

            let church_id = self.ids.next_id();
            let account = AuthAccount {
                id: self.ids.next_id(),
                avatar: Some(avatar_url(&command.name)),
                name: command.name,
                email: command.email,
                password: command.password,
                role: UserRole::Admin,
                church_id: church_id.clone(),
            };

            let organization = Organization {
                id: church_id,
                name: command.church_name,
                admin_id: account.id.clone(),
                created_at: Utc::now(),
            };

            accounts.push(account.clone());
            self.persistence.save(keys::AUTH_USERS, &*accounts);

            let mut organizations = self
                .organizations
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            organizations.push(organization);
            self.persistence.save(keys::AUTH_CHURCHES, &*organizations);

            account.to_session_user()
        };

        self.start_session(session.clone());
        info!("Registered and signed in {}", session.email);
        Some(session)
    }

    pub fn logout(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.persistence.remove(keys::AUTH_CURRENT_USER);

        if let Some(user) = previous {
            info!("Logged out {}", user.email);
        }
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Every registered organization
    pub fn organizations(&self) -> Vec<Organization> {
        self.organizations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of registered accounts
    pub fn account_count(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn start_session(&self, user: SessionUser) {
        self.persistence.save(keys::AUTH_CURRENT_USER, &user);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn service(store: &MemoryStore) -> AuthService {
        AuthService::new(
            Persistence::new(Arc::new(store.clone())),
            IdGenerator::new(),
            Duration::ZERO,
        )
    }

    fn register_command(email: &str) -> RegisterCommand {
        RegisterCommand {
            name: "Grace Admin".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
            church_name: "Grace Chapel".to_string(),
        }
    }

    #[test]
    fn test_avatar_url_encodes_name() {
        assert_eq!(
            avatar_url("Grace Admin"),
            "https://ui-avatars.com/api/?name=Grace%20Admin&background=3B82F6&color=fff"
        );
    }

    #[tokio::test]
    async fn test_register_signs_in_admin() {
        let store = MemoryStore::new();
        let auth = service(&store);

        let user = auth.register(register_command("admin@grace.org")).await.unwrap();

        assert_eq!(user.role, UserRole::Admin);
        assert!(auth.is_authenticated());
        assert_eq!(auth.current_user(), Some(user.clone()));

        let organizations = auth.organizations();
        assert_eq!(organizations.len(), 1);
        assert_eq!(organizations[0].id, user.church_id);
        assert_eq!(organizations[0].admin_id, user.id);
        assert_eq!(organizations[0].name, "Grace Chapel");

        assert!(store.contains_key(keys::AUTH_USERS));
        assert!(store.contains_key(keys::AUTH_CHURCHES));
        let stored = store.get(keys::AUTH_CURRENT_USER).unwrap().unwrap();
        assert!(!stored.contains("password"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let store = MemoryStore::new();
        let auth = service(&store);
        auth.register(register_command("admin@grace.org")).await.unwrap();
        auth.logout();
        let stored_accounts = store.get(keys::AUTH_USERS).unwrap().unwrap();
        let stored_churches = store.get(keys::AUTH_CHURCHES).unwrap().unwrap();

        let second = auth.register(register_command("admin@grace.org")).await;

        assert!(second.is_none());
        assert_eq!(store.get(keys::AUTH_USERS).unwrap().unwrap(), stored_accounts);
        assert_eq!(store.get(keys::AUTH_CHURCHES).unwrap().unwrap(), stored_churches);
        assert!(!store.contains_key(keys::AUTH_CURRENT_USER));
        assert_eq!(auth.account_count(), 1);
        assert_eq!(auth.organizations().len(), 1);
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let store = MemoryStore::new();
        let auth = service(&store);
        let registered = auth.register(register_command("admin@grace.org")).await.unwrap();
        auth.logout();

        let user = auth.login("admin@grace.org", "hunter2").await.unwrap();

        assert_eq!(user, registered);
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_failures_do_not_mutate() {
        let store = MemoryStore::new();
        let auth = service(&store);
        auth.register(register_command("admin@grace.org")).await.unwrap();
        auth.logout();

        assert!(auth.login("admin@grace.org", "wrong").await.is_none());
        assert!(auth.login("ADMIN@grace.org", "hunter2").await.is_none());
        assert!(auth.login("nobody@grace.org", "hunter2").await.is_none());
        assert!(!auth.is_authenticated());
        assert!(!store.contains_key(keys::AUTH_CURRENT_USER));
    }

    #[tokio::test]
    async fn test_session_restored_and_logout_clears_storage() {
        let store = MemoryStore::new();
        let user = service(&store)
            .register(register_command("admin@grace.org"))
            .await
            .unwrap();

        let restored = service(&store);
        assert_eq!(restored.current_user(), Some(user));

        restored.logout();
        assert!(!restored.is_authenticated());
        assert!(!store.contains_key(keys::AUTH_CURRENT_USER));
        assert!(!service(&store).is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_latency() {
        let store = MemoryStore::new();
        let auth = AuthService::new(
            Persistence::new(Arc::new(store)),
            IdGenerator::new(),
            Duration::from_millis(1000),
        );

        let started = tokio::time::Instant::now();
        assert!(auth.login("a@b.c", "x").await.is_none());
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
