use chrono::Local;
use log::{debug, info, warn};
use shared::{User, UserSummary};

use super::aggregations;
use super::commands::user::{CreateUserCommand, UpdateUserCommand};
use super::errors::{StoreError, StoreResult};
use super::ids::IdGenerator;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Collection};

/// Service for the dashboard's own user list (not the login accounts)
#[derive(Clone)]
pub struct UserService {
    users: Collection<User>,
    ids: IdGenerator,
}

impl UserService {
    pub fn new(context: &StoreContext) -> Self {
        let users = Collection::load(
            keys::USERS,
            context.persistence.clone(),
            context.version.clone(),
            seed::users,
        );
        Self {
            users,
            ids: context.ids.clone(),
        }
    }

    /// Add a user; `last_login` starts at the creation time
    pub fn add(&self, command: CreateUserCommand) -> StoreResult<User> {
        info!("Adding user: name={}, role={}", command.name, command.role);

        let user = User {
            id: self.ids.next_id(),
            name: validation::required_text("Name", &command.name)?,
            email: validation::required_text("Email", &validation::email(&command.email)?)?,
            role: command.role,
            status: command.status,
            last_login: Local::now().naive_local(),
        };

        self.users.push(user.clone());
        info!("Added user: {} with ID: {}", user.name, user.id);

        Ok(user)
    }

    pub fn update(&self, id: &str, command: UpdateUserCommand) -> StoreResult<User> {
        info!("Updating user: {}", id);

        let name = command
            .name
            .as_deref()
            .map(|v| validation::required_text("Name", v))
            .transpose()?;
        let email = command
            .email
            .as_deref()
            .map(|v| validation::email(v).and_then(|e| validation::required_text("Email", &e)))
            .transpose()?;

        self.users
            .update(id, |user| {
                if let Some(name) = name {
                    user.name = name;
                }
                if let Some(email) = email {
                    user.email = email;
                }
                if let Some(role) = command.role {
                    user.role = role;
                }
                if let Some(status) = command.status {
                    user.status = status;
                }
                if let Some(last_login) = command.last_login {
                    user.last_login = last_login;
                }
            })
            .ok_or_else(|| {
                warn!("User not found: {}", id);
                StoreError::not_found("User", id)
            })
    }

    pub fn delete(&self, id: &str) -> bool {
        info!("Deleting user: {}", id);
        let removed = self.users.remove(id);
        if !removed {
            warn!("User not found for delete: {}", id);
        }
        removed
    }

    pub fn list(&self) -> Vec<User> {
        debug!("Listing all users");
        self.users.all()
    }

    pub fn summary(&self) -> UserSummary {
        self.users.with_records(aggregations::user_summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_context;
    use shared::{ActivityStatus, UserRole};

    fn service() -> UserService {
        let (context, _) = test_context();
        UserService::new(&context)
    }

    #[test]
    fn test_add_user() {
        let users = service();

        let user = users
            .add(CreateUserCommand {
                name: "Esther Clark".to_string(),
                email: "esther@church.com".to_string(),
                role: UserRole::Volunteer,
                status: ActivityStatus::Active,
            })
            .unwrap();

        assert_eq!(users.list().len(), 4);
        assert_eq!(users.list()[3], user);
        assert_eq!(users.summary().active, 4);
    }

    #[test]
    fn test_user_email_required() {
        let users = service();

        let result = users.add(CreateUserCommand {
            name: "No Email".to_string(),
            email: "".to_string(),
            role: UserRole::Volunteer,
            status: ActivityStatus::Active,
        });

        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_update_and_delete_user() {
        let users = service();

        let updated = users
            .update(
                "3",
                UpdateUserCommand {
                    role: Some(UserRole::Admin),
                    status: Some(ActivityStatus::Inactive),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);

        let summary = users.summary();
        assert_eq!(summary.admins, 2);
        assert_eq!(summary.active, 2);

        assert!(users.delete("3"));
        assert_eq!(users.summary().total, 2);
        assert!(users.update("3", UpdateUserCommand::default()).is_err());
    }
}
