use log::{debug, info};
use shared::ChurchSettings;
use std::sync::{Arc, PoisonError, RwLock};

use super::commands::settings::UpdateSettingsCommand;
use super::errors::{StoreError, StoreResult};
use super::ids::DataVersion;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Persistence};

/// Service for the single church settings document
#[derive(Clone)]
pub struct SettingsService {
    settings: Arc<RwLock<ChurchSettings>>,
    persistence: Persistence,
    version: DataVersion,
}

impl SettingsService {
    pub fn new(context: &StoreContext) -> Self {
        let settings = context
            .persistence
            .load_or_else(keys::SETTINGS, seed::settings);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            persistence: context.persistence.clone(),
            version: context.version.clone(),
        }
    }

    pub fn get(&self) -> ChurchSettings {
        debug!("Getting church settings");
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Shallow merge: each provided field or section replaces the stored one
    pub fn update(&self, command: UpdateSettingsCommand) -> StoreResult<ChurchSettings> {
        info!("Updating church settings");

        let church_name = command
            .church_name
            .as_deref()
            .map(|v| validation::required_text("Church name", v))
            .transpose()?;
        let pastor_name = command
            .pastor_name
            .as_deref()
            .map(|v| validation::optional_text("Pastor name", v))
            .transpose()?;
        let address = command
            .address
            .as_deref()
            .map(|v| validation::optional_text("Address", v))
            .transpose()?;
        let phone = command
            .phone
            .as_deref()
            .map(|v| validation::optional_text("Phone", v))
            .transpose()?;
        let email = command.email.as_deref().map(validation::email).transpose()?;

        if let Some(security) = &command.security {
            if security.session_timeout == 0 {
                return Err(StoreError::validation("Session timeout must be at least one minute"));
            }
        }

        let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(church_name) = church_name {
            settings.church_name = church_name;
        }
        if let Some(pastor_name) = pastor_name {
            settings.pastor_name = pastor_name;
        }
        if let Some(address) = address {
            settings.address = address;
        }
        if let Some(phone) = phone {
            settings.phone = phone;
        }
        if let Some(email) = email {
            settings.email = email;
        }
        if let Some(notifications) = command.notifications {
            settings.notifications = notifications;
        }
        if let Some(security) = command.security {
            settings.security = security;
        }
        if let Some(appearance) = command.appearance {
            settings.appearance = appearance;
        }

        self.persistence.save(keys::SETTINGS, &*settings);
        self.version.bump();
        info!("Saved church settings for {}", settings.church_name);

        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;
    use crate::test_utils::test_context;
    use shared::{AppearanceSettings, SecuritySettings, Theme};

    #[test]
    fn test_defaults_from_seed() {
        let (context, _) = test_context();
        let settings = SettingsService::new(&context).get();
        assert_eq!(settings.church_name, "Grace Community Church");
        assert_eq!(settings.security.session_timeout, 60);
    }

    #[test]
    fn test_section_replaced_wholesale() {
        let (context, store) = test_context();
        let service = SettingsService::new(&context);

        let updated = service
            .update(UpdateSettingsCommand {
                appearance: Some(AppearanceSettings {
                    theme: Theme::Dark,
                    language: "es".to_string(),
                }),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.appearance.theme, Theme::Dark);
        assert_eq!(updated.church_name, "Grace Community Church");
        assert!(updated.notifications.email);

        let stored: ChurchSettings =
            serde_json::from_str(&store.get(keys::SETTINGS).unwrap().unwrap()).unwrap();
        assert_eq!(stored, updated);
        assert_eq!(context.version.current(), 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let (context, store) = test_context();
        let service = SettingsService::new(&context);

        let blank_name = service.update(UpdateSettingsCommand {
            church_name: Some(" ".to_string()),
            ..Default::default()
        });
        assert!(blank_name.is_err());

        let zero_timeout = service.update(UpdateSettingsCommand {
            security: Some(SecuritySettings {
                session_timeout: 0,
                two_factor_auth: true,
                password_requirements: true,
            }),
            ..Default::default()
        });
        assert!(zero_timeout.is_err());

        assert!(!store.contains_key(keys::SETTINGS));
        assert!(!service.get().security.two_factor_auth);
    }

    #[test]
    fn test_settings_reload() {
        let (context, _) = test_context();
        let service = SettingsService::new(&context);
        service
            .update(UpdateSettingsCommand {
                pastor_name: Some("Pastor Ruth Adams".to_string()),
                ..Default::default()
            })
            .unwrap();

        let reloaded = SettingsService::new(&context).get();
        assert_eq!(reloaded.pastor_name, "Pastor Ruth Adams");
    }
}
