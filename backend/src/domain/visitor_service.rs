use log::{debug, info, warn};
use shared::{Visitor, VisitorSummary};

use super::aggregations;
use super::commands::visitor::{CreateVisitorCommand, UpdateVisitorCommand};
use super::errors::{StoreError, StoreResult};
use super::ids::IdGenerator;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Collection};

/// Service for first-time visitors and their follow-up state
#[derive(Clone)]
pub struct VisitorService {
    visitors: Collection<Visitor>,
    ids: IdGenerator,
}

impl VisitorService {
    pub fn new(context: &StoreContext) -> Self {
        let visitors = Collection::load(
            keys::VISITORS,
            context.persistence.clone(),
            context.version.clone(),
            seed::visitors,
        );
        Self {
            visitors,
            ids: context.ids.clone(),
        }
    }

    /// Register a visitor. New visitors always start without a follow-up.
    pub fn add(&self, command: CreateVisitorCommand) -> StoreResult<Visitor> {
        info!("Adding visitor: name={}, visit_date={}", command.name, command.visit_date);

        let visitor = Visitor {
            id: self.ids.next_id(),
            name: validation::required_text("Name", &command.name)?,
            email: validation::email(&command.email)?,
            phone: validation::optional_text("Phone", &command.phone)?,
            visit_date: command.visit_date,
            source: validation::required_text("Source", &command.source)?,
            followed_up: false,
        };

        self.visitors.push(visitor.clone());
        info!("Added visitor: {} with ID: {}", visitor.name, visitor.id);

        Ok(visitor)
    }

    pub fn update(&self, id: &str, command: UpdateVisitorCommand) -> StoreResult<Visitor> {
        info!("Updating visitor: {}", id);

        let name = command
            .name
            .as_deref()
            .map(|v| validation::required_text("Name", v))
            .transpose()?;
        let email = command.email.as_deref().map(validation::email).transpose()?;
        let phone = command
            .phone
            .as_deref()
            .map(|v| validation::optional_text("Phone", v))
            .transpose()?;
        let source = command
            .source
            .as_deref()
            .map(|v| validation::required_text("Source", v))
            .transpose()?;

        self.visitors
            .update(id, |visitor| {
                if let Some(name) = name {
                    visitor.name = name;
                }
                if let Some(email) = email {
                    visitor.email = email;
                }
                if let Some(phone) = phone {
                    visitor.phone = phone;
                }
                if let Some(visit_date) = command.visit_date {
                    visitor.visit_date = visit_date;
                }
                if let Some(source) = source {
                    visitor.source = source;
                }
            })
            .ok_or_else(|| {
                warn!("Visitor not found: {}", id);
                StoreError::not_found("Visitor", id)
            })
    }

    /// Set `followed_up`; nothing else on the record changes
    pub fn mark_followed_up(&self, id: &str) -> StoreResult<Visitor> {
        info!("Marking visitor {} as followed up", id);

        self.visitors
            .update(id, |visitor| visitor.followed_up = true)
            .ok_or_else(|| {
                warn!("Visitor not found: {}", id);
                StoreError::not_found("Visitor", id)
            })
    }

    pub fn list(&self) -> Vec<Visitor> {
        debug!("Listing all visitors");
        self.visitors.all()
    }

    pub fn pending_follow_ups(&self) -> Vec<Visitor> {
        self.visitors.with_records(aggregations::pending_follow_ups)
    }

    pub fn completed_follow_ups(&self) -> Vec<Visitor> {
        self.visitors.with_records(aggregations::completed_follow_ups)
    }

    pub fn summary(&self) -> VisitorSummary {
        self.visitors.with_records(aggregations::visitor_summary)
    }

    pub(crate) fn collection(&self) -> &Collection<Visitor> {
        &self.visitors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, test_context};

    fn service() -> VisitorService {
        let (context, _) = test_context();
        VisitorService::new(&context)
    }

    #[test]
    fn test_add_visitor_starts_pending() {
        let visitors = service();

        let visitor = visitors
            .add(CreateVisitorCommand {
                name: "Ruth Miller".to_string(),
                email: "".to_string(),
                phone: "+1555000222".to_string(),
                visit_date: date(2024, 1, 28),
                source: "Online".to_string(),
            })
            .unwrap();

        assert!(!visitor.followed_up);
        assert_eq!(visitors.summary().pending_follow_ups, 2);
    }

    #[test]
    fn test_mark_followed_up_changes_only_the_flag() {
        let visitors = service();
        let before = visitors.list()[0].clone();

        let after = visitors.mark_followed_up(&before.id).unwrap();

        assert!(after.followed_up);
        assert_eq!(Visitor { followed_up: false, ..after }, before);
        assert!(visitors.pending_follow_ups().is_empty());
        assert_eq!(visitors.completed_follow_ups().len(), 2);
    }

    #[test]
    fn test_mark_followed_up_unknown() {
        let visitors = service();
        assert_eq!(
            visitors.mark_followed_up("nope"),
            Err(StoreError::not_found("Visitor", "nope"))
        );
    }

    #[test]
    fn test_update_visitor() {
        let visitors = service();

        let updated = visitors
            .update(
                "2",
                UpdateVisitorCommand {
                    source: Some("Community Event".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.source, "Community Event");
        assert!(updated.followed_up);
        assert_eq!(updated.name, "David Brown");
    }
}
