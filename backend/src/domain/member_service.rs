use log::{debug, info, warn};
use shared::Member;

use super::aggregations;
use super::commands::member::{CreateMemberCommand, UpdateMemberCommand};
use super::errors::{StoreError, StoreResult};
use super::ids::IdGenerator;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Collection};

/// Service for the church member roster
#[derive(Clone)]
pub struct MemberService {
    members: Collection<Member>,
    ids: IdGenerator,
}

impl MemberService {
    /// Create a new MemberService, loading stored members or the sample roster
    pub fn new(context: &StoreContext) -> Self {
        let members = Collection::load(
            keys::MEMBERS,
            context.persistence.clone(),
            context.version.clone(),
            seed::members,
        );
        Self {
            members,
            ids: context.ids.clone(),
        }
    }

    /// Add a member
    pub fn add(&self, command: CreateMemberCommand) -> StoreResult<Member> {
        info!("Adding member: name={}", command.name);

        let member = Member {
            id: self.ids.next_id(),
            name: validation::required_text("Name", &command.name)?,
            email: validation::email(&command.email)?,
            phone: validation::optional_text("Phone", &command.phone)?,
            birth_date: command.birth_date,
            gender: command.gender,
            join_date: command.join_date,
            status: command.status,
            address: validation::optional_text("Address", &command.address)?,
            role: validation::required_text("Role", &command.role)?,
        };

        self.members.push(member.clone());
        info!("Added member: {} with ID: {}", member.name, member.id);

        Ok(member)
    }

    /// Merge the provided fields into an existing member
    pub fn update(&self, id: &str, command: UpdateMemberCommand) -> StoreResult<Member> {
        info!("Updating member: {}", id);

        // Validate everything up front so a bad field never half-applies
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
        let address = command
            .address
            .as_deref()
            .map(|v| validation::optional_text("Address", v))
            .transpose()?;
        let role = command
            .role
            .as_deref()
            .map(|v| validation::required_text("Role", v))
            .transpose()?;

        let updated = self.members.update(id, |member| {
            if let Some(name) = name {
                member.name = name;
            }
            if let Some(email) = email {
                member.email = email;
            }
            if let Some(phone) = phone {
                member.phone = phone;
            }
            if let Some(birth_date) = command.birth_date {
                member.birth_date = birth_date;
            }
            if let Some(gender) = command.gender {
                member.gender = gender;
            }
            if let Some(join_date) = command.join_date {
                member.join_date = join_date;
            }
            if let Some(status) = command.status {
                member.status = status;
            }
            if let Some(address) = address {
                member.address = address;
            }
            if let Some(role) = role {
                member.role = role;
            }
        });

        match updated {
            Some(member) => {
                info!("Updated member: {} with ID: {}", member.name, member.id);
                Ok(member)
            }
            None => {
                warn!("Member not found: {}", id);
                Err(StoreError::not_found("Member", id))
            }
        }
    }

    /// Remove a member. Their attendance records are left in place.
    pub fn delete(&self, id: &str) -> bool {
        info!("Deleting member: {}", id);
        let removed = self.members.remove(id);
        if !removed {
            warn!("Member not found for delete: {}", id);
        }
        removed
    }

    pub fn list(&self) -> Vec<Member> {
        debug!("Listing all members");
        self.members.all()
    }

    pub fn get(&self, id: &str) -> Option<Member> {
        self.members.get(id)
    }

    /// Current display name of a member, if they still exist
    pub fn name_of(&self, id: &str) -> Option<String> {
        self.members
            .with_records(|members| members.iter().find(|m| m.id == id).map(|m| m.name.clone()))
    }

    pub fn search(&self, term: &str) -> Vec<Member> {
        debug!("Searching members for '{}'", term);
        self.members
            .with_records(|members| aggregations::search_members(members, term))
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn collection(&self) -> &Collection<Member> {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, test_context};
    use shared::{ActivityStatus, Gender};

    fn create_command(name: &str) -> CreateMemberCommand {
        CreateMemberCommand {
            name: name.to_string(),
            email: "grace@example.com".to_string(),
            phone: "+1555000111".to_string(),
            birth_date: date(2000, 6, 1),
            gender: Gender::Female,
            join_date: date(2024, 2, 1),
            status: ActivityStatus::Active,
            address: "1 Church Rd".to_string(),
            role: "Volunteer".to_string(),
        }
    }

    #[test]
    fn test_starts_with_seed_roster() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        let names: Vec<String> = service.list().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["John Smith", "Sarah Johnson", "Michael Davis"]);
    }

    #[test]
    fn test_add_member_appends_with_fresh_id() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        let member = service.add(create_command("  Grace Lee ")).unwrap();

        assert_eq!(member.name, "Grace Lee");
        assert!(member.id.parse::<u64>().is_ok());
        assert_eq!(service.count(), 4);
        assert_eq!(service.list().last().unwrap().id, member.id);
        assert_eq!(context.version.current(), 1);
    }

    #[test]
    fn test_add_member_rejects_invalid_input() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        let mut blank_name = create_command(" ");
        blank_name.name = "   ".to_string();
        assert!(matches!(service.add(blank_name), Err(StoreError::Validation(_))));

        let mut bad_email = create_command("Grace");
        bad_email.email = "not-an-email".to_string();
        assert!(matches!(service.add(bad_email), Err(StoreError::Validation(_))));

        assert_eq!(service.count(), 3);
        assert_eq!(context.version.current(), 0);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        let updated = service
            .update(
                "1",
                UpdateMemberCommand {
                    role: Some("Elder".to_string()),
                    status: Some(ActivityStatus::Inactive),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "John Smith");
        assert_eq!(updated.role, "Elder");
        assert_eq!(updated.status, ActivityStatus::Inactive);
        assert_eq!(service.get("1").unwrap(), updated);
    }

    #[test]
    fn test_update_unknown_member() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        let result = service.update("missing", UpdateMemberCommand::default());
        assert_eq!(result, Err(StoreError::not_found("Member", "missing")));
        assert_eq!(context.version.current(), 0);
    }

    #[test]
    fn test_invalid_update_leaves_record_alone() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        let result = service.update(
            "1",
            UpdateMemberCommand {
                role: Some("Deacon".to_string()),
                name: Some("".to_string()),
                ..Default::default()
            },
        );

        assert!(result.is_err());
        assert_eq!(service.get("1").unwrap().role, "Member");
    }

    #[test]
    fn test_delete_member() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        assert!(service.delete("2"));
        assert!(!service.delete("2"));
        assert!(service.get("2").is_none());
        assert_eq!(service.count(), 2);
    }

    #[test]
    fn test_name_of_and_search() {
        let (context, _) = test_context();
        let service = MemberService::new(&context);

        assert_eq!(service.name_of("3").as_deref(), Some("Michael Davis"));
        assert!(service.name_of("404").is_none());
        assert_eq!(service.search("JOHN").len(), 2);
    }
}
