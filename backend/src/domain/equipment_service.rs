use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::{Equipment, EquipmentSummary};

use super::aggregations;
use super::commands::equipment::{CreateEquipmentCommand, UpdateEquipmentCommand};
use super::errors::{StoreError, StoreResult};
use super::ids::IdGenerator;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Collection};

/// Service for the equipment inventory and maintenance schedule
#[derive(Clone)]
pub struct EquipmentService {
    equipment: Collection<Equipment>,
    ids: IdGenerator,
}

fn clean_notes(notes: &str) -> StoreResult<Option<String>> {
    let notes = validation::optional_text("Notes", notes)?;
    Ok(if notes.is_empty() { None } else { Some(notes) })
}

impl EquipmentService {
    pub fn new(context: &StoreContext) -> Self {
        let equipment = Collection::load(
            keys::EQUIPMENT,
            context.persistence.clone(),
            context.version.clone(),
            seed::equipment,
        );
        Self {
            equipment,
            ids: context.ids.clone(),
        }
    }

    pub fn add(&self, command: CreateEquipmentCommand) -> StoreResult<Equipment> {
        info!("Adding equipment: name={}, status={}", command.name, command.status);

        validation::maintenance_window(command.last_maintenance, command.next_maintenance)?;

        let item = Equipment {
            id: self.ids.next_id(),
            name: validation::required_text("Name", &command.name)?,
            category: validation::required_text("Category", &command.category)?,
            status: command.status,
            last_maintenance: command.last_maintenance,
            next_maintenance: command.next_maintenance,
            location: validation::required_text("Location", &command.location)?,
            notes: match command.notes.as_deref() {
                Some(notes) => clean_notes(notes)?,
                None => None,
            },
        };

        self.equipment.push(item.clone());
        info!("Added equipment: {} with ID: {}", item.name, item.id);

        Ok(item)
    }

    pub fn update(&self, id: &str, command: UpdateEquipmentCommand) -> StoreResult<Equipment> {
        info!("Updating equipment: {}", id);

        let existing = self.equipment.get(id).ok_or_else(|| {
            warn!("Equipment not found: {}", id);
            StoreError::not_found("Equipment", id)
        })?;

        // The window is checked against the merged dates
        validation::maintenance_window(
            command.last_maintenance.unwrap_or(existing.last_maintenance),
            command.next_maintenance.unwrap_or(existing.next_maintenance),
        )?;

        let name = command
            .name
            .as_deref()
            .map(|v| validation::required_text("Name", v))
            .transpose()?;
        let category = command
            .category
            .as_deref()
            .map(|v| validation::required_text("Category", v))
            .transpose()?;
        let location = command
            .location
            .as_deref()
            .map(|v| validation::required_text("Location", v))
            .transpose()?;
        let notes = command.notes.as_deref().map(clean_notes).transpose()?;

        self.equipment
            .update(id, |item| {
                if let Some(name) = name {
                    item.name = name;
                }
                if let Some(category) = category {
                    item.category = category;
                }
                if let Some(status) = command.status {
                    item.status = status;
                }
                if let Some(last) = command.last_maintenance {
                    item.last_maintenance = last;
                }
                if let Some(next) = command.next_maintenance {
                    item.next_maintenance = next;
                }
                if let Some(location) = location {
                    item.location = location;
                }
                if let Some(notes) = notes {
                    item.notes = notes;
                }
            })
            .ok_or_else(|| StoreError::not_found("Equipment", id))
    }

    pub fn delete(&self, id: &str) -> bool {
        info!("Deleting equipment: {}", id);
        let removed = self.equipment.remove(id);
        if !removed {
            warn!("Equipment not found for delete: {}", id);
        }
        removed
    }

    pub fn list(&self) -> Vec<Equipment> {
        debug!("Listing all equipment");
        self.equipment.all()
    }

    pub fn maintenance_due(&self, today: NaiveDate) -> Vec<Equipment> {
        self.equipment
            .with_records(|items| aggregations::maintenance_due(items, today))
    }

    pub fn summary(&self, today: NaiveDate) -> EquipmentSummary {
        self.equipment
            .with_records(|items| aggregations::equipment_summary(items, today))
    }
}
