//! SMS broadcast history.
//!
//! Nothing is actually delivered; a "sent" message is recorded as sent at
//! the moment it was composed.

use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};
use shared::{Member, MessageStatus, MessageSummary, RecipientOption, SmsMessage};

use super::aggregations;
use super::commands::message::{ComposeBroadcastCommand, CreateMessageCommand, UpdateMessageCommand};
use super::errors::{StoreError, StoreResult};
use super::ids::IdGenerator;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Collection};

#[derive(Clone)]
pub struct MessageService {
    messages: Collection<SmsMessage>,
    ids: IdGenerator,
}

/// A scheduled message needs a date to be scheduled for
fn check_schedule(status: MessageStatus, scheduled_date: Option<NaiveDateTime>) -> StoreResult<()> {
    if status == MessageStatus::Scheduled && scheduled_date.is_none() {
        return Err(StoreError::validation("Scheduled messages need a scheduled date"));
    }
    Ok(())
}

impl MessageService {
    pub fn new(context: &StoreContext) -> Self {
        let messages = Collection::load(
            keys::SMS_MESSAGES,
            context.persistence.clone(),
            context.version.clone(),
            seed::sms_messages,
        );
        Self {
            messages,
            ids: context.ids.clone(),
        }
    }

    pub fn add(&self, command: CreateMessageCommand) -> StoreResult<SmsMessage> {
        info!("Adding message: recipients={}, status={}", command.recipients, command.status);

        check_schedule(command.status, command.scheduled_date)?;

        let message = SmsMessage {
            id: self.ids.next_id(),
            message: validation::message_body(&command.message)?,
            recipients: validation::required_text("Recipients", &command.recipients)?,
            scheduled_date: command.scheduled_date,
            sent_date: command.sent_date,
            status: command.status,
        };

        self.messages.push(message.clone());
        info!("Added message with ID: {}", message.id);

        Ok(message)
    }

    pub fn update(&self, id: &str, command: UpdateMessageCommand) -> StoreResult<SmsMessage> {
        info!("Updating message: {}", id);

        let existing = self.messages.get(id).ok_or_else(|| {
            warn!("Message not found: {}", id);
            StoreError::not_found("Message", id)
        })?;

        check_schedule(
            command.status.unwrap_or(existing.status),
            command.scheduled_date.or(existing.scheduled_date),
        )?;

        let body = command
            .message
            .as_deref()
            .map(validation::message_body)
            .transpose()?;
        let recipients = command
            .recipients
            .as_deref()
            .map(|v| validation::required_text("Recipients", v))
            .transpose()?;

        self.messages
            .update(id, |message| {
                if let Some(body) = body {
                    message.message = body;
                }
                if let Some(recipients) = recipients {
                    message.recipients = recipients;
                }
                if let Some(status) = command.status {
                    message.status = status;
                }
                if let Some(scheduled) = command.scheduled_date {
                    message.scheduled_date = Some(scheduled);
                }
                if let Some(sent) = command.sent_date {
                    message.sent_date = Some(sent);
                }
            })
            .ok_or_else(|| StoreError::not_found("Message", id))
    }

    /// Record a broadcast to a recipient group: scheduled when a schedule is
    /// given, otherwise sent now
    pub fn compose_broadcast(&self, command: ComposeBroadcastCommand) -> StoreResult<SmsMessage> {
        let (status, scheduled_date, sent_date) = match command.schedule {
            Some(at) => (MessageStatus::Scheduled, Some(at), None),
            None => (MessageStatus::Sent, None, Some(Local::now().naive_local())),
        };

        self.add(CreateMessageCommand {
            message: command.message,
            recipients: command.group.label().to_string(),
            status,
            scheduled_date,
            sent_date,
        })
    }

    pub fn list(&self) -> Vec<SmsMessage> {
        debug!("Listing all messages");
        self.messages.all()
    }

    pub fn sent(&self) -> Vec<SmsMessage> {
        self.messages
            .with_records(|m| aggregations::messages_with_status(m, MessageStatus::Sent))
    }

    pub fn scheduled(&self) -> Vec<SmsMessage> {
        self.messages
            .with_records(|m| aggregations::messages_with_status(m, MessageStatus::Scheduled))
    }

    pub fn summary(&self) -> MessageSummary {
        self.messages.with_records(aggregations::message_summary)
    }

    /// Recipient groups with their estimated audience for the given roster
    pub fn recipient_options(&self, members: &[Member]) -> Vec<RecipientOption> {
        aggregations::recipient_options(members)
    }
}
