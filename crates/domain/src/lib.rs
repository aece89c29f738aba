mod event;
mod member;
mod message;
mod organization;
mod phone;
mod report;
mod sent_log;
mod shared;
mod template;

pub use event::{DueOccurrence, Event, EventReminder, LeadTime, RecipientSelector};
pub use member::{Member, MemberGroup};
pub use message::{DeliveryStatus, Message, MessageRecipient, MessageStatus};
pub use organization::{Organization, OrganizationSettings, SmsSettings};
pub use phone::{InvalidPhoneError, PhoneNumber};
pub use report::{ErrorCategory, RunError, RunExecution, RunReport, RunStatus};
pub use sent_log::ReminderSentLog;
pub use shared::entity::{Entity, ID};
pub use shared::recurrence::{next_occurrence, RecurrenceFrequency};
pub use template::{default_message, render_message, MessageTemplate};
