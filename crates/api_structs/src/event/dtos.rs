use chrono::{NaiveDate, NaiveTime};
use forening_domain::{Event, EventReminder, RecurrenceFrequency, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub organization_id: ID,
    pub name: String,
    pub description: Option<String>,
    pub anchor_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub frequency: Option<RecurrenceFrequency>,
    pub reminder: Option<EventReminder>,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id,
            organization_id: event.organization_id,
            name: event.name,
            description: event.description,
            anchor_date: event.anchor_date,
            end_date: event.end_date,
            start_time: event.start_time,
            location: event.location,
            frequency: event.frequency,
            reminder: event.reminder,
        }
    }
}
