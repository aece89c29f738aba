use crate::dtos::EventDTO;
use chrono::{NaiveDate, NaiveTime};
use forening_domain::{Event, EventReminder, RecurrenceFrequency, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event: EventDTO,
}

impl EventResponse {
    pub fn new(event: Event) -> Self {
        Self {
            event: EventDTO::new(event),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub description: Option<String>,
        pub anchor_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        pub start_time: Option<NaiveTime>,
        pub location: Option<String>,
        pub frequency: Option<RecurrenceFrequency>,
        pub reminder: Option<EventReminder>,
    }

    pub type APIResponse = EventResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}
