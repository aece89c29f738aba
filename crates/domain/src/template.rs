use crate::event::Event;
use crate::shared::entity::{Entity, ID};

/// A reusable message body with placeholders, owned by an
/// `Organization`.
///
/// Supported placeholders: `{EventName}`, `{EventDate}`, `{EventTime}`,
/// `{Location}`, `{Description}`, `{FirstName}`, `{LastName}`.
/// Placeholders for fields the event does not have expand to the empty
/// string.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub id: ID,
    pub organization_id: ID,
    pub name: String,
    pub body: String,
}

impl MessageTemplate {
    pub fn new(organization_id: ID, name: String, body: String) -> Self {
        Self {
            id: Default::default(),
            organization_id,
            name,
            body,
        }
    }
}

impl Entity for MessageTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Expands placeholders in `body` into event- and recipient-specific
/// text.
pub fn render_message(body: &str, event: &Event, first_name: &str, last_name: &str) -> String {
    let time = event
        .start_time
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default();

    body.replace("{EventName}", &event.name)
        .replace(
            "{EventDate}",
            &event.anchor_date.format(DATE_FORMAT).to_string(),
        )
        .replace("{EventTime}", &time)
        .replace("{Location}", event.location.as_deref().unwrap_or(""))
        .replace("{Description}", event.description.as_deref().unwrap_or(""))
        .replace("{FirstName}", first_name)
        .replace("{LastName}", last_name)
}

/// Fallback body used when an event has neither a template nor a
/// custom message configured.
pub fn default_message(event: &Event) -> String {
    let mut body = format!(
        "Reminder: {} on {}",
        event.name,
        event.anchor_date.format(DATE_FORMAT)
    );
    if let Some(time) = event.start_time {
        body.push_str(&format!(" at {}", time.format(TIME_FORMAT)));
    }
    if let Some(location) = &event.location {
        body.push_str(&format!(", {}", location));
    }
    if let Some(description) = &event.description {
        body.push_str(&format!(". {}", description));
    }
    body
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn event() -> Event {
        let mut event = Event::new(
            Default::default(),
            "Sommerfest".into(),
            NaiveDate::from_ymd(2025, 6, 14),
        );
        event.start_time = Some(NaiveTime::from_hms(18, 30, 0));
        event.location = Some("Klubbhuset".into());
        event.description = Some("Ta med noe til grillen".into());
        event
    }

    #[test]
    fn expands_all_placeholders() {
        let body = "Hei {FirstName} {LastName}! {EventName} er {EventDate} kl {EventTime} pa {Location}. {Description}";
        let rendered = render_message(body, &event(), "Kari", "Nordmann");
        assert_eq!(
            rendered,
            "Hei Kari Nordmann! Sommerfest er 14.06.2025 kl 18:30 pa Klubbhuset. Ta med noe til grillen"
        );
    }

    #[test]
    fn missing_event_fields_expand_to_empty() {
        let mut event = event();
        event.start_time = None;
        event.location = None;
        let rendered = render_message("{EventTime}|{Location}", &event, "Kari", "Nordmann");
        assert_eq!(rendered, "|");
    }

    #[test]
    fn body_without_placeholders_is_untouched() {
        let rendered = render_message("Husk dugnad!", &event(), "Kari", "Nordmann");
        assert_eq!(rendered, "Husk dugnad!");
    }

    #[test]
    fn default_message_contains_event_essentials() {
        let body = default_message(&event());
        assert_eq!(
            body,
            "Reminder: Sommerfest on 14.06.2025 at 18:30, Klubbhuset. Ta med noe til grillen"
        );
    }

    #[test]
    fn default_message_without_optional_fields() {
        let event = Event::new(
            Default::default(),
            "Dugnad".into(),
            NaiveDate::from_ymd(2025, 5, 1),
        );
        assert_eq!(default_message(&event), "Reminder: Dugnad on 01.05.2025");
    }
}
