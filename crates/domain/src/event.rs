use crate::shared::entity::{Entity, ID};
use crate::shared::recurrence::{next_occurrence, RecurrenceFrequency};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// A one-off or recurring occasion belonging to an `Organization`.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: ID,
    pub organization_id: ID,
    pub name: String,
    pub description: Option<String>,
    /// First (or only) occurrence of the event
    pub anchor_date: NaiveDate,
    /// Last date on which a recurring event may occur
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub location: Option<String>,
    /// `None` for one-off events
    pub frequency: Option<RecurrenceFrequency>,
    /// Present iff reminders are enabled for this event
    pub reminder: Option<EventReminder>,
}

/// Reminder settings for an `Event`. Presence of this struct is what
/// "reminder enabled" means, so an enabled reminder always carries a
/// lead-time policy and a recipient selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventReminder {
    pub lead: LeadTime,
    #[serde(flatten)]
    pub recipients: RecipientSelector,
    pub template_id: Option<ID>,
    pub custom_message: Option<String>,
}

/// Whether a reminder fires one day before or on the day of an
/// occurrence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadTime {
    DayBefore,
    DayOf,
}

impl LeadTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayBefore => "day_before",
            Self::DayOf => "day_of",
        }
    }
}

impl Display for LeadTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidLeadTimeError {
    #[error("Lead time policy: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for LeadTime {
    type Err = InvalidLeadTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day_before" => Ok(Self::DayBefore),
            "day_of" => Ok(Self::DayOf),
            _ => Err(InvalidLeadTimeError::Unrecognized(s.to_string())),
        }
    }
}

/// Selects which members receive a reminder. Group and member ids come
/// in as raw strings from clients and storage; they are parsed into
/// `ID`s at resolution time and malformed entries are dropped there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "recipientType", content = "recipientIds")]
#[serde(rename_all = "snake_case")]
pub enum RecipientSelector {
    AllMembers,
    Groups(Vec<String>),
    SelectedMembers(Vec<String>),
}

impl RecipientSelector {
    /// Parses the raw id list, dropping malformed entries. Empty for
    /// `AllMembers`, which carries no ids.
    pub fn valid_ids(&self) -> Vec<ID> {
        match self {
            Self::AllMembers => Vec::new(),
            Self::Groups(ids) | Self::SelectedMembers(ids) => ids
                .iter()
                .filter_map(|raw| raw.parse::<ID>().ok())
                .collect(),
        }
    }
}

/// A single calendar instance of an `Event` for which a reminder is due.
#[derive(Debug, Clone, PartialEq)]
pub struct DueOccurrence {
    pub date: NaiveDate,
    pub lead: LeadTime,
}

impl Event {
    pub fn new(organization_id: ID, name: String, anchor_date: NaiveDate) -> Self {
        Self {
            id: Default::default(),
            organization_id,
            name,
            description: None,
            anchor_date,
            end_date: None,
            start_time: None,
            location: None,
            frequency: None,
            reminder: None,
        }
    }

    pub fn reminder_enabled(&self) -> bool {
        self.reminder.is_some()
    }

    /// Decides whether a reminder for this event is due on `today` and
    /// for which occurrence. One-off events have exactly one occurrence,
    /// the anchor date. Recurring events resolve their next occurrence
    /// on or after `today`, bounded by the optional end date. The date
    /// formulas are recomputed on every call.
    pub fn due_occurrence(&self, today: NaiveDate) -> Option<DueOccurrence> {
        let reminder = self.reminder.as_ref()?;

        let occurrence = match self.frequency {
            None => self.anchor_date,
            Some(frequency) => {
                let occurrence = next_occurrence(self.anchor_date, frequency, today)?;
                if let Some(end_date) = self.end_date {
                    if occurrence > end_date {
                        return None;
                    }
                }
                occurrence
            }
        };

        let send_date = match reminder.lead {
            LeadTime::DayBefore => occurrence.checked_sub_signed(Duration::days(1))?,
            LeadTime::DayOf => occurrence,
        };

        if send_date == today {
            Some(DueOccurrence {
                date: occurrence,
                lead: reminder.lead,
            })
        } else {
            None
        }
    }
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd(year, month, day)
    }

    fn event_with_reminder(anchor: NaiveDate, lead: LeadTime) -> Event {
        let mut event = Event::new(Default::default(), "Julebord".into(), anchor);
        event.reminder = Some(EventReminder {
            lead,
            recipients: RecipientSelector::AllMembers,
            template_id: None,
            custom_message: None,
        });
        event
    }

    #[test]
    fn one_off_day_before_is_due_only_on_the_day_before() {
        let event = event_with_reminder(date(2025, 12, 12), LeadTime::DayBefore);

        assert_eq!(
            event.due_occurrence(date(2025, 12, 11)),
            Some(DueOccurrence {
                date: date(2025, 12, 12),
                lead: LeadTime::DayBefore,
            })
        );
        assert_eq!(event.due_occurrence(date(2025, 12, 10)), None);
        assert_eq!(event.due_occurrence(date(2025, 12, 12)), None);
    }

    #[test]
    fn one_off_day_of_is_due_only_on_the_day() {
        let event = event_with_reminder(date(2025, 12, 12), LeadTime::DayOf);

        assert_eq!(
            event.due_occurrence(date(2025, 12, 12)),
            Some(DueOccurrence {
                date: date(2025, 12, 12),
                lead: LeadTime::DayOf,
            })
        );
        assert_eq!(event.due_occurrence(date(2025, 12, 11)), None);
        assert_eq!(event.due_occurrence(date(2025, 12, 13)), None);
    }

    #[test]
    fn weekly_day_before_is_due_the_day_before_each_occurrence() {
        // Anchor 2025-06-02 is a Monday
        let mut event = event_with_reminder(date(2025, 6, 2), LeadTime::DayBefore);
        event.frequency = Some(RecurrenceFrequency::Weekly);

        // Sunday before the next Monday occurrence
        assert_eq!(
            event.due_occurrence(date(2025, 6, 8)),
            Some(DueOccurrence {
                date: date(2025, 6, 9),
                lead: LeadTime::DayBefore,
            })
        );
        // Saturday: occurrence is two days out
        assert_eq!(event.due_occurrence(date(2025, 6, 7)), None);
    }

    #[test]
    fn recurring_event_past_end_date_is_never_due() {
        let mut event = event_with_reminder(date(2025, 6, 2), LeadTime::DayBefore);
        event.frequency = Some(RecurrenceFrequency::Weekly);
        event.end_date = Some(date(2025, 6, 9));

        // Next occurrence after the end date
        assert_eq!(event.due_occurrence(date(2025, 6, 15)), None);
        // Last occurrence within the end date still fires
        assert!(event.due_occurrence(date(2025, 6, 8)).is_some());
    }

    #[test]
    fn monthly_day_of_fires_on_clamped_occurrence() {
        let mut event = event_with_reminder(date(2025, 1, 31), LeadTime::DayOf);
        event.frequency = Some(RecurrenceFrequency::Monthly);

        assert_eq!(
            event.due_occurrence(date(2025, 2, 28)),
            Some(DueOccurrence {
                date: date(2025, 2, 28),
                lead: LeadTime::DayOf,
            })
        );
    }

    #[test]
    fn due_across_year_boundary() {
        let event = event_with_reminder(date(2026, 1, 1), LeadTime::DayBefore);
        assert!(event.due_occurrence(date(2025, 12, 31)).is_some());
    }

    #[test]
    fn event_without_reminder_is_never_due() {
        let event = Event::new(Default::default(), "Dugnad".into(), date(2025, 12, 12));
        assert_eq!(event.due_occurrence(date(2025, 12, 11)), None);
        assert_eq!(event.due_occurrence(date(2025, 12, 12)), None);
    }

    #[test]
    fn selector_drops_malformed_ids() {
        let selector = RecipientSelector::SelectedMembers(vec![
            "not-a-uuid".into(),
            "11111111-1111-1111-1111-111111111111".into(),
        ]);
        let ids = selector.valid_ids();
        assert_eq!(ids.len(), 1);
        assert_eq!(
            ids[0].as_string(),
            "11111111-1111-1111-1111-111111111111"
        );
    }

    #[test]
    fn selector_serializes_with_tagged_recipient_type() {
        let selector = RecipientSelector::Groups(vec!["abc".into()]);
        let json = serde_json::to_string(&selector).unwrap();
        assert!(json.contains("\"recipientType\":\"groups\""));
        assert!(json.contains("\"recipientIds\":[\"abc\"]"));

        let all: RecipientSelector =
            serde_json::from_str("{\"recipientType\":\"all_members\"}").unwrap();
        assert_eq!(all, RecipientSelector::AllMembers);
    }
}
