use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// One dispatch attempt for an event occurrence. Append-only audit
/// record: after creation only the status transitions.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: ID,
    pub organization_id: ID,
    pub event_id: ID,
    pub occurrence_date: NaiveDate,
    pub body: String,
    pub recipient_count: usize,
    pub estimated_cost: f64,
    pub status: MessageStatus,
    pub created: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Sending,
    Sent,
    PartiallySent,
    Failed,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::PartiallySent => "partially_sent",
            Self::Failed => "failed",
        }
    }
}

impl Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusError {
    #[error("Status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for MessageStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sending" => Ok(Self::Sending),
            "sent" => Ok(Self::Sent),
            "partially_sent" => Ok(Self::PartiallySent),
            "failed" => Ok(Self::Failed),
            _ => Err(InvalidStatusError::Unrecognized(s.to_string())),
        }
    }
}

/// Per-recipient delivery record belonging to a `Message`.
#[derive(Debug, Clone)]
pub struct MessageRecipient {
    pub id: ID,
    pub message_id: ID,
    pub member_id: ID,
    /// Normalized destination number, or the raw input when
    /// normalization failed
    pub phone: String,
    pub text: String,
    pub status: DeliveryStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(InvalidStatusError::Unrecognized(s.to_string())),
        }
    }
}

const SINGLE_SEGMENT_CHARS: usize = 160;
const MULTI_SEGMENT_CHARS: usize = 153;
const PRICE_PER_SEGMENT: f64 = 0.35;

/// Number of SMS segments a body occupies. Messages over 160 chars are
/// split into 153-char segments by the concatenation header.
pub fn sms_segments(body: &str) -> usize {
    let chars = body.chars().count();
    if chars <= SINGLE_SEGMENT_CHARS {
        1
    } else {
        (chars + MULTI_SEGMENT_CHARS - 1) / MULTI_SEGMENT_CHARS
    }
}

/// Approximate cost of sending `body` to `recipient_count` recipients
pub fn estimate_cost(body: &str, recipient_count: usize) -> f64 {
    sms_segments(body) as f64 * recipient_count as f64 * PRICE_PER_SEGMENT
}

impl Message {
    pub fn new(
        organization_id: ID,
        event_id: ID,
        occurrence_date: NaiveDate,
        body: String,
        recipient_count: usize,
        created: i64,
    ) -> Self {
        let estimated_cost = estimate_cost(&body, recipient_count);
        Self {
            id: Default::default(),
            organization_id,
            event_id,
            occurrence_date,
            body,
            recipient_count,
            estimated_cost,
            status: MessageStatus::Sending,
            created,
        }
    }
}

impl Entity for Message {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl MessageRecipient {
    pub fn new(message_id: ID, member_id: ID, phone: String, text: String) -> Self {
        Self {
            id: Default::default(),
            message_id,
            member_id,
            phone,
            text,
            status: DeliveryStatus::Pending,
            error: None,
        }
    }
}

impl Entity for MessageRecipient {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_body_is_one_segment() {
        assert_eq!(sms_segments("Husk dugnad!"), 1);
        assert_eq!(sms_segments(&"a".repeat(160)), 1);
    }

    #[test]
    fn long_body_splits_into_segments() {
        assert_eq!(sms_segments(&"a".repeat(161)), 2);
        assert_eq!(sms_segments(&"a".repeat(306)), 2);
        assert_eq!(sms_segments(&"a".repeat(307)), 3);
    }

    #[test]
    fn cost_scales_with_recipients_and_segments() {
        let single = estimate_cost("Husk dugnad!", 1);
        assert!((estimate_cost("Husk dugnad!", 10) - single * 10.0).abs() < f64::EPSILON);
        assert!(estimate_cost(&"a".repeat(200), 1) > single);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            MessageStatus::Sending,
            MessageStatus::Sent,
            MessageStatus::PartiallySent,
            MessageStatus::Failed,
        ]
        .iter()
        {
            assert_eq!(status.as_str().parse::<MessageStatus>().unwrap(), *status);
        }
        assert!("gone".parse::<MessageStatus>().is_err());
    }
}
