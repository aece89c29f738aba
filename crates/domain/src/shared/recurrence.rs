use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum InvalidFrequencyError {
    #[error("Frequency: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for RecurrenceFrequency {
    type Err = InvalidFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(InvalidFrequencyError::Unrecognized(s.to_string())),
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        1 => 31,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 => 31,
        4 => 30,
        5 => 31,
        6 => 30,
        7 => 31,
        8 => 31,
        9 => 30,
        10 => 31,
        11 => 30,
        12 => 31,
        _ => panic!("Invalid month"),
    }
}

/// Builds a date in the given month, clamping the day to the last
/// day of that month when the month is too short. A day 31 anchor
/// lands on Feb 28 / Feb 29 instead of rolling over into March.
fn date_clamped(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.min(get_month_length(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Computes the first occurrence of a recurring series on or after
/// `reference`, where `anchor` is the date of the first occurrence.
///
/// An anchor in the future is its own next occurrence. Weekly series
/// never land on `reference` itself once the anchor has passed: a
/// reference that falls on the series weekday resolves to the slot one
/// week later. Monthly and yearly series keep the anchor's day-of-month
/// and clamp it to shorter months, so a Jan 31 anchor occurs on Feb 28
/// and a Feb 29 anchor occurs on Feb 28 in non-leap years.
pub fn next_occurrence(
    anchor: NaiveDate,
    frequency: RecurrenceFrequency,
    reference: NaiveDate,
) -> Option<NaiveDate> {
    if anchor > reference {
        return Some(anchor);
    }

    match frequency {
        RecurrenceFrequency::Daily => Some(reference),
        RecurrenceFrequency::Weekly => {
            let anchor_weekday = anchor.weekday().num_days_from_monday() as i64;
            let reference_weekday = reference.weekday().num_days_from_monday() as i64;
            let mut days_ahead = (anchor_weekday - reference_weekday).rem_euclid(7);
            if days_ahead == 0 {
                days_ahead = 7;
            }
            reference.checked_add_signed(Duration::days(days_ahead))
        }
        RecurrenceFrequency::Monthly => {
            let candidate = date_clamped(reference.year(), reference.month(), anchor.day())?;
            if candidate >= reference {
                return Some(candidate);
            }
            let (year, month) = if reference.month() == 12 {
                (reference.year() + 1, 1)
            } else {
                (reference.year(), reference.month() + 1)
            };
            date_clamped(year, month, anchor.day())
        }
        RecurrenceFrequency::Yearly => {
            let candidate = date_clamped(reference.year(), anchor.month(), anchor.day())?;
            if candidate >= reference {
                return Some(candidate);
            }
            date_clamped(reference.year() + 1, anchor.month(), anchor.day())
        }
    }
}
