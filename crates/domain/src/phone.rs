use std::fmt::Display;
use thiserror::Error;

/// A phone number normalized to the international format the SMS
/// provider expects: a leading `+` followed by 8 to 15 digits.
///
/// Normalization accepts the formats members typically enter: spaces,
/// dashes and parentheses are stripped, a `00` international prefix is
/// rewritten to `+`, and bare national numbers get the organization's
/// country code prepended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

#[derive(Error, Debug, PartialEq)]
pub enum InvalidPhoneError {
    #[error("Phone number is empty")]
    Empty,
    #[error("Phone number: {0} contains invalid characters")]
    InvalidCharacters(String),
    #[error("Phone number: {0} has an invalid length")]
    InvalidLength(String),
}

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

impl PhoneNumber {
    pub fn parse(raw: &str, country_code: &str) -> Result<Self, InvalidPhoneError> {
        let stripped: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
            .collect();
        if stripped.is_empty() {
            return Err(InvalidPhoneError::Empty);
        }

        let normalized = if let Some(rest) = stripped.strip_prefix("00") {
            format!("+{}", rest)
        } else if stripped.starts_with('+') {
            stripped
        } else {
            format!("{}{}", country_code, stripped)
        };

        let digits = match normalized.strip_prefix('+') {
            Some(digits) => digits,
            None => return Err(InvalidPhoneError::InvalidCharacters(raw.to_string())),
        };
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidPhoneError::InvalidCharacters(raw.to_string()));
        }
        if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
            return Err(InvalidPhoneError::InvalidLength(raw.to_string()));
        }
        if digits.starts_with('0') {
            return Err(InvalidPhoneError::InvalidCharacters(raw.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number without the leading `+`, as some provider APIs want it
    pub fn msisdn(&self) -> &str {
        &self.0[1..]
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalizes_national_numbers() {
        let phone = PhoneNumber::parse("412 34 567", "+47").unwrap();
        assert_eq!(phone.as_str(), "+4741234567");
        assert_eq!(phone.msisdn(), "4741234567");
    }

    #[test]
    fn keeps_international_numbers() {
        assert_eq!(
            PhoneNumber::parse("+45 20 12 34 56", "+47").unwrap().as_str(),
            "+4520123456"
        );
    }

    #[test]
    fn rewrites_double_zero_prefix() {
        assert_eq!(
            PhoneNumber::parse("004741234567", "+47").unwrap().as_str(),
            "+4741234567"
        );
    }

    #[test]
    fn strips_formatting_characters() {
        assert_eq!(
            PhoneNumber::parse("(+47) 41-23-45.67", "+47").unwrap().as_str(),
            "+4741234567"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            PhoneNumber::parse("", "+47"),
            Err(InvalidPhoneError::Empty)
        );
        assert!(matches!(
            PhoneNumber::parse("call me", "+47"),
            Err(InvalidPhoneError::InvalidCharacters(_))
        ));
        assert!(matches!(
            PhoneNumber::parse("+47 123", "+47"),
            Err(InvalidPhoneError::InvalidLength(_))
        ));
        assert!(matches!(
            PhoneNumber::parse("+012345678", "+47"),
            Err(InvalidPhoneError::InvalidCharacters(_))
        ));
    }
}
