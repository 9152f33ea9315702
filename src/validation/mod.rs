//! Request validation for event payloads.
//!
//! Checks run in a fixed order (required fields, date, time, email) and the
//! first failure is returned. Nothing here touches the store.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

use crate::models::{EventInput, EventRequest};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required fields")]
    MissingRequiredFields,

    #[error("invalid date format")]
    InvalidDate,

    #[error("invalid time format")]
    InvalidTime,

    #[error("invalid email format")]
    InvalidEmail,
}

/// Validates a create/update payload and returns its typed form.
pub fn validate_event(request: &EventRequest) -> Result<EventInput, ValidationError> {
    if !has_required_fields(request) {
        return Err(ValidationError::MissingRequiredFields);
    }

    let date = parse_date(&request.date).ok_or(ValidationError::InvalidDate)?;
    let time = parse_time(&request.time).ok_or(ValidationError::InvalidTime)?;

    if let Some(email) = request.contact_email.as_deref() {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
    }

    Ok(EventInput {
        name: request.name.clone(),
        description: request.description.clone(),
        venue_name: request.venue_name.clone(),
        address: request.address.clone(),
        date,
        time,
        contact_mobile: request.contact_mobile.clone(),
        contact_email: request.contact_email.clone(),
        contact_instagram: request.contact_instagram.clone(),
    })
}

pub fn has_required_fields(request: &EventRequest) -> bool {
    [
        &request.name,
        &request.venue_name,
        &request.address,
        &request.date,
        &request.time,
    ]
    .iter()
    .all(|field| !field.is_empty())
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let year = digits(&value[0..4])? as i32;
    let month = digits(&value[5..7])?;
    let day = digits(&value[8..10])?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses `HH:MM:SS`, tolerating a fractional-second suffix such as
/// `14:30:00.000`. The fraction is dropped: events keep second precision.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match value.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (value, None),
    };

    if let Some(fraction) = fraction {
        if fraction.is_empty() || fraction.len() > 9 || digits(fraction).is_none() {
            return None;
        }
    }

    let bytes = clock.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }

    let hour = digits(&clock[0..2])?;
    let minute = digits(&clock[3..5])?;
    let second = digits(&clock[6..8])?;

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// An absent or empty email is valid; anything else must look like
/// `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_PATTERN.is_match(email)
}

fn digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> EventRequest {
        EventRequest {
            name: "Test Event".to_string(),
            venue_name: "Test Venue".to_string(),
            address: "Test Address".to_string(),
            date: "2024-03-15".to_string(),
            time: "14:30:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_email() {
        for email in ["test@example.com", "user.name@domain.co.uk", ""] {
            assert!(is_valid_email(email), "expected '{}' to be valid", email);
        }
    }

    #[test]
    fn test_invalid_email() {
        for email in ["invalid-email", "@domain.com", "user@", "user@domain"] {
            assert!(!is_valid_email(email), "expected '{}' to be invalid", email);
        }
    }

    #[test]
    fn test_valid_dates() {
        for date in ["2024-03-15", "2024-12-31", "2024-01-01", "2024-02-29"] {
            assert!(parse_date(date).is_some(), "expected '{}' to parse", date);
        }
    }

    #[test]
    fn test_invalid_dates() {
        for date in [
            "24-03-15",
            "2024/03/15",
            "2024-3-15",
            "2024-03-32",
            "2024-02-30",
            "2023-02-29",
            "2024-13-01",
            "2024-00-10",
            "+024-03-15",
            "invalid",
            "",
        ] {
            assert!(parse_date(date).is_none(), "expected '{}' to be rejected", date);
        }
    }

    #[test]
    fn test_valid_times() {
        for time in ["14:30:00", "00:00:00", "23:59:59", "14:30:00.000", "14:30:00.5"] {
            assert!(parse_time(time).is_some(), "expected '{}' to parse", time);
        }
    }

    #[test]
    fn test_invalid_times() {
        for time in [
            "14:30", "24:00:00", "14:60:00", "14:30:60", "4:30:00", "14:30:00.", "14:30:00.abc",
            "invalid", "",
        ] {
            assert!(parse_time(time).is_none(), "expected '{}' to be rejected", time);
        }
    }

    #[test]
    fn test_fractional_seconds_are_truncated() {
        let time = parse_time("14:30:00.999").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
    }

    #[test]
    fn test_validate_event_returns_typed_input() {
        let input = validate_event(&valid_request()).unwrap();

        assert_eq!(input.name, "Test Event");
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(input.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let blanks: [fn(&mut EventRequest); 5] = [
            |r: &mut EventRequest| r.name.clear(),
            |r: &mut EventRequest| r.venue_name.clear(),
            |r: &mut EventRequest| r.address.clear(),
            |r: &mut EventRequest| r.date.clear(),
            |r: &mut EventRequest| r.time.clear(),
        ];

        for blank in blanks {
            let mut request = valid_request();
            blank(&mut request);
            assert_eq!(
                validate_event(&request),
                Err(ValidationError::MissingRequiredFields)
            );
        }
    }

    #[test]
    fn test_missing_fields_win_over_bad_email() {
        let request = EventRequest {
            name: "Test Event".to_string(),
            contact_email: Some("invalid-email".to_string()),
            ..Default::default()
        };

        assert_eq!(
            validate_event(&request),
            Err(ValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn test_bad_date_wins_over_bad_time_and_email() {
        let request = EventRequest {
            date: "2024-03-32".to_string(),
            time: "25:00:00".to_string(),
            contact_email: Some("user@".to_string()),
            ..valid_request()
        };

        assert_eq!(validate_event(&request), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_bad_time_wins_over_bad_email() {
        let request = EventRequest {
            time: "14:30".to_string(),
            contact_email: Some("user@".to_string()),
            ..valid_request()
        };

        assert_eq!(validate_event(&request), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn test_bad_email_is_reported_last() {
        let request = EventRequest {
            contact_email: Some("user@domain".to_string()),
            ..valid_request()
        };

        assert_eq!(validate_event(&request), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_empty_email_is_kept_as_empty_string() {
        let request = EventRequest {
            contact_email: Some(String::new()),
            ..valid_request()
        };

        let input = validate_event(&request).unwrap();
        assert_eq!(input.contact_email, Some(String::new()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingRequiredFields.to_string(),
            "missing required fields"
        );
        assert_eq!(ValidationError::InvalidDate.to_string(), "invalid date format");
        assert_eq!(ValidationError::InvalidTime.to_string(), "invalid time format");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "invalid email format");
    }
}
