// Store identifier decoding - push keys carry their creation time
use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Utc};
use std::str::FromStr;
use thiserror::Error;

/// Alphabet used by the store when generating keys, in digit order.
pub const PUSH_CHARS: &str = "-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Number of leading key characters that encode the timestamp.
const TIMESTAMP_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("identifier '{0}' is shorter than 8 characters")]
    ShortIdentifier(String),
    #[error("identifier '{id}' contains '{ch}' which is not a push-key character")]
    InvalidCharacter { id: String, ch: char },
    /// Unreachable for 8-digit keys (at most 64^8 - 1 ms); covers the `Option`
    /// returned by `DateTime::from_timestamp_millis`.
    #[error("identifier '{0}' decodes to a time outside the calendar range")]
    OutOfRange(String),
}

/// Decode the millisecond timestamp held in the first eight characters of a key.
///
/// Trailing characters only make keys unique within the same millisecond, so
/// they are ignored.
pub fn decode_millis(id: &str) -> Result<i64, DecodeError> {
    let mut millis: i64 = 0;
    let mut consumed = 0;

    for ch in id.chars().take(TIMESTAMP_LEN) {
        let digit = PUSH_CHARS
            .find(ch)
            .ok_or_else(|| DecodeError::InvalidCharacter {
                id: id.to_string(),
                ch,
            })?;
        millis = millis * 64 + digit as i64;
        consumed += 1;
    }

    if consumed < TIMESTAMP_LEN {
        return Err(DecodeError::ShortIdentifier(id.to_string()));
    }

    Ok(millis)
}

/// Decode a key into a UTC instant.
pub fn decode(id: &str) -> Result<DateTime<Utc>, DecodeError> {
    let millis = decode_millis(id)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| DecodeError::OutOfRange(id.to_string()))
}

/// Calendar used to turn decoded instants into chart labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelZone {
    /// The host's local calendar.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl LabelZone {
    /// Format an instant as `D/M H:M` with a zero-based month and unpadded fields.
    pub fn format(&self, at: &DateTime<Utc>) -> String {
        match self {
            LabelZone::Local => format_in(at, &Local),
            LabelZone::Utc => format_in(at, &Utc),
            LabelZone::Fixed(offset) => format_in(at, offset),
        }
    }
}

fn format_in<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String {
    let local = at.with_timezone(tz);
    format!(
        "{}/{} {}:{}",
        local.day(),
        local.month0(),
        local.hour(),
        local.minute()
    )
}

impl FromStr for LabelZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(LabelZone::Local),
            "utc" | "z" => Ok(LabelZone::Utc),
            other => other
                .parse::<FixedOffset>()
                .map(LabelZone::Fixed)
                .map_err(|e| format!("invalid label timezone '{}': {}", s, e)),
        }
    }
}
