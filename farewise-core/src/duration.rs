use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Travel time of a fare, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelDuration {
    minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,

    #[error("unexpected character '{found}' at position {position} in \"{input}\"")]
    UnexpectedChar {
        input: String,
        found: char,
        position: usize,
    },

    #[error("number without an 'h' or 'm' unit in \"{0}\"")]
    MissingUnit(String),

    #[error("unit '{unit}' has no number in \"{input}\"")]
    MissingNumber { input: String, unit: char },

    #[error("'{unit}' component appears twice in \"{input}\"")]
    DuplicateComponent { input: String, unit: char },

    #[error("hours must come before minutes in \"{0}\"")]
    OutOfOrder(String),

    #[error("duration \"{0}\" is too large")]
    Overflow(String),
}

impl TravelDuration {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Parse the "Xh Ym", "Xh" and "Ym" forms used by fare listings.
    ///
    /// Components may be separated by whitespace or written together
    /// ("1h30m"). Units are case-insensitive. An absent hours component
    /// counts as zero, so "45m" is 45 minutes.
    pub fn parse(input: &str) -> Result<Self, DurationParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DurationParseError::Empty);
        }

        let overflow = || DurationParseError::Overflow(trimmed.to_string());

        let mut hours: Option<u32> = None;
        let mut minutes: Option<u32> = None;
        let mut pending: Option<u32> = None;

        for (position, ch) in trimmed.char_indices() {
            match ch {
                '0'..='9' => {
                    let digit = ch as u32 - '0' as u32;
                    let value = pending
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or_else(overflow)?;
                    pending = Some(value);
                }
                'h' | 'H' => {
                    let value = pending.take().ok_or_else(|| DurationParseError::MissingNumber {
                        input: trimmed.to_string(),
                        unit: 'h',
                    })?;
                    if hours.is_some() {
                        return Err(DurationParseError::DuplicateComponent {
                            input: trimmed.to_string(),
                            unit: 'h',
                        });
                    }
                    if minutes.is_some() {
                        return Err(DurationParseError::OutOfOrder(trimmed.to_string()));
                    }
                    hours = Some(value);
                }
                'm' | 'M' => {
                    let value = pending.take().ok_or_else(|| DurationParseError::MissingNumber {
                        input: trimmed.to_string(),
                        unit: 'm',
                    })?;
                    if minutes.is_some() {
                        return Err(DurationParseError::DuplicateComponent {
                            input: trimmed.to_string(),
                            unit: 'm',
                        });
                    }
                    minutes = Some(value);
                }
                c if c.is_whitespace() => {
                    if pending.is_some() {
                        return Err(DurationParseError::MissingUnit(trimmed.to_string()));
                    }
                }
                other => {
                    return Err(DurationParseError::UnexpectedChar {
                        input: trimmed.to_string(),
                        found: other,
                        position,
                    });
                }
            }
        }

        if pending.is_some() {
            return Err(DurationParseError::MissingUnit(trimmed.to_string()));
        }

        let total = hours
            .unwrap_or(0)
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes.unwrap_or(0)))
            .ok_or_else(overflow)?;

        Ok(Self::from_minutes(total))
    }
}

impl FromStr for TravelDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.minutes / 60;
        let minutes = self.minutes % 60;
        if hours == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}h {:02}m", hours, minutes)
        }
    }
}
