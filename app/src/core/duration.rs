use derive_more::{Display, Error};
use iso8601_duration::Duration as Iso8601Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const MAX_AWAY_SECONDS: u64 = 100 * 365 * SECONDS_PER_DAY;

/// How long someone will be away, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AwayDuration {
    seconds: u64,
}

#[derive(Debug, Display, Error)]
pub enum DurationParseError {
    #[display("Error parsing {value} to duration: {reason}")]
    Malformed { value: String, reason: String },

    #[display("Duration must not contain years and/or months. Received {value}")]
    CalendarUnits { value: String },

    #[display("Duration must not be negative. Received {value}")]
    Negative { value: String },

    #[display("Duration must not exceed 100 years. Received {value}")]
    OutOfRange { value: String },
}

impl AwayDuration {
    pub fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Parses an ISO 8601 duration like `PT10M`, `P1W` or `P1DT2H`. Fractions of a second
    /// are dropped.
    pub fn parse_iso8601(value: &str) -> Result<Self, DurationParseError> {
        let iso_duration = Iso8601Duration::parse(value).map_err(|e| DurationParseError::Malformed {
            value: value.to_owned(),
            reason: format!("{:?}", e),
        })?;

        //Huge inputs overflow to infinity
        let seconds = iso_duration
            .num_seconds()
            .ok_or_else(|| DurationParseError::CalendarUnits {
                value: value.to_owned(),
            })?;

        if seconds < 0.0 {
            return Err(DurationParseError::Negative {
                value: value.to_owned(),
            });
        }

        if !seconds.is_finite() || seconds > MAX_AWAY_SECONDS as f32 {
            return Err(DurationParseError::OutOfRange {
                value: value.to_owned(),
            });
        }

        Ok(Self::from_secs(seconds.trunc() as u64))
    }

    pub fn as_secs(&self) -> u64 {
        self.seconds
    }

    pub fn rounded_minutes(&self) -> u64 {
        (self.seconds as f64 / SECONDS_PER_MINUTE as f64).round() as u64
    }

    /// Coarsest unit in which the duration is at least one.
    pub fn spoken(&self) -> SpokenDuration {
        let (unit, unit_seconds) = if self.seconds >= SECONDS_PER_DAY {
            (SpokenUnit::Days, SECONDS_PER_DAY)
        } else if self.seconds >= SECONDS_PER_HOUR {
            (SpokenUnit::Hours, SECONDS_PER_HOUR)
        } else {
            (SpokenUnit::Minutes, SECONDS_PER_MINUTE)
        };

        SpokenDuration {
            amount: self.seconds / unit_seconds,
            unit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SpokenUnit {
    #[display("days")]
    Days,
    #[display("hours")]
    Hours,
    #[display("minutes")]
    Minutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{amount} {unit}")]
pub struct SpokenDuration {
    pub amount: u64,
    pub unit: SpokenUnit,
}
