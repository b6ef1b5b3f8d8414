use super::{Decoder, Encoder, Pack, PackError, Unpack};
use chrono::{DateTime, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("invalid timestamp `{0}`")]
    Invalid(String),
    #[error("timestamp `{0}` is out of the 32-bit seconds range")]
    OutOfRange(String),
}

/// Seconds since the unix epoch, the resolution of a transaction's expiration.
///
/// The text form is the node's UTC `YYYY-MM-DDTHH:MM:SS`; parsing also accepts a fractional
/// second part (which is truncated) and a trailing `Z`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePointSec(u32);

impl TimePointSec {
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_secs(&self) -> u32 {
        self.0
    }

    /// Adds `secs`, saturating at the end of the representable range
    #[must_use]
    pub fn saturating_add(self, secs: u32) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl FromStr for TimePointSec {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_end_matches('Z');
        let seconds = trimmed.split('.').next().unwrap_or(trimmed);
        let parsed = NaiveDateTime::parse_from_str(seconds, FORMAT)
            .map_err(|_| TimeError::Invalid(s.to_owned()))?;
        let secs = parsed.and_utc().timestamp();
        u32::try_from(secs).map(Self).map_err(|_| TimeError::OutOfRange(s.to_owned()))
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.0 as i64, 0) {
            Some(time) => write!(f, "{}", time.naive_utc().format(FORMAT)),
            None => Err(fmt::Error),
        }
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Pack for TimePointSec {
    fn pack(&self, enc: &mut Encoder) {
        self.0.pack(enc)
    }
}

impl Unpack for TimePointSec {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        u32::unpack(dec).map(Self)
    }
}
