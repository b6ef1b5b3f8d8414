use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum number of symbols in a name's text form
pub const MAX_NAME_LEN: usize = 13;

/// A 64-bit account, action, permission or table name.
///
/// The text form uses up to 12 symbols from `.12345a-z`, with an optional 13th symbol restricted
/// to `.12345a-j`. The text form is canonical: trailing dots are not allowed, so that
/// `name.to_string().parse() == Ok(name)` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u64);

/// Error thrown when parsing a [`Name`] from a string
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name `{0}` is longer than 13 characters")]
    TooLong(String),
    #[error("name `{name}` contains invalid character {ch:?}")]
    InvalidChar { name: String, ch: char },
    #[error("thirteenth character of name `{0}` must be one of `.12345a-j`")]
    InvalidLastChar(String),
    #[error("name `{0}` is not in canonical form")]
    NotCanonical(String),
}

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

impl Name {
    /// Creates a name from its raw 64-bit value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw 64-bit value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether the name is the empty name
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NameError::Empty)
        }
        let raw = s.as_bytes();
        if raw.len() > MAX_NAME_LEN {
            return Err(NameError::TooLong(s.to_owned()))
        }

        let mut value = 0u64;
        for (i, &c) in raw.iter().enumerate() {
            let symbol = char_to_symbol(c)
                .ok_or_else(|| NameError::InvalidChar { name: s.to_owned(), ch: c as char })?;
            if i < 12 {
                value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
            } else {
                if symbol > 0x0f {
                    return Err(NameError::InvalidLastChar(s.to_owned()))
                }
                value |= symbol;
            }
        }

        let name = Name(value);
        if name.to_string() != s {
            return Err(NameError::NotCanonical(s.to_owned()))
        }
        Ok(name)
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<u64> for Name {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[12 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }
        let len = out.iter().rposition(|&c| c != b'.').map(|p| p + 1).unwrap_or(0);
        // every byte comes from CHARMAP
        f.write_str(std::str::from_utf8(&out[..len]).map_err(|_| fmt::Error)?)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
