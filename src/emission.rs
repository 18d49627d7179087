//! The `key<TAB>value` line protocol between mappers and reducers.

use std::fmt;
use std::str;

use crate::error::SkipReason;

pub const SEPARATOR: char = '\t';

/// One key/value pair produced by a mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    key: String,
    value: i64,
}

impl Emission {
    /// Builds an emission, rejecting keys that would break line framing.
    pub fn new(key: impl Into<String>, value: i64) -> Result<Self, SkipReason> {
        let key = key.into();
        if key.contains(&['\t', '\n', '\r'][..]) {
            return Err(SkipReason::InvalidKey);
        }
        Ok(Emission { key, value })
    }

    /// A `(key, 1)` emission.
    pub fn one(key: impl Into<String>) -> Result<Self, SkipReason> {
        Emission::new(key, 1)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn into_parts(self) -> (String, i64) {
        (self.key, self.value)
    }

    /// Parses one reducer input line. Split happens at the first tab.
    pub fn parse_line(line: &str) -> Result<Self, SkipReason> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let (key, value) = line
            .split_once(SEPARATOR)
            .ok_or(SkipReason::MalformedLine)?;
        Emission::from_fields(key, value)
    }

    /// Builds an emission from an already split key and value, as handed over
    /// by a streaming driver.
    pub fn from_bytes(key: &[u8], value: &[u8]) -> Result<Self, SkipReason> {
        let key = str::from_utf8(key).map_err(|_| SkipReason::MalformedLine)?;
        let value = str::from_utf8(value)
            .map_err(|_| SkipReason::InvalidValue(String::from_utf8_lossy(value).into_owned()))?;
        Emission::from_fields(key, value.trim_end_matches(&['\r', '\n'][..]))
    }

    fn from_fields(key: &str, value: &str) -> Result<Self, SkipReason> {
        let value = value
            .trim()
            .parse::<i64>()
            .map_err(|_| SkipReason::InvalidValue(value.to_string()))?;
        Emission::new(key, value)
    }
}

impl fmt::Display for Emission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, SEPARATOR, self.value)
    }
}
