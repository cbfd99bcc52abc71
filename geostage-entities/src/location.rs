use std::{fmt, str::FromStr};

use thiserror::Error;

/// The key a location is geocoded and cached under,
/// typically a postal address.
///
/// Names are stored verbatim. The runtime application looks
/// entries up with exactly the same key, so no normalization
/// must happen here beyond trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationName(String);

#[derive(Debug, Error)]
#[error("The location name must not be empty")]
pub struct ParseLocationNameError;

impl LocationName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for LocationName {
    type Err = ParseLocationNameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseLocationNameError);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grouping tag for configured locations.
/// Only used for reporting, never part of the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationGroup {
    City,
    MicroHub,
}

impl fmt::Display for LocationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City => f.write_str("central"),
            Self::MicroHub => f.write_str("micro"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    pub name: LocationName,
    pub label: String,
    pub group: LocationGroup,
}

/// The ordered list of locations supplied by the configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocationList(Vec<LocationEntry>);

impl LocationList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationEntry> {
        self.0.iter()
    }

    /// Collapses duplicate names, keeping the first occurrence
    /// and the original order.
    pub fn dedup_names(&self) -> Vec<&LocationEntry> {
        let mut seen = Vec::with_capacity(self.0.len());
        let mut distinct = Vec::with_capacity(self.0.len());
        for entry in &self.0 {
            if seen.contains(&&entry.name) {
                continue;
            }
            seen.push(&entry.name);
            distinct.push(entry);
        }
        distinct
    }
}

impl From<Vec<LocationEntry>> for LocationList {
    fn from(entries: Vec<LocationEntry>) -> Self {
        Self(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, group: LocationGroup) -> LocationEntry {
        LocationEntry {
            name: name.parse().unwrap(),
            label: name.to_string(),
            group,
        }
    }

    #[test]
    fn parse_location_name() {
        assert!("".parse::<LocationName>().is_err());
        assert!("  \t ".parse::<LocationName>().is_err());
        let name: LocationName = "  Altona, Hamburg, Germany ".parse().unwrap();
        assert_eq!("Altona, Hamburg, Germany", name.as_str());
    }

    #[test]
    fn dedup_names_keeps_first_occurrence() {
        let list = LocationList::from(vec![
            entry("Springfield", LocationGroup::City),
            entry("Rivertown", LocationGroup::MicroHub),
            entry("Springfield", LocationGroup::MicroHub),
        ]);
        let distinct = list.dedup_names();
        assert_eq!(2, distinct.len());
        assert_eq!("Springfield", distinct[0].name.as_str());
        assert_eq!(LocationGroup::City, distinct[0].group);
        assert_eq!("Rivertown", distinct[1].name.as_str());
    }
}
