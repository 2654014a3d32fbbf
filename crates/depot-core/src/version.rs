use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Free-form version string with a defined total ordering: maximal runs of
/// ASCII digits compare numerically, everything else lexicographically.
#[derive(Debug, Clone)]
pub struct PackageVersion(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("package version must not be empty")]
pub struct InvalidVersion;

impl PackageVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn segments(version: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = version;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let numeric = first.is_ascii_digit();
        let split = rest
            .find(|ch: char| ch.is_ascii_digit() != numeric)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(split);
        rest = tail;
        Some(if numeric {
            Segment::Number(chunk)
        } else {
            Segment::Text(chunk)
        })
    })
}

fn compare_numbers(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = segments(&self.0);
        let mut right = segments(&other.0);
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(Segment::Number(a)), Some(Segment::Number(b))) => {
                    match compare_numbers(a, b) {
                        Ordering::Equal => continue,
                        unequal => return unequal,
                    }
                }
                (Some(Segment::Text(a)), Some(Segment::Text(b))) => match a.cmp(b) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                },
                // A numeric segment sorts before a textual one.
                (Some(Segment::Number(_)), Some(Segment::Text(_))) => return Ordering::Less,
                (Some(Segment::Text(_)), Some(Segment::Number(_))) => return Ordering::Greater,
            }
        }
    }
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PackageVersion {}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PackageVersion {
    type Err = InvalidVersion;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().is_empty() {
            return Err(InvalidVersion);
        }
        Ok(Self(input.to_string()))
    }
}

impl Serialize for PackageVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PackageVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
