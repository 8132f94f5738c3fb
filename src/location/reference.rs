//! Location reference mini-language.
//!
//! ```text
//! L<line>:T<tab>            exact line and tab depth
//! L<line>:C                 line with any tab depth
//! <point> - <point>         inclusive line range (tab qualifiers ignored)
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the two ends of a range
pub const RANGE_SEPARATOR: &str = " - ";

/// Tab qualifier of a single-point reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabSpec {
    /// `:T<tab>`: tab depth must match exactly
    Exact(u32),
    /// `:C`: accept whatever tab depth the document has
    Any,
}

/// A single-point reference such as `L5:T2` or `L5:C`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRef {
    pub line: u32,
    pub tab: TabSpec,
}

impl PointRef {
    pub fn exact(line: u32, tab: u32) -> Self {
        Self {
            line,
            tab: TabSpec::Exact(tab),
        }
    }

    pub fn any_tab(line: u32) -> Self {
        Self {
            line,
            tab: TabSpec::Any,
        }
    }
}

impl fmt::Display for PointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tab {
            TabSpec::Exact(tab) => write!(f, "L{}:T{}", self.line, tab),
            TabSpec::Any => write!(f, "L{}:C", self.line),
        }
    }
}

/// A parsed location reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationReference {
    Point(PointRef),
    Range { start: PointRef, end: PointRef },
}

impl fmt::Display for LocationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationReference::Point(point) => write!(f, "{}", point),
            LocationReference::Range { start, end } => {
                write!(f, "{}{}{}", start, RANGE_SEPARATOR, end)
            }
        }
    }
}

/// Reasons a location reference fails to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location reference is empty")]
    Empty,

    #[error(
        "`{reference}` is not a location reference; expected L<line>:T<tab>, L<line>:C, \
         or two of these joined by ' - '"
    )]
    Malformed { reference: String },

    #[error("Line or tab number in `{reference}` is out of range")]
    OutOfRange { reference: String },
}

fn point_regex() -> &'static Regex {
    static POINT: OnceLock<Regex> = OnceLock::new();
    POINT.get_or_init(|| Regex::new(r"^L([0-9]+):(?:T([0-9]+)|C)$").expect("point pattern is valid"))
}

fn parse_point(text: &str, reference: &str) -> Result<PointRef, LocationError> {
    let caps = point_regex()
        .captures(text)
        .ok_or_else(|| LocationError::Malformed {
            reference: reference.to_string(),
        })?;

    let out_of_range = || LocationError::OutOfRange {
        reference: reference.to_string(),
    };

    let line = caps[1].parse::<u32>().map_err(|_| out_of_range())?;
    let tab = match caps.get(2) {
        Some(tab) => TabSpec::Exact(tab.as_str().parse::<u32>().map_err(|_| out_of_range())?),
        None => TabSpec::Any,
    };

    Ok(PointRef { line, tab })
}

impl FromStr for LocationReference {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reference = s.trim();
        if reference.is_empty() {
            return Err(LocationError::Empty);
        }

        match reference.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => Ok(LocationReference::Range {
                start: parse_point(start, reference)?,
                end: parse_point(end, reference)?,
            }),
            None => Ok(LocationReference::Point(parse_point(reference, reference)?)),
        }
    }
}
