//! Resolution of location references against a document index.
//!
//! Resolution only ever returns keys that carry text in the index, in line
//! order. Nothing here fails: a reference that addresses nothing resolves to
//! an empty list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::reference::{LocationError, LocationReference, PointRef, TabSpec};
use crate::document::DocumentIndex;
use crate::domain::LocationKey;

/// Default half-width of the neighborhood window, in lines
pub const DEFAULT_RADIUS: u32 = 5;

/// How single-point references are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    /// The point must exist exactly as written
    #[default]
    Exact,
    /// Every key within `radius` lines of the point, tab qualifier ignored
    Neighborhood,
}

impl ResolveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveMode::Exact => "exact",
            ResolveMode::Neighborhood => "neighborhood",
        }
    }
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(ResolveMode::Exact),
            "neighborhood" | "neighbourhood" => Ok(ResolveMode::Neighborhood),
            other => Err(format!(
                "unknown resolution mode '{}' (expected exact or neighborhood)",
                other
            )),
        }
    }
}

/// Resolves location references against one document index
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a DocumentIndex,
    mode: ResolveMode,
    radius: u32,
}

impl<'a> Resolver<'a> {
    /// Create an exact-mode resolver
    pub fn new(index: &'a DocumentIndex) -> Self {
        Self {
            index,
            mode: ResolveMode::Exact,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Set the single-point resolution mode and neighborhood radius
    pub fn with_mode(mut self, mode: ResolveMode, radius: u32) -> Self {
        self.mode = mode;
        self.radius = radius;
        self
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Parse and resolve a reference string
    pub fn resolve_str(&self, reference: &str) -> Result<Vec<LocationKey>, LocationError> {
        let parsed: LocationReference = reference.parse()?;
        Ok(self.resolve(&parsed))
    }

    /// Resolve a parsed reference to the keys it denotes
    pub fn resolve(&self, reference: &LocationReference) -> Vec<LocationKey> {
        let keys = match reference {
            LocationReference::Point(point) => match self.mode {
                ResolveMode::Exact => self.resolve_point(point),
                ResolveMode::Neighborhood => {
                    let start = point.line.saturating_sub(self.radius).max(1);
                    let end = point.line.saturating_add(self.radius);
                    self.resolve_lines(start, end)
                }
            },
            LocationReference::Range { start, end } => self.resolve_lines(start.line, end.line),
        };

        debug!(reference = %reference, resolved = keys.len(), "Resolved location");
        keys
    }

    fn resolve_point(&self, point: &PointRef) -> Vec<LocationKey> {
        let key = match point.tab {
            TabSpec::Exact(tab) => Some(LocationKey::new(point.line, tab)),
            TabSpec::Any => self
                .index
                .keys_at_line(point.line)
                .iter()
                .copied()
                .find(|k| self.index.contains(k)),
        };

        key.filter(|k| self.index.contains(k)).into_iter().collect()
    }

    fn resolve_lines(&self, start: u32, end: u32) -> Vec<LocationKey> {
        if start > end {
            return Vec::new();
        }

        self.index
            .lines()
            .range(start..=end)
            .flat_map(|(_, keys)| keys.iter().copied())
            .filter(|key| self.index.contains(key))
            .collect()
    }
}

/// Resolve a reference string in exact mode; malformed references resolve to nothing
pub fn resolve(reference: &str, index: &DocumentIndex) -> Vec<LocationKey> {
    Resolver::new(index).resolve_str(reference).unwrap_or_default()
}
