use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value, used both for summing and as the scatter y value.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<i64> for Outcome {
    type Error = DataError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DataError::InvalidClass(other)),
        }
    }
}

impl From<Outcome> for i64 {
    fn from(outcome: Outcome) -> Self {
        outcome.class() as i64
    }
}

// ---------------------------------------------------------------------------
// DataError – dataset invariant violations
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("class must be 0 or 1, got {0}")]
    InvalidClass(i64),
    #[error("launch site is empty")]
    EmptySite,
    #[error("payload mass must be a finite non-negative number, got {0}")]
    InvalidPayload(f64),
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<DataError>,
    },
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch attempt. Column names match the published CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
    #[serde(rename = "class")]
    pub outcome: Outcome,
}

impl LaunchRecord {
    #[cfg(test)]
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            booster_category: booster_category.into(),
            outcome,
        }
    }

    /// Check the per-row dataset invariant.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.site.trim().is_empty() {
            return Err(DataError::EmptySite);
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(DataError::InvalidPayload(self.payload_mass_kg));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the immutable loaded table
// ---------------------------------------------------------------------------

/// The full launch table with pre-computed site list and payload bounds.
///
/// There is no mutation path once constructed; a new file produces a new
/// dataset.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Unique launch sites in first-seen order (dropdown options).
    sites: Vec<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Validate every row and build the site index and payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut sites = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for (row, rec) in records.iter().enumerate() {
            rec.validate().map_err(|e| DataError::Row {
                row,
                source: Box::new(e),
            })?;

            if seen.insert(rec.site.as_str()) {
                sites.push(rec.site.clone());
            }

            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        Ok(LaunchDataset {
            records,
            sites,
            payload_bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Unique booster categories in first-seen order.
    pub fn booster_categories(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|r| r.booster_category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn payload_min(&self) -> Option<f64> {
        self.payload_bounds.map(|(lo, _)| lo)
    }

    pub fn payload_max(&self) -> Option<f64> {
        self.payload_bounds.map(|(_, hi)| hi)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
