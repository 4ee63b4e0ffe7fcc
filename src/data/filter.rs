use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Control values: site selector and payload range
// ---------------------------------------------------------------------------

/// Dropdown value: the `ALL` sentinel or one concrete launch site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record's site passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }

    /// Dropdown options: `All Sites` followed by every site of the dataset.
    pub fn options(dataset: &LaunchDataset) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(dataset.sites().iter().cloned().map(SiteSelection::Site))
            .collect()
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval `[lo, hi]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    lo: f64,
    hi: f64,
}

impl PayloadRange {
    /// Slider bounds and step used by the control panel.
    pub const SLIDER_MIN: f64 = 0.0;
    pub const SLIDER_MAX: f64 = 10_000.0;
    pub const SLIDER_STEP: f64 = 2_500.0;

    /// Build a range; the bounds are ordered so `lo <= hi` always holds.
    pub fn new(a: f64, b: f64) -> Self {
        PayloadRange {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Default slider value after a load: the dataset's own payload extent.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        match (dataset.payload_min(), dataset.payload_max()) {
            (Some(lo), Some(hi)) => PayloadRange::new(lo, hi),
            _ => PayloadRange::full(),
        }
    }

    pub fn full() -> Self {
        PayloadRange::new(Self::SLIDER_MIN, Self::SLIDER_MAX)
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.lo <= mass_kg && mass_kg <= self.hi
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Records at the selected site, in dataset order.
pub fn records_at_site<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |r| site.matches(&r.site))
}

/// Records passing the payload range and then the site selection.
pub fn records_in_range<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |r| range.contains(r.payload_mass_kg))
        .filter(move |r| site.matches(&r.site))
}
