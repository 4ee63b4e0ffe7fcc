use std::sync::Arc;

use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;
use crate::engine::{ChartSpec, compute_pie_spec, compute_scatter_spec};
use crate::reactive::{Derived, Tracked};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded launch table (None until a file is loaded). Replaced, never mutated.
    dataset: Option<Arc<LaunchDataset>>,
    dataset_generation: u64,

    /// Site dropdown value.
    pub site: Tracked<SiteSelection>,

    /// Payload range slider value.
    pub payload: Tracked<PayloadRange>,

    /// Depends on (dataset, site).
    pie: Derived<(u64, u64), ChartSpec>,

    /// Depends on (dataset, site, payload).
    scatter: Derived<(u64, u64, u64), ChartSpec>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            dataset_generation: 0,
            site: Tracked::default(),
            payload: Tracked::new(PayloadRange::full()),
            pie: Derived::new("success pie"),
            scatter: Derived::new("payload scatter"),
            status_message: None,
        }
    }
}

impl AppState {
    /// Install a newly loaded dataset and reset controls to their defaults:
    /// all sites, and the dataset's own payload extent.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site.set(SiteSelection::All);
        self.payload.set(PayloadRange::for_dataset(&dataset));

        self.dataset = Some(Arc::new(dataset));
        self.dataset_generation += 1;
        self.status_message = None;
    }

    pub fn dataset(&self) -> Option<&LaunchDataset> {
        self.dataset.as_deref()
    }

    /// Dropdown options for the current dataset.
    pub fn site_options(&self) -> Vec<SiteSelection> {
        match self.dataset() {
            Some(ds) => SiteSelection::options(ds),
            None => vec![SiteSelection::All],
        }
    }

    pub fn select_site(&mut self, site: SiteSelection) -> bool {
        let changed = self.site.set(site);
        if changed {
            log::debug!("site -> {}", self.site.get());
        }
        changed
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) -> bool {
        self.payload.set(range)
    }

    /// Success pie for the current site selection.
    pub fn pie_spec(&mut self) -> &ChartSpec {
        let key = (self.dataset_generation, self.site.generation());
        let dataset = self.dataset.as_deref();
        let site = self.site.get();
        self.pie
            .get_or_compute(key, || compute_pie_spec(dataset, site))
    }

    /// Payload scatter for the current site selection and payload range.
    pub fn scatter_spec(&mut self) -> &ChartSpec {
        let key = (
            self.dataset_generation,
            self.site.generation(),
            self.payload.generation(),
        );
        let dataset = self.dataset.as_deref();
        let site = self.site.get();
        let range = *self.payload.get();
        self.scatter
            .get_or_compute(key, || compute_scatter_spec(dataset, site, range))
    }

    pub fn pie_recomputations(&self) -> u64 {
        self.pie.recomputations()
    }

    pub fn scatter_recomputations(&self) -> u64 {
        self.scatter.recomputations()
    }
}
