//! Chart derivation: pure functions from (launch table, control values) to a
//! renderer-independent chart description.
//!
//! ```text
//!   LaunchDataset ──┬── SiteSelection ─────────────────► compute_pie_spec ─────► ChartSpec
//!                   └── SiteSelection + PayloadRange ──► compute_scatter_spec ─► ChartSpec
//! ```
//!
//! Neither function fails: a missing or empty table yields a "No Data
//! Available" spec and a filter that matches nothing yields a well-formed
//! spec with no points.

use std::collections::HashMap;

use eframe::egui::Color32;
use serde::{Serialize, Serializer};

use crate::color::{self, FAILURE_COLOR, SUCCESS_COLOR};
use crate::data::filter::{PayloadRange, SiteSelection, records_at_site, records_in_range};
use crate::data::model::LaunchDataset;

pub const NO_DATA_TITLE: &str = "No Data Available";
pub const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";
pub const CLASS_AXIS_TITLE: &str = "class";
pub const CATEGORY_LEGEND_TITLE: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// Traces plus layout; what the plot panel paints and what File → Export writes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<u64>,
        #[serde(serialize_with = "hex_colors")]
        colors: Vec<Color32>,
    },
    /// One marker series.
    Scatter {
        name: String,
        x: Vec<f64>,
        y: Vec<f64>,
        #[serde(serialize_with = "hex_color")]
        color: Color32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub legend_title: Option<String>,
    pub legend: LegendPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPlacement {
    /// Beside the chart.
    Right,
    /// In the plot's upper-right corner.
    Inside,
}

impl ChartSpec {
    /// Shown whenever no launch table is available.
    pub fn no_data() -> Self {
        ChartSpec {
            traces: Vec::new(),
            layout: Layout {
                title: NO_DATA_TITLE.to_string(),
                x_axis_title: None,
                y_axis_title: None,
                legend_title: None,
                legend: LegendPlacement::Right,
            },
        }
    }

    /// Whether the spec carries no data points at all.
    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|t| match t {
            Trace::Pie { values, .. } => values.is_empty(),
            Trace::Scatter { x, .. } => x.is_empty(),
        })
    }
}

fn hex_color<S: Serializer>(color: &Color32, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&color::to_hex(*color))
}

fn hex_colors<S: Serializer>(colors: &[Color32], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(colors.iter().map(|c| color::to_hex(*c)))
}

fn available(dataset: Option<&LaunchDataset>) -> Option<&LaunchDataset> {
    dataset.filter(|ds| !ds.is_empty())
}

// ---------------------------------------------------------------------------
// Pie: success distribution
// ---------------------------------------------------------------------------

/// Pie chart for the site selector.
///
/// * `All`     – one slice per site holding that site's *successful*
///   launches, sites in first-seen order. Failures do not appear.
/// * `Site(s)` – exactly two slices, `Success` then `Failure`, even when a
///   count is zero or the site is unknown.
pub fn compute_pie_spec(dataset: Option<&LaunchDataset>, site: &SiteSelection) -> ChartSpec {
    let Some(dataset) = available(dataset) else {
        return ChartSpec::no_data();
    };

    let (labels, values, colors, title) = match site {
        SiteSelection::All => {
            let mut successes: HashMap<&str, u64> = HashMap::new();
            for rec in dataset.records() {
                *successes.entry(rec.site.as_str()).or_default() += u64::from(rec.outcome.class());
            }
            let labels: Vec<String> = dataset.sites().to_vec();
            let values: Vec<u64> = labels
                .iter()
                .map(|s| successes.get(s.as_str()).copied().unwrap_or(0))
                .collect();
            let colors = color::generate_palette(labels.len());
            (
                labels,
                values,
                colors,
                "Total Success Launches by Site".to_string(),
            )
        }
        SiteSelection::Site(name) => {
            let (total, success) = records_at_site(dataset, site)
                .fold((0u64, 0u64), |(total, success), rec| {
                    (total + 1, success + u64::from(rec.outcome.is_success()))
                });
            (
                vec!["Success".to_string(), "Failure".to_string()],
                vec![success, total - success],
                vec![SUCCESS_COLOR, FAILURE_COLOR],
                format!("Success vs. Failure for site {name}"),
            )
        }
    };

    ChartSpec {
        traces: vec![Trace::Pie {
            labels,
            values,
            colors,
        }],
        layout: Layout {
            title,
            x_axis_title: None,
            y_axis_title: None,
            legend_title: None,
            legend: LegendPlacement::Right,
        },
    }
}

// ---------------------------------------------------------------------------
// Scatter: payload vs. outcome
// ---------------------------------------------------------------------------

/// Scatter chart of `(payload, class)` points, one marker series per booster
/// category in first-seen order. Payload bounds are inclusive.
pub fn compute_scatter_spec(
    dataset: Option<&LaunchDataset>,
    site: &SiteSelection,
    range: PayloadRange,
) -> ChartSpec {
    let Some(dataset) = available(dataset) else {
        return ChartSpec::no_data();
    };

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut traces: Vec<Trace> = Vec::new();

    for rec in records_in_range(dataset, site, range) {
        let category = rec.booster_category.as_str();
        let slot = *index.entry(category).or_insert_with(|| {
            traces.push(Trace::Scatter {
                name: category.to_string(),
                x: Vec::new(),
                y: Vec::new(),
                color: color::category_color(category),
            });
            traces.len() - 1
        });
        if let Trace::Scatter { x, y, .. } = &mut traces[slot] {
            x.push(rec.payload_mass_kg);
            y.push(f64::from(rec.outcome.class()));
        }
    }

    let title = match site {
        SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(name) => format!("Correlation between Payload and Success for site {name}"),
    };

    ChartSpec {
        traces,
        layout: Layout {
            title,
            x_axis_title: Some(PAYLOAD_AXIS_TITLE.to_string()),
            y_axis_title: Some(CLASS_AXIS_TITLE.to_string()),
            legend_title: Some(CATEGORY_LEGEND_TITLE.to_string()),
            legend: LegendPlacement::Inside,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};
    use proptest::prelude::*;

    fn scenario() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 2000.0, "v1.0", Outcome::Success),
            LaunchRecord::new("A", 3000.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("B", 5000.0, "FT", Outcome::Success),
        ])
        .unwrap()
    }

    fn pie_slices(spec: &ChartSpec) -> Vec<(String, u64)> {
        match spec.traces.as_slice() {
            [Trace::Pie { labels, values, .. }] => {
                labels.iter().cloned().zip(values.iter().copied()).collect()
            }
            other => panic!("expected a single pie trace, got {other:?}"),
        }
    }

    fn scatter_points(spec: &ChartSpec) -> Vec<(String, f64, f64)> {
        spec.traces
            .iter()
            .flat_map(|t| match t {
                Trace::Scatter { name, x, y, .. } => x
                    .iter()
                    .zip(y)
                    .map(|(&x, &y)| (name.clone(), x, y))
                    .collect::<Vec<_>>(),
                Trace::Pie { .. } => panic!("pie trace in scatter spec"),
            })
            .collect()
    }

    fn site(s: &str) -> SiteSelection {
        SiteSelection::Site(s.to_string())
    }

    #[test]
    fn pie_all_counts_successes_per_site() {
        let spec = compute_pie_spec(Some(&scenario()), &SiteSelection::All);
        assert_eq!(pie_slices(&spec), vec![("A".into(), 1), ("B".into(), 1)]);
        assert_eq!(spec.layout.title, "Total Success Launches by Site");
    }

    #[test]
    fn pie_site_splits_success_and_failure() {
        let spec = compute_pie_spec(Some(&scenario()), &site("A"));
        assert_eq!(
            pie_slices(&spec),
            vec![("Success".into(), 1), ("Failure".into(), 1)]
        );
        assert_eq!(spec.layout.title, "Success vs. Failure for site A");
    }

    #[test]
    fn pie_unknown_site_has_two_zero_slices() {
        let spec = compute_pie_spec(Some(&scenario()), &site("Boca Chica"));
        assert_eq!(
            pie_slices(&spec),
            vec![("Success".into(), 0), ("Failure".into(), 0)]
        );
    }

    #[test]
    fn pie_all_keeps_site_with_only_failures() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("X", 10.0, "FT", Outcome::Failure),
            LaunchRecord::new("Y", 10.0, "FT", Outcome::Success),
        ])
        .unwrap();
        let spec = compute_pie_spec(Some(&ds), &SiteSelection::All);
        assert_eq!(pie_slices(&spec), vec![("X".into(), 0), ("Y".into(), 1)]);
    }

    #[test]
    fn scatter_all_low_range() {
        let spec = compute_scatter_spec(
            Some(&scenario()),
            &SiteSelection::All,
            PayloadRange::new(0.0, 2500.0),
        );
        assert_eq!(scatter_points(&spec), vec![("v1.0".into(), 2000.0, 1.0)]);
    }

    #[test]
    fn scatter_single_site() {
        let spec = compute_scatter_spec(
            Some(&scenario()),
            &site("B"),
            PayloadRange::new(0.0, 10_000.0),
        );
        assert_eq!(scatter_points(&spec), vec![("FT".into(), 5000.0, 1.0)]);
        assert_eq!(
            spec.layout.title,
            "Correlation between Payload and Success for site B"
        );
    }

    #[test]
    fn scatter_series_in_first_seen_order() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 100.0, "B5", Outcome::Success),
            LaunchRecord::new("A", 200.0, "v1.1", Outcome::Failure),
            LaunchRecord::new("A", 300.0, "B5", Outcome::Failure),
        ])
        .unwrap();
        let spec = compute_scatter_spec(Some(&ds), &SiteSelection::All, PayloadRange::full());
        let names: Vec<_> = spec
            .traces
            .iter()
            .map(|t| match t {
                Trace::Scatter { name, x, .. } => (name.as_str(), x.len()),
                Trace::Pie { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(names, vec![("B5", 2), ("v1.1", 1)]);
    }

    #[test]
    fn scatter_unmapped_category_uses_default_color() {
        let ds = LaunchDataset::from_records(vec![LaunchRecord::new(
            "A",
            100.0,
            "Starship",
            Outcome::Success,
        )])
        .unwrap();
        let spec = compute_scatter_spec(Some(&ds), &SiteSelection::All, PayloadRange::full());
        match &spec.traces[0] {
            Trace::Scatter { color, .. } => assert_eq!(*color, color::DEFAULT_CATEGORY_COLOR),
            Trace::Pie { .. } => unreachable!(),
        }
    }

    #[test]
    fn scatter_empty_result_keeps_layout() {
        let spec = compute_scatter_spec(
            Some(&scenario()),
            &SiteSelection::All,
            PayloadRange::new(9000.0, 10_000.0),
        );
        assert!(spec.traces.is_empty());
        assert!(spec.is_empty());
        assert_eq!(spec.layout.x_axis_title.as_deref(), Some(PAYLOAD_AXIS_TITLE));
        assert_eq!(spec.layout.y_axis_title.as_deref(), Some(CLASS_AXIS_TITLE));
        assert_eq!(
            spec.layout.legend_title.as_deref(),
            Some(CATEGORY_LEGEND_TITLE)
        );
    }

    #[test]
    fn missing_or_empty_data_gives_no_data_spec() {
        let empty = LaunchDataset::default();
        for ds in [None, Some(&empty)] {
            let pie = compute_pie_spec(ds, &SiteSelection::All);
            let scatter = compute_scatter_spec(ds, &SiteSelection::All, PayloadRange::full());
            for spec in [pie, scatter] {
                assert!(spec.traces.is_empty());
                assert_eq!(spec.layout.title, NO_DATA_TITLE);
            }
        }
    }

    #[test]
    fn exported_json_shape() {
        let spec = compute_pie_spec(Some(&scenario()), &site("A"));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["traces"][0]["type"], "pie");
        assert_eq!(json["traces"][0]["values"], serde_json::json!([1, 1]));
        assert_eq!(json["traces"][0]["colors"][0], "#2ca02c");
        assert_eq!(json["layout"]["legend"], "right");
    }

    // -- properties --

    fn arb_record() -> impl Strategy<Value = LaunchRecord> {
        (
            prop::sample::select(vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]),
            0.0f64..10_000.0,
            prop::sample::select(vec!["v1.0", "v1.1", "FT", "B4", "B5", "Other"]),
            any::<bool>(),
        )
            .prop_map(|(site, mass, cat, ok)| {
                let outcome = if ok { Outcome::Success } else { Outcome::Failure };
                LaunchRecord::new(site, mass, cat, outcome)
            })
    }

    fn arb_dataset() -> impl Strategy<Value = LaunchDataset> {
        prop::collection::vec(arb_record(), 1..60)
            .prop_map(|rows| LaunchDataset::from_records(rows).unwrap())
    }

    fn arb_site() -> impl Strategy<Value = SiteSelection> {
        prop_oneof![
            Just(SiteSelection::All),
            prop::sample::select(vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "Nowhere"])
                .prop_map(|s| SiteSelection::Site(s.to_string())),
        ]
    }

    proptest! {
        #[test]
        fn pie_all_sums_to_total_successes(ds in arb_dataset()) {
            let spec = compute_pie_spec(Some(&ds), &SiteSelection::All);
            let total: u64 = pie_slices(&spec).iter().map(|(_, v)| v).sum();
            let expected: u64 = ds.records().iter().map(|r| u64::from(r.outcome.class())).sum();
            prop_assert_eq!(total, expected);
        }

        #[test]
        fn pie_site_counts_every_launch(ds in arb_dataset(), s in arb_site()) {
            prop_assume!(s != SiteSelection::All);
            let spec = compute_pie_spec(Some(&ds), &s);
            let slices = pie_slices(&spec);
            prop_assert_eq!(slices.len(), 2);
            let expected = ds.records().iter().filter(|r| s.matches(&r.site)).count() as u64;
            prop_assert_eq!(slices[0].1 + slices[1].1, expected);
        }

        #[test]
        fn scatter_is_sound_and_complete(
            ds in arb_dataset(),
            s in arb_site(),
            a in 0.0f64..10_000.0,
            b in 0.0f64..10_000.0,
        ) {
            let range = PayloadRange::new(a, b);
            let spec = compute_scatter_spec(Some(&ds), &s, range);
            let mut got: Vec<(String, f64, f64)> = scatter_points(&spec);
            let mut expected: Vec<(String, f64, f64)> = ds
                .records()
                .iter()
                .filter(|r| range.contains(r.payload_mass_kg) && s.matches(&r.site))
                .map(|r| (r.booster_category.clone(), r.payload_mass_kg, f64::from(r.outcome.class())))
                .collect();
            for (_, x, _) in &got {
                prop_assert!(range.lo() <= *x && *x <= range.hi());
            }
            let key = |p: &(String, f64, f64)| (p.0.clone(), p.1.to_bits(), p.2.to_bits());
            got.sort_by_key(key);
            expected.sort_by_key(key);
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn derivations_are_idempotent(ds in arb_dataset(), s in arb_site(), a in 0.0f64..10_000.0) {
            let range = PayloadRange::new(a, 10_000.0);
            prop_assert_eq!(compute_pie_spec(Some(&ds), &s), compute_pie_spec(Some(&ds), &s));
            prop_assert_eq!(
                compute_scatter_spec(Some(&ds), &s, range),
                compute_scatter_spec(Some(&ds), &s, range)
            );
        }
    }
}
