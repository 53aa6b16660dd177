//! Zone occupancy statistics: how much of each dataset lands in each
//! selected color zone.

use std::collections::BTreeSet;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::filter::{filtered_indices, BinSelection};
use crate::data::model::{Coordinates, Dataset, Point, Row};
use crate::zone::ZoneCatalog;

/// Membership label for rows contained by no selected zone.
pub const NO_MATCH_LABEL: &str = "No Match";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Count and share of one zone (or the no-match bucket) within one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneTally {
    pub count: usize,
    /// Percentage of the dataset's filtered rows, 0 when the dataset is
    /// empty after filtering (never NaN, so tables stay renderable).
    pub percentage: f64,
}

/// Per-dataset occupancy table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOccupancy {
    pub dataset: String,
    /// Rows remaining after the bin-code filter.
    pub total: usize,
    /// One tally per selected zone, in sorted zone-name order. Overlapping
    /// zones each count a shared row, so tallies may sum past `total`.
    pub zones: Vec<(String, ZoneTally)>,
    /// Rows contained by no selected zone.
    pub unmatched: ZoneTally,
}

/// One filtered row with its classification, for drill-down displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub dataset: String,
    pub row: Row,
    /// The coordinate actually classified (shifted when the mode says so).
    pub point: Point,
    /// Matching zone names, sorted.
    pub zones: Vec<String>,
    /// Comma-joined sorted zone names, or [`NO_MATCH_LABEL`].
    pub label: String,
}

/// Full aggregation result: the per-dataset tables plus every labeled row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub per_dataset: Vec<DatasetOccupancy>,
    pub rows: Vec<LabeledRow>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Classify every bin-code-selected row of every dataset against the
/// selected zones and tally per-zone occupancy.
///
/// Datasets are aggregated in parallel but reported in input order; rows
/// within a dataset keep ingestion order. A dataset left empty by the filter
/// still gets an entry with `total == 0` and all percentages 0. A row inside
/// several overlapping zones counts toward each of them.
pub fn aggregate(
    datasets: &[Dataset],
    selected_bin_codes: &BinSelection,
    selected_zones: &BTreeSet<String>,
    catalog: &ZoneCatalog,
    coordinates: Coordinates,
) -> OccupancyReport {
    let per_dataset: Vec<(DatasetOccupancy, Vec<LabeledRow>)> = datasets
        .par_iter()
        .map(|ds| aggregate_one(ds, selected_bin_codes, selected_zones, catalog, coordinates))
        .collect();

    let mut report = OccupancyReport {
        per_dataset: Vec::with_capacity(per_dataset.len()),
        rows: Vec::new(),
    };
    for (occupancy, labeled) in per_dataset {
        debug!(
            "dataset '{}': {} rows, {} unmatched",
            occupancy.dataset, occupancy.total, occupancy.unmatched.count
        );
        report.per_dataset.push(occupancy);
        report.rows.extend(labeled);
    }
    report
}

fn aggregate_one(
    dataset: &Dataset,
    selected_bin_codes: &BinSelection,
    selected_zones: &BTreeSet<String>,
    catalog: &ZoneCatalog,
    coordinates: Coordinates,
) -> (DatasetOccupancy, Vec<LabeledRow>) {
    let indices = filtered_indices(dataset, selected_bin_codes);
    let total = indices.len();

    let labeled: Vec<LabeledRow> = indices
        .into_iter()
        .map(|i| {
            let row = &dataset.rows[i];
            let point = coordinates.resolve(row.point());
            let mut zones: Vec<String> = catalog
                .find_zones(point, selected_zones)
                .into_iter()
                .map(String::from)
                .collect();
            zones.sort();
            let label = if zones.is_empty() {
                NO_MATCH_LABEL.to_string()
            } else {
                zones.join(", ")
            };
            LabeledRow {
                dataset: dataset.name.clone(),
                row: row.clone(),
                point,
                zones,
                label,
            }
        })
        .collect();

    let pct = |count: usize| {
        if total == 0 {
            0.0
        } else {
            100.0 * count as f64 / total as f64
        }
    };

    let zones = selected_zones
        .iter()
        .map(|zone_name| {
            let count = labeled
                .iter()
                .filter(|lr| lr.zones.iter().any(|z| z == zone_name))
                .count();
            (zone_name.clone(), ZoneTally { count, percentage: pct(count) })
        })
        .collect();

    let unmatched_count = labeled.iter().filter(|lr| lr.label == NO_MATCH_LABEL).count();

    (
        DatasetOccupancy {
            dataset: dataset.name.clone(),
            total,
            zones,
            unmatched: ZoneTally {
                count: unmatched_count,
                percentage: pct(unmatched_count),
            },
        },
        labeled,
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::model::PositionKey;
    use crate::zone::presets::ncsp_catalog;

    fn row(x: f64, y: f64, code: &str) -> Row {
        Row {
            pos: PositionKey::new(0, 0),
            ciex: x,
            ciey: y,
            bin_code: code.to_string(),
            peak_wavelength: None,
            luminous_flux: None,
            forward_voltage: None,
        }
    }

    fn zone_set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dk32_end_to_end_scenario() {
        // Hand-traced against the ray-casting rule: at y = 0.2680 the DK32
        // left edge sits at x = 0.27592, so (0.2750, 0.2680) is outside;
        // at y = 0.2670 the span is [0.27538, 0.28088], so (0.2790, 0.2670)
        // is inside.
        let ds = Dataset::new(
            "lot1",
            vec![row(0.2750, 0.2680, "DK32"), row(0.2790, 0.2670, "DK32")],
        );
        let catalog = ncsp_catalog().unwrap();
        let report = aggregate(
            &[ds],
            &["DK32".to_string()].into(),
            &zone_set(&["DK32"]),
            &catalog,
            Coordinates::Raw,
        );

        let occ = &report.per_dataset[0];
        assert_eq!(occ.total, 2);

        assert_eq!(report.rows[0].label, NO_MATCH_LABEL);
        assert_eq!(report.rows[1].label, "DK32");

        let (_, tally) = &occ.zones[0];
        assert_eq!(tally.count, 1);
        assert_relative_eq!(tally.percentage, 50.0);
        assert_eq!(occ.unmatched.count, 1);

        // Labels agree with a direct polygon test per row.
        let dk32 = catalog.get("DK32").unwrap();
        for lr in &report.rows {
            assert_eq!(lr.zones.contains(&"DK32".to_string()), dk32.contains(lr.point));
        }
    }

    #[test]
    fn overlapping_zones_both_count_the_shared_row() {
        let catalog = ZoneCatalog::new(
            "overlap",
            [
                ("A", vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
                ("B", vec![(0.5, 0.0), (1.5, 0.0), (1.5, 1.0), (0.5, 1.0)]),
            ],
        )
        .unwrap();
        let ds = Dataset::new(
            "lot1",
            vec![row(0.75, 0.5, "X"), row(0.25, 0.5, "X"), row(9.0, 9.0, "X")],
        );
        let report = aggregate(
            &[ds],
            &["X".to_string()].into(),
            &zone_set(&["A", "B"]),
            &catalog,
            Coordinates::Raw,
        );

        let occ = &report.per_dataset[0];
        assert_eq!(occ.total, 3);
        let tally = |name: &str| {
            occ.zones
                .iter()
                .find(|(z, _)| z == name)
                .map(|(_, t)| t.count)
                .unwrap()
        };
        // The (0.75, 0.5) row is inside both zones and counts in each tally.
        assert_eq!(tally("A"), 2);
        assert_eq!(tally("B"), 1);
        assert_eq!(occ.unmatched.count, 1);
        assert_eq!(report.rows[0].label, "A, B");

        // Tallies agree with independent recounts over the labels.
        for (zone_name, t) in &occ.zones {
            let recount = report
                .rows
                .iter()
                .filter(|lr| lr.zones.contains(zone_name))
                .count();
            assert_eq!(t.count, recount);
        }
    }

    #[test]
    fn empty_filtered_dataset_reports_zero_not_nan() {
        let ds = Dataset::new("lot1", vec![row(0.275, 0.268, "DK32")]);
        let catalog = ncsp_catalog().unwrap();
        let report = aggregate(
            &[ds],
            &["ABSENT".to_string()].into(),
            &zone_set(&["DK32"]),
            &catalog,
            Coordinates::Raw,
        );

        let occ = &report.per_dataset[0];
        assert_eq!(occ.total, 0);
        assert_relative_eq!(occ.unmatched.percentage, 0.0);
        for (_, tally) in &occ.zones {
            assert_eq!(tally.count, 0);
            assert_relative_eq!(tally.percentage, 0.0);
        }
        assert!(report.rows.is_empty());
    }

    #[test]
    fn shifted_mode_classifies_translated_points() {
        // A point just left of DK32; a +0.002 x-shift moves it inside.
        let ds = Dataset::new("lot1", vec![row(0.2740, 0.2680, "DK32")]);
        let catalog = ncsp_catalog().unwrap();
        let selection: BinSelection = ["DK32".to_string()].into();
        let zones = zone_set(&["DK32"]);

        let raw = aggregate(&[ds.clone()], &selection, &zones, &catalog, Coordinates::Raw);
        assert_eq!(raw.per_dataset[0].unmatched.count, 1);

        let shifted = aggregate(
            &[ds],
            &selection,
            &zones,
            &catalog,
            Coordinates::Shifted(crate::offset::Offset::new(0.002, 0.0)),
        );
        assert_eq!(shifted.per_dataset[0].unmatched.count, 0);
        // The labeled row reports the shifted coordinate but keeps the
        // measured values untouched.
        assert_relative_eq!(shifted.rows[0].point.x, 0.2760, epsilon = 1e-12);
        assert_relative_eq!(shifted.rows[0].row.ciex, 0.2740, epsilon = 1e-12);
    }
}
