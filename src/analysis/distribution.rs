//! Production distribution: how the classified rows spread across the named
//! ranges of a secondary attribute (wavelength, flux, voltage), including a
//! zone-membership cross-tabulation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::occupancy::LabeledRow;
use crate::bins::{value_to_bin, BinLabel, BinSet};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Count and share of one bin label within one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub label: BinLabel,
    pub count: usize,
    pub percentage: f64,
}

/// Per-dataset histogram over one bin set. Rows follow the bin set's declared
/// order, with the `Missing` and `OutOfRange` buckets appended last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub dataset: String,
    pub total: usize,
    pub rows: Vec<DistributionRow>,
}

impl Distribution {
    /// The bin with the highest count, ties resolved by declared order.
    /// `None` when the dataset counted no rows at all.
    pub fn dominant_bin(&self) -> Option<&DistributionRow> {
        let mut best: Option<&DistributionRow> = None;
        for row in self.rows.iter().filter(|r| r.count > 0) {
            match best {
                Some(b) if b.count >= row.count => {}
                _ => best = Some(row),
            }
        }
        best
    }
}

/// Zone-membership label × bin label count table over all labeled rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTab {
    /// Row axis: distinct membership labels, sorted.
    pub zone_labels: Vec<String>,
    /// Column axis: bin set order, then `Missing`, then `OutOfRange`.
    pub bin_labels: Vec<BinLabel>,
    counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Count at (membership label, bin label); 0 for unknown labels.
    pub fn count(&self, zone_label: &str, bin_label: &BinLabel) -> usize {
        let Some(r) = self.zone_labels.iter().position(|z| z == zone_label) else {
            return 0;
        };
        let Some(c) = self.bin_labels.iter().position(|b| b == bin_label) else {
            return 0;
        };
        self.counts[r][c]
    }

    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn column_order(binset: &BinSet) -> Vec<BinLabel> {
    let mut labels: Vec<BinLabel> = binset
        .bins()
        .iter()
        .map(|b| BinLabel::Named(b.name.clone()))
        .collect();
    labels.push(BinLabel::Missing);
    labels.push(BinLabel::OutOfRange);
    labels
}

/// Per-dataset histogram of the bin set's attribute over the labeled rows
/// produced by [`crate::analysis::occupancy::aggregate`]. Datasets appear in
/// first-appearance order of the labeled rows.
pub fn production_distribution(labeled: &[LabeledRow], binset: &BinSet) -> Vec<Distribution> {
    let columns = column_order(binset);

    let mut order: Vec<&str> = Vec::new();
    let mut per_dataset: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for lr in labeled {
        let entry = per_dataset.entry(lr.dataset.as_str()).or_insert_with(|| {
            order.push(lr.dataset.as_str());
            vec![0; columns.len()]
        });
        let label = value_to_bin(binset.attribute.of(&lr.row), binset);
        // Every label is one of the fixed columns.
        if let Some(idx) = columns.iter().position(|c| *c == label) {
            entry[idx] += 1;
        }
    }

    order
        .into_iter()
        .map(|name| {
            let counts = &per_dataset[name];
            let total: usize = counts.iter().sum();
            let rows = columns
                .iter()
                .zip(counts)
                .map(|(label, &count)| DistributionRow {
                    label: label.clone(),
                    count,
                    percentage: if total == 0 {
                        0.0
                    } else {
                        100.0 * count as f64 / total as f64
                    },
                })
                .collect();
            Distribution {
                dataset: name.to_string(),
                total,
                rows,
            }
        })
        .collect()
}

/// Cross-tabulate zone-membership labels against bin labels over all labeled
/// rows (datasets pooled, as in the drill-down table).
pub fn cross_tabulate(labeled: &[LabeledRow], binset: &BinSet) -> CrossTab {
    let bin_labels = column_order(binset);

    let mut zone_labels: Vec<String> = labeled.iter().map(|lr| lr.label.clone()).collect();
    zone_labels.sort();
    zone_labels.dedup();

    let mut counts = vec![vec![0usize; bin_labels.len()]; zone_labels.len()];
    for lr in labeled {
        let label = value_to_bin(binset.attribute.of(&lr.row), binset);
        let r = zone_labels.binary_search(&lr.label).expect("label present");
        if let Some(c) = bin_labels.iter().position(|b| *b == label) {
            counts[r][c] += 1;
        }
    }

    CrossTab {
        zone_labels,
        bin_labels,
        counts,
    }
}
