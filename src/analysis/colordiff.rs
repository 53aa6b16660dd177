//! Pairwise color difference between two datasets measuring the same
//! physical units, joined on the die position key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::model::{Dataset, Point, PositionKey};

/// One matched pair: the same die measured in the reference and target
/// datasets, with the chromaticity delta between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorDiffRow {
    pub pos: PositionKey,
    pub reference: Point,
    pub target: Point,
    pub dx: f64,
    pub dy: f64,
    /// Euclidean distance in chromaticity space.
    pub distance: f64,
}

/// Inner join of `target` against `reference` on the position key.
///
/// Positions present on only one side are dropped silently: an unmatched die
/// has no comparable pair, so this is the intended join semantics rather
/// than a data error. An empty join yields an empty vec. Output follows the
/// target dataset's row order; when a position key repeats in the reference
/// dataset, the first occurrence wins.
pub fn color_difference(reference: &Dataset, target: &Dataset) -> Vec<ColorDiffRow> {
    let mut by_pos: HashMap<&PositionKey, Point> = HashMap::with_capacity(reference.len());
    for row in &reference.rows {
        by_pos.entry(&row.pos).or_insert_with(|| row.point());
    }

    target
        .rows
        .iter()
        .filter_map(|row| {
            by_pos.get(&row.pos).map(|&ref_point| {
                let tgt_point = row.point();
                let dx = tgt_point.x - ref_point.x;
                let dy = tgt_point.y - ref_point.y;
                ColorDiffRow {
                    pos: row.pos.clone(),
                    reference: ref_point,
                    target: tgt_point,
                    dx,
                    dy,
                    distance: (dx * dx + dy * dy).sqrt(),
                }
            })
        })
        .collect()
}
