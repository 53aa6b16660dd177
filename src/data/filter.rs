use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Bin-code selection: which pre-classified codes take part in an analysis
// ---------------------------------------------------------------------------

/// The set of bin codes currently selected by the caller. An empty set means
/// "nothing selected" and filters every row out; there is no implicit
/// select-all.
pub type BinSelection = BTreeSet<String>;

/// A [`BinSelection`] containing every bin code present in the datasets,
/// i.e. no effective filtering.
pub fn select_all(datasets: &[Dataset]) -> BinSelection {
    datasets.iter().flat_map(|ds| ds.bin_codes()).collect()
}

/// Return indices of rows whose `bin_code` is in the selection, in ingestion
/// order.
pub fn filtered_indices(dataset: &Dataset, selected: &BinSelection) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| selected.contains(&row.bin_code))
        .map(|(i, _)| i)
        .collect()
}
