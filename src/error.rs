use thiserror::Error;

/// Configuration errors raised while constructing static catalog data.
///
/// These are the only hard errors the library produces: a malformed zone or
/// bin set must never reach classification, where it would silently
/// misclassify. Empty-input conditions (empty filtered dataset, too few
/// regression points, empty join) are routine outcomes and are represented as
/// empty or omitted results, not as errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("zone '{name}' has {count} vertices; a polygon needs at least 3")]
    DegenerateZone { name: String, count: usize },

    #[error("bin '{name}' has an empty interval [{min}, {max})")]
    EmptyBin { name: String, min: f64, max: f64 },

    #[error("bins '{first}' and '{second}' overlap")]
    OverlappingBins { first: String, second: String },

    #[error("bin '{name}' is out of order: lower bounds must ascend with the declared order")]
    UnorderedBins { name: String },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
