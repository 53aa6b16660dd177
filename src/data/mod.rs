/// Data layer: core row/dataset types and bin-code filtering.
///
/// Architecture:
/// ```text
///   external ingestion (out of scope)
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Row>: position key, (ciex, ciey), bin_code, attributes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  bin-code selection → filtered row indices
///   └──────────┘
///        │
///        ▼
///   classification / statistics / regression (crate::analysis)
/// ```
pub mod filter;
pub mod model;
