/// Data layer: core types, loading, and neighbor queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → EmbeddingDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ EmbeddingDataset  │  Vec<LabeledPoint>, source order
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ neighbor  │  rank points by distance → neighbor indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod neighbor;
