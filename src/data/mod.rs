/// Data layer: core types, loading, merging and export.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (background thread)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐        ┌──────────┐
///   │  Dataset  │ ◀──── │  merge    │  concatenate + source tags
///   └──────────┘        └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Dataset → CSV, Summary → JSON
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod merge;
pub mod model;
