//! Catalog - In-memory code template collection
//!
//! This crate holds the template collection behind the template dashboard:
//! the data model, search/filter/sort queries, add/edit/delete and bulk
//! mutations, snapshot import/export, and the statistics shown on the
//! analytics view.
//!
//! # Example
//!
//! ```rust
//! use catalog::{compute_stats, NewTemplate, SortKey, TemplateQuery, TemplateStore};
//!
//! let mut store = TemplateStore::new();
//! store.add(NewTemplate::new("Card", "<div class=\"card\"></div>").with_category("React")).unwrap();
//! store.add(NewTemplate::new("Fetch", "fetch(url)").with_category("JavaScript")).unwrap();
//!
//! let react = store.query(&TemplateQuery::new().category("React").sort_by(SortKey::Title));
//! assert_eq!(react.len(), 1);
//!
//! let stats = compute_stats(store.iter());
//! assert_eq!(stats.total_templates, 2);
//! ```

mod error;
mod preview;
mod query;
mod sample;
mod snapshot;
mod stats;
mod store;
mod template;

#[cfg(test)]
mod tests;

pub use error::{CatalogError, Result};
pub use preview::{
    category_color, highlight_language, supports_live_render, truncate_code, Category,
    DEFAULT_PREVIEW_LINES,
};
pub use query::{QueryResult, SortKey, TemplateQuery, ALL_CATEGORIES};
pub use sample::{sample_store, sample_templates};
pub use snapshot::{parse_number_cell, rows_from_json, SnapshotRow, SNAPSHOT_HEADER};
pub use stats::{category_breakdown, compute_stats, CategorySummary, CodeMetrics, TemplateStats};
pub use store::TemplateStore;
pub use template::{NewTemplate, Template, TemplateId, TemplateUpdate};
