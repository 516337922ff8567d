//! Listing validation and analysis utilities used by the listing pipeline.

pub mod format;
pub mod listing;
pub mod metrics;
pub mod quantitative;

pub use format::format_listing_collection;
pub use listing::{validate_schema, ListingCollection, ListingRecord, ListingSchema};
pub use metrics::{extract_metrics, ExtractedMetric, MetricKind};
pub use quantitative::has_quantitative_content;
