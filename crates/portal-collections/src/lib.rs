//! Portal collections - helpers for in-memory record collections.
//!
//! The data-portal client keeps datasets, projects and their facets as plain
//! collections of records. This crate holds the small set of functions used
//! to shape those collections:
//!
//! - Sorting by an externally supplied reference order
//! - Filtering by partial-object match
//! - Extracting the distinct values of a field
//! - Summing a numeric field
//! - Building a sequence of randomly drawn filler values
//!
//! # Quick Start
//!
//! ```rust
//! use portal_collections::{
//!     accumulate_value, filter_partial, record, sort_by_field_reference,
//!     unique_values_for_key, Number, PartialMatch, Value,
//! };
//!
//! let mut datasets = vec![
//!     record! { "title" => "Rainfall", "status" => "published", "size" => 12 },
//!     record! { "title" => "Soil", "status" => "draft", "size" => 3 },
//!     record! { "title" => "Legacy", "size" => 5 },
//! ];
//!
//! // Reference ordering; records without a known status go first
//! let workflow = [Value::from("draft"), Value::from("published")];
//! sort_by_field_reference(&mut datasets, "status", &workflow);
//! assert_eq!(datasets[0].value("title"), Value::from("Legacy"));
//!
//! let published = filter_partial(&datasets, &PartialMatch::new().field("status", "published"));
//! assert_eq!(published.len(), 1);
//!
//! let statuses = unique_values_for_key(&datasets, "status");
//! assert_eq!(statuses.len(), 3);
//!
//! assert_eq!(accumulate_value(&datasets, "size").unwrap(), Number::I64(20));
//! ```
//!
//! # Equality
//!
//! Matching and reference lookups use strict equality: no coercion between
//! types, `NaN` never equal, composite values equal only to themselves.
//! Deduplication uses same-value-zero, which differs only in treating `NaN`
//! as equal to `NaN`.
//!
//! # Logging
//!
//! Operations emit `tracing` events at `debug` and `trace` level. The crate
//! never installs a subscriber.

mod accumulate;
mod error;
mod fill;
mod matching;
mod ordering;
mod record;
mod unique;
mod value;

// Re-export public API
pub use accumulate::accumulate_value;
pub use error::{CollectionError, Result};
pub use fill::{random_fill, random_fill_with};
pub use matching::{filter_partial, retain_partial, PartialMatch};
pub use ordering::{
    reference_position, sort_by_field_reference, sort_by_reference, ReferenceOrder, Unmatched,
};
pub use record::{FieldAccess, Record};
pub use unique::{unique_values, unique_values_for_key};
pub use value::{Number, Value};
