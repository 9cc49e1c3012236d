//! Keyed numeric accumulation.

use tracing::debug;

use crate::error::{CollectionError, Result};
use crate::record::FieldAccess;
use crate::value::{Number, Value};

/// Sums the values under `key` across `items`.
///
/// This is a left fold with no seed: a single item yields its own value and
/// an empty collection is an error. Values must be numbers; nothing is
/// coerced.
///
/// # Errors
///
/// - [`CollectionError::EmptyInput`] if `items` is empty.
/// - [`CollectionError::NotNumeric`] if any value under `key` is not a number,
///   including a missing key.
///
/// # Example
///
/// ```
/// use portal_collections::{accumulate_value, record, CollectionError, Number, Record};
///
/// let files = vec![record! { "v" => 2 }, record! { "v" => 3 }];
/// assert_eq!(accumulate_value(&files, "v").unwrap(), Number::I64(5));
///
/// let none: Vec<Record> = Vec::new();
/// assert!(matches!(
///     accumulate_value(&none, "v"),
///     Err(CollectionError::EmptyInput { .. })
/// ));
/// ```
pub fn accumulate_value<'a, I, T>(items: I, key: &str) -> Result<Number>
where
    I: IntoIterator<Item = &'a T>,
    T: FieldAccess + 'a,
{
    let mut total: Option<Number> = None;
    let mut count = 0usize;

    for (index, item) in items.into_iter().enumerate() {
        let value = numeric_value(&item.field_value(key), key, index)?;
        total = Some(match total {
            Some(sum) => sum + value,
            None => value,
        });
        count += 1;
    }

    let total = total.ok_or_else(|| CollectionError::EmptyInput {
        key: key.to_string(),
    })?;
    debug!(items = count, key, %total, "accumulated values");
    Ok(total)
}

fn numeric_value(value: &Value, key: &str, index: usize) -> Result<Number> {
    value.as_number().ok_or_else(|| CollectionError::NotNumeric {
        key: key.to_string(),
        index,
        found: value.type_name(),
    })
}
