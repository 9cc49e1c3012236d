//! Distinct-value extraction.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use crate::record::FieldAccess;
use crate::value::Value;

/// Hash-set key that compares values with same-value-zero equality.
///
/// Numbers hash by their `f64` value with `-0.0` folded into `0.0` and every
/// `NaN` folded into one bit pattern, so numerically equal values of different
/// variants land in the same bucket. Composites hash by allocation.
struct Distinct<'a>(&'a Value);

impl PartialEq for Distinct<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_value_zero(other.0)
    }
}

impl Eq for Distinct<'_> {}

impl Hash for Distinct<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::Undefined => state.write_u8(0),
            Value::Null => state.write_u8(1),
            Value::Bool(b) => {
                state.write_u8(2);
                b.hash(state);
            }
            Value::Number(n) => {
                state.write_u8(3);
                let f = n.to_f64();
                let bits = if f.is_nan() {
                    f64::NAN.to_bits()
                } else if f == 0.0 {
                    0
                } else {
                    f.to_bits()
                };
                state.write_u64(bits);
            }
            Value::String(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Value::List(items) => {
                state.write_u8(5);
                Arc::as_ptr(items).cast::<()>().hash(state);
            }
            Value::Map(record) => {
                state.write_u8(6);
                Arc::as_ptr(record).hash(state);
            }
        }
    }
}

/// Removes duplicate values, keeping the first occurrence of each.
///
/// Duplicates are detected with same-value-zero equality, so `NaN` values
/// collapse into one and `1` and `1.0` count as the same value.
pub fn unique_values<I>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = Value>,
{
    let values: Vec<Value> = values.into_iter().collect();
    let mut seen = HashSet::with_capacity(values.len());
    let first_seen: Vec<bool> = values.iter().map(|value| seen.insert(Distinct(value))).collect();

    values
        .into_iter()
        .zip(first_seen)
        .filter_map(|(value, first)| first.then_some(value))
        .collect()
}

/// Returns the distinct values found under `key`, in first-occurrence order.
///
/// Items without the key contribute `Undefined`, which is deduplicated like
/// any other value.
///
/// # Example
///
/// ```
/// use portal_collections::{record, unique_values_for_key, Value};
///
/// let rows = vec![record! { "k" => 1 }, record! { "k" => 2 }, record! { "k" => 1 }];
/// assert_eq!(unique_values_for_key(&rows, "k"), [Value::from(1), Value::from(2)]);
/// ```
pub fn unique_values_for_key<T: FieldAccess>(items: &[T], key: &str) -> Vec<Value> {
    let unique = unique_values(items.iter().map(|item| item.field_value(key).into_owned()));
    debug!(
        items = items.len(),
        key,
        unique = unique.len(),
        "extracted unique values"
    );
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::record::Record;

    #[test]
    fn keeps_first_occurrence_order() {
        let rows = vec![
            record! { "org" => "b" },
            record! { "org" => "a" },
            record! { "org" => "b" },
            record! { "org" => "c" },
            record! { "org" => "a" },
        ];
        assert_eq!(
            unique_values_for_key(&rows, "org"),
            [Value::from("b"), Value::from("a"), Value::from("c")]
        );
    }

    #[test]
    fn missing_key_yields_single_undefined() {
        let rows = vec![record! { "k" => 1 }, Record::new(), Record::new()];
        let unique = unique_values_for_key(&rows, "k");
        assert_eq!(unique.len(), 2);
        assert!(unique[1].is_undefined());
    }

    #[test]
    fn empty_input() {
        let rows: Vec<Record> = Vec::new();
        assert!(unique_values_for_key(&rows, "k").is_empty());
    }

    #[test]
    fn nan_collapses() {
        let unique = unique_values([Value::from(f64::NAN), Value::from(1), Value::from(f64::NAN)]);
        assert_eq!(unique.len(), 2);
        assert!(unique[0].as_number().is_some_and(|n| n.is_nan()));
    }

    #[test]
    fn numbers_compare_across_variants() {
        let unique = unique_values([
            Value::from(1i64),
            Value::from(1u8),
            Value::from(1.0f64),
            Value::from(0.0f64),
            Value::from(-0.0f64),
        ]);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn large_integers_stay_distinct_from_nearby_floats() {
        let big = 1i64 << 53;
        let forwards = unique_values([
            Value::from(big),
            Value::from(big + 1),
            Value::from(big as f64),
        ]);
        assert_eq!(forwards, [Value::from(big), Value::from(big + 1)]);

        let backwards = unique_values([
            Value::from(big as f64),
            Value::from(big + 1),
            Value::from(big),
        ]);
        assert_eq!(backwards.len(), 2);
        assert_eq!(backwards[1], Value::from(big + 1));
    }

    #[test]
    fn no_cross_type_collapse() {
        let unique = unique_values([
            Value::from(1),
            Value::from("1"),
            Value::from(true),
            Value::Null,
            Value::Undefined,
        ]);
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn composites_dedupe_by_identity() {
        let shared = Value::list(["a"]);
        let unique = unique_values([shared.clone(), shared, Value::list(["a"])]);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn idempotent() {
        let rows = vec![record! { "k" => 2 }, record! { "k" => 1 }, record! { "k" => 2 }];
        let once = unique_values_for_key(&rows, "k");
        let twice = unique_values(once.clone());
        assert_eq!(once, twice);
    }
}
