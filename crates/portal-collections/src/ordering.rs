//! Sorting by an externally supplied reference order.
//!
//! Elements are ranked by the position of their first strictly-equal match in
//! a reference list. Elements missing from the reference are "unmatched" and,
//! by default, move to the front ([`Unmatched::First`]).
//!
//! All sorts here are stable and happen in place unless the method name says
//! otherwise ([`ReferenceOrder::sorted`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::FieldAccess;
use crate::value::Value;

/// Where elements absent from the reference list end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unmatched {
    /// Before every matched element.
    #[default]
    First,
    /// After every matched element.
    Last,
}

impl Unmatched {
    /// Turns a reference position into a sort key.
    ///
    /// Unmatched elements all share one key, so a stable sort keeps their
    /// input order.
    pub(crate) fn sort_key(self, position: Option<usize>) -> (bool, usize) {
        match self {
            Unmatched::First => (position.is_some(), position.unwrap_or(0)),
            Unmatched::Last => (position.is_none(), position.unwrap_or(0)),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Unmatched::First => "first",
            Unmatched::Last => "last",
        }
    }
}

impl std::fmt::Display for Unmatched {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the index of the first element of `reference` equal to `item`.
pub fn reference_position<T: PartialEq>(reference: &[T], item: &T) -> Option<usize> {
    reference.iter().position(|candidate| candidate == item)
}

/// Sorts scalar `items` in place by their position in `reference`.
///
/// Items not found in `reference` move to the front, keeping their relative
/// order.
///
/// # Example
///
/// ```
/// use portal_collections::sort_by_reference;
///
/// let mut letters = vec!["b", "a", "c"];
/// sort_by_reference(&mut letters, &["a", "b"]);
/// assert_eq!(letters, ["c", "a", "b"]);
/// ```
pub fn sort_by_reference<T: PartialEq>(items: &mut [T], reference: &[T]) {
    debug!(
        items = items.len(),
        reference = reference.len(),
        "sorting by reference order"
    );
    sort_by_position(items, Unmatched::First, |item| {
        reference_position(reference, item)
    });
}

/// Sorts records in place by the position of their `key` value in `reference`.
///
/// Records whose value is not found (including records without the key)
/// move to the front, keeping their relative order.
pub fn sort_by_field_reference<T: FieldAccess>(items: &mut [T], key: &str, reference: &[Value]) {
    debug!(
        items = items.len(),
        reference = reference.len(),
        key,
        "sorting by field reference order"
    );
    sort_by_position(items, Unmatched::First, |item| {
        reference_position(reference, &*item.field_value(key))
    });
}

fn sort_by_position<T, F>(items: &mut [T], unmatched: Unmatched, position: F)
where
    F: Fn(&T) -> Option<usize>,
{
    items.sort_by_cached_key(|item| unmatched.sort_key(position(item)));
}

/// A reusable reference ordering with a configurable unmatched placement.
///
/// `ReferenceOrder` can be deserialized, so an ordering can live in a host
/// application's configuration:
///
/// ```
/// use portal_collections::{ReferenceOrder, Unmatched, Value};
///
/// let order: ReferenceOrder =
///     serde_json::from_str(r#"{"reference": ["draft", "published"], "unmatched": "last"}"#)
///         .unwrap();
/// assert_eq!(order.get_unmatched(), Unmatched::Last);
///
/// let mut states = vec![Value::from("published"), Value::from("retired"), Value::from("draft")];
/// order.sort(&mut states);
/// assert_eq!(states, [Value::from("draft"), Value::from("published"), Value::from("retired")]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceOrder<R = Value> {
    reference: Vec<R>,
    #[serde(default)]
    unmatched: Unmatched,
}

impl<R> ReferenceOrder<R> {
    /// Creates an ordering with unmatched elements placed first.
    pub fn new<I>(reference: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<R>,
    {
        ReferenceOrder {
            reference: reference.into_iter().map(Into::into).collect(),
            unmatched: Unmatched::First,
        }
    }

    /// Sets where unmatched elements are placed.
    pub fn unmatched(mut self, unmatched: Unmatched) -> Self {
        self.unmatched = unmatched;
        self
    }

    /// Places unmatched elements after every matched one.
    pub fn unmatched_last(self) -> Self {
        self.unmatched(Unmatched::Last)
    }

    /// Returns the reference list.
    pub fn reference(&self) -> &[R] {
        &self.reference
    }

    /// Returns the unmatched placement.
    pub fn get_unmatched(&self) -> Unmatched {
        self.unmatched
    }
}

impl<R: PartialEq> ReferenceOrder<R> {
    /// Returns the reference position of `item`, if it has one.
    pub fn position(&self, item: &R) -> Option<usize> {
        reference_position(&self.reference, item)
    }

    /// Sorts `items` in place.
    pub fn sort(&self, items: &mut [R]) {
        debug!(
            items = items.len(),
            reference = self.reference.len(),
            unmatched = %self.unmatched,
            "sorting by reference order"
        );
        sort_by_position(items, self.unmatched, |item| self.position(item));
    }

    /// Returns references to `items` in sorted order, leaving `items` untouched.
    pub fn sorted<'a>(&self, items: &'a [R]) -> Vec<&'a R> {
        let mut refs: Vec<&'a R> = items.iter().collect();
        sort_by_position(&mut refs, self.unmatched, |item| self.position(item));
        refs
    }
}

impl ReferenceOrder<Value> {
    /// Sorts records in place by the value at `key`.
    pub fn sort_by_field<T: FieldAccess>(&self, items: &mut [T], key: &str) {
        debug!(
            items = items.len(),
            reference = self.reference.len(),
            unmatched = %self.unmatched,
            key,
            "sorting by field reference order"
        );
        sort_by_position(items, self.unmatched, |item| {
            self.position(&item.field_value(key))
        });
    }

    /// Returns references to records sorted by the value at `key`.
    pub fn sorted_by_field<'a, T: FieldAccess>(&self, items: &'a [T], key: &str) -> Vec<&'a T> {
        let mut refs: Vec<&'a T> = items.iter().collect();
        self.sort_by_field(&mut refs, key);
        refs
    }
}

impl<R> Default for ReferenceOrder<R> {
    fn default() -> Self {
        ReferenceOrder {
            reference: Vec::new(),
            unmatched: Unmatched::First,
        }
    }
}

impl<R> FromIterator<R> for ReferenceOrder<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        ReferenceOrder {
            reference: iter.into_iter().collect(),
            unmatched: Unmatched::First,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::record::Record;

    #[test]
    fn unmatched_sort_key() {
        assert!(Unmatched::First.sort_key(None) < Unmatched::First.sort_key(Some(0)));
        assert!(Unmatched::First.sort_key(Some(0)) < Unmatched::First.sort_key(Some(1)));

        assert!(Unmatched::Last.sort_key(None) > Unmatched::Last.sort_key(Some(99)));
        assert!(Unmatched::Last.sort_key(Some(0)) < Unmatched::Last.sort_key(Some(1)));
    }

    #[test]
    fn unmatched_display() {
        assert_eq!(Unmatched::First.to_string(), "first");
        assert_eq!(Unmatched::Last.to_string(), "last");
        assert_eq!(Unmatched::default(), Unmatched::First);
    }

    #[test]
    fn unmatched_deserializes_lowercase() {
        let parsed: Unmatched = serde_json::from_str("\"last\"").unwrap();
        assert_eq!(parsed, Unmatched::Last);
        assert!(serde_json::from_str::<Unmatched>("\"middle\"").is_err());
    }

    #[test]
    fn position_is_first_occurrence() {
        assert_eq!(reference_position(&["a", "b", "a"], &"a"), Some(0));
        assert_eq!(reference_position(&["a", "b"], &"z"), None);
        assert_eq!(reference_position::<&str>(&[], &"a"), None);
    }

    #[test]
    fn unmatched_scalars_sort_first() {
        let mut items = vec!["b", "a", "c"];
        sort_by_reference(&mut items, &["a", "b"]);
        assert_eq!(items, ["c", "a", "b"]);
    }

    #[test]
    fn unmatched_keep_input_order() {
        let mut items = vec!["x", "b", "y", "a", "z"];
        sort_by_reference(&mut items, &["a", "b"]);
        assert_eq!(items, ["x", "y", "z", "a", "b"]);
    }

    #[test]
    fn equal_positions_keep_input_order() {
        let mut records = vec![
            record! { "id" => 1, "kind" => "map" },
            record! { "id" => 2, "kind" => "table" },
            record! { "id" => 3, "kind" => "map" },
            record! { "id" => 4, "kind" => "table" },
        ];
        sort_by_field_reference(&mut records, "kind", &[Value::from("table"), Value::from("map")]);

        let ids: Vec<Value> = records.iter().map(|r| r.value("id")).collect();
        assert_eq!(ids, [Value::from(2), Value::from(4), Value::from(1), Value::from(3)]);
    }

    #[test]
    fn empty_inputs() {
        let mut items: Vec<i32> = Vec::new();
        sort_by_reference(&mut items, &[1, 2]);
        assert!(items.is_empty());

        let mut items = vec![3, 1, 2];
        sort_by_reference(&mut items, &[]);
        assert_eq!(items, [3, 1, 2]);
    }

    #[test]
    fn nan_is_never_found() {
        let mut items = vec![1.0, f64::NAN];
        sort_by_reference(&mut items, &[1.0, f64::NAN]);
        assert!(items[0].is_nan());
        assert_eq!(items[1], 1.0);
    }

    #[test]
    fn records_sorted_by_field() {
        let mut records = vec![
            record! { "id" => 1, "status" => "published" },
            record! { "id" => 2, "status" => "draft" },
            record! { "id" => 3 },
            record! { "id" => 4, "status" => "review" },
        ];
        let reference = [Value::from("draft"), Value::from("review"), Value::from("published")];

        sort_by_field_reference(&mut records, "status", &reference);

        let ids: Vec<Value> = records.iter().map(|r| r.value("id")).collect();
        assert_eq!(ids, [Value::from(3), Value::from(2), Value::from(4), Value::from(1)]);
    }

    #[test]
    fn reference_order_unmatched_last() {
        let order = ReferenceOrder::<&str>::new(["a", "b"]).unmatched_last();
        let mut items = vec!["b", "c", "a"];
        order.sort(&mut items);
        assert_eq!(items, ["a", "b", "c"]);
    }

    #[test]
    fn reference_order_sorted_leaves_input() {
        let order: ReferenceOrder<i32> = [3, 1].into_iter().collect();
        let items = vec![1, 2, 3];
        let sorted = order.sorted(&items);
        assert_eq!(sorted, [&2, &3, &1]);
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn reference_order_sorted_by_field() {
        let records = vec![record! { "k" => "b" }, record! { "k" => "a" }, Record::new()];
        let order = ReferenceOrder::<Value>::new(["a", "b"]).unmatched_last();
        let sorted = order.sorted_by_field(&records, "k");

        assert_eq!(sorted[0].value("k"), Value::from("a"));
        assert_eq!(sorted[1].value("k"), Value::from("b"));
        assert!(sorted[2].is_empty());
        assert_eq!(records[0].value("k"), Value::from("b"));
    }

    #[test]
    fn reference_order_accessors() {
        let order = ReferenceOrder::<Value>::default();
        assert!(order.reference().is_empty());
        assert_eq!(order.get_unmatched(), Unmatched::First);
        assert_eq!(order.position(&Value::from(1)), None);
    }
}
