//! Partial-object matching.
//!
//! A [`PartialMatch`] lists field constraints. A record matches when every
//! constrained field is strictly equal (see [`Value::strict_eq`]) to the
//! constraint value; fields it does not mention are unconstrained.

use tracing::{debug, trace};

use crate::record::{FieldAccess, Record};
use crate::value::Value;

/// Field constraints for filtering records.
///
/// Constraints keep insertion order. Adding a constraint for a field that is
/// already constrained replaces the earlier value.
///
/// # Example
///
/// ```
/// use portal_collections::{filter_partial, record, PartialMatch};
///
/// let datasets = vec![
///     record! { "id" => 1, "type" => "x" },
///     record! { "id" => 2, "type" => "y" },
/// ];
///
/// let spec = PartialMatch::new().field("type", "x");
/// let matched = filter_partial(&datasets, &spec);
/// assert_eq!(matched, [&datasets[0]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialMatch {
    constraints: Vec<(String, Value)>,
}

impl PartialMatch {
    /// Creates an empty spec, which matches every record.
    pub fn new() -> Self {
        PartialMatch::default()
    }

    /// Adds a constraint, returning the spec for chaining.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a constraint.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.constraints.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.constraints.push((key, value)),
        }
    }

    /// Returns the constraints in insertion order.
    pub fn constraints(&self) -> &[(String, Value)] {
        &self.constraints
    }

    /// Returns the number of constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if there are no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Tests if a single item satisfies every constraint.
    pub fn matches<T: FieldAccess + ?Sized>(&self, item: &T) -> bool {
        self.constraints
            .iter()
            .all(|(key, expected)| item.field_value(key).strict_eq(expected))
    }

    /// Returns references to matching items, in input order.
    pub fn filter<'a, T: FieldAccess>(&self, items: &'a [T]) -> Vec<&'a T> {
        let matched: Vec<&'a T> = items.iter().filter(|item| self.matches(*item)).collect();
        debug!(
            items = items.len(),
            constraints = self.constraints.len(),
            matched = matched.len(),
            "filtered by partial match"
        );
        matched
    }

    /// Keeps only matching items in `items`.
    pub fn retain<T: FieldAccess>(&self, items: &mut Vec<T>) {
        let before = items.len();
        items.retain(|item| self.matches(item));
        trace!(before, after = items.len(), "retained partial matches");
    }

    /// Counts the matching items.
    pub fn count<T: FieldAccess>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PartialMatch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = PartialMatch::new();
        for (key, value) in iter {
            spec.insert(key, value);
        }
        spec
    }
}

/// Uses every field of the record as a constraint.
impl From<Record> for PartialMatch {
    fn from(record: Record) -> Self {
        record.into_iter().collect()
    }
}

/// Returns the items matching every constraint in `spec`, preserving order.
///
/// An empty spec returns every item.
pub fn filter_partial<'a, T: FieldAccess>(items: &'a [T], spec: &PartialMatch) -> Vec<&'a T> {
    spec.filter(items)
}

/// Removes the items of `items` that do not match `spec`.
pub fn retain_partial<T: FieldAccess>(items: &mut Vec<T>, spec: &PartialMatch) {
    spec.retain(items);
}
