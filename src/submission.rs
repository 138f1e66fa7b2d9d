//! Submitted form data.
//!
//! Values reach this crate already decoded. Extracting them from a request
//! body is the caller's job, so anything that can look up a value by field
//! identifier can be validated.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

/// Lookup of submitted values by field identifier.
///
/// Implemented for the common string maps and for [`Submission`]. Framework
/// integrations can implement it directly on their own form types.
///
/// # Examples
///
/// ```
/// use cms_forms::FieldValues;
/// use std::collections::HashMap;
///
/// let mut data = HashMap::new();
/// data.insert("name".to_string(), "Ada".to_string());
///
/// assert_eq!(data.value("name"), Some("Ada"));
/// assert_eq!(data.value("email"), None);
/// ```
pub trait FieldValues {
    /// Returns the submitted value for `field`, or `None` if it was not sent.
    fn value(&self, field: &str) -> Option<&str>;
}

impl<S: BuildHasher> FieldValues for HashMap<String, String, S> {
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl FieldValues for BTreeMap<String, String> {
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<S: BuildHasher> FieldValues for IndexMap<String, String, S> {
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<T: FieldValues + ?Sized> FieldValues for &T {
    fn value(&self, field: &str) -> Option<&str> {
        (**self).value(field)
    }
}

/// Request-scoped collection of submitted field values in arrival order.
///
/// # Examples
///
/// ```
/// use cms_forms::{FieldValues, Submission};
///
/// let submission: Submission = [("name", "Ada"), ("website", "")].into_iter().collect();
///
/// assert_eq!(submission.len(), 2);
/// assert_eq!(submission.value("website"), Some(""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    values: IndexMap<String, String>,
}

impl Submission {
    /// Creates an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submitted value, replacing any earlier value for the same field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Returns the submitted value for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Returns the number of submitted fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over submitted `(field, value)` pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FieldValues for Submission {
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field)
    }
}

impl<K, V> FromIterator<(K, V)> for Submission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut submission = Submission::new();
        for (field, value) in iter {
            submission.insert(field, value);
        }
        submission
    }
}
