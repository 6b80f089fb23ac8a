//! Named indicator output.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

/// A single indicator result: the latest value or a series aligned with the
/// input observations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Scalar(f64),
    Series(Vec<f64>),
}

impl IndicatorValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(_) => None,
            Self::Series(v) => Some(v),
        }
    }

    /// The latest value: the scalar itself, or the last element of a series.
    pub fn latest(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Series(v) => v.last().copied(),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Series(v) => v.iter().all(|x| x.is_finite()),
        }
    }
}

/// Indicator name to value, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSet {
    values: BTreeMap<String, IndicatorValue>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: IndicatorValue) {
        self.values.insert(name.into(), value);
    }

    pub fn insert_scalar(&mut self, name: impl Into<String>, value: f64) {
        self.insert(name, IndicatorValue::Scalar(value));
    }

    pub fn insert_series(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.insert(name, IndicatorValue::Series(values));
    }

    pub fn get(&self, name: &str) -> Option<&IndicatorValue> {
        self.values.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(IndicatorValue::as_scalar)
    }

    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.get(name).and_then(IndicatorValue::as_series)
    }

    /// Latest value of any indicator, see [`IndicatorValue::latest`].
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(IndicatorValue::latest)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, IndicatorValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a IndicatorSet {
    type Item = (&'a String, &'a IndicatorValue);
    type IntoIter = btree_map::Iter<'a, String, IndicatorValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
