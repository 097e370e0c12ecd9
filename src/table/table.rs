use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::{MetadataValue, ValueKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Value for key {key:?} is {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Header table attached to a published message.
///
/// Plain data: no interior locking, no identity beyond its contents.
/// Keys iterate in ascending order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    inner: BTreeMap<String, MetadataValue>,
}

impl Table {
    pub fn new() -> Self {
        Table {
            inner: BTreeMap::new(),
        }
    }

    /// String value at `key`, or `""` when the key is absent.
    ///
    /// A present value of any other kind is a `TypeMismatch`.
    pub fn get(&self, key: &str) -> Result<&str, TableError> {
        Ok(self.try_get_string(key)?.unwrap_or(""))
    }

    /// Like [`Table::get`], but keeps absence distinguishable from an
    /// empty string.
    pub fn try_get_string(&self, key: &str) -> Result<Option<&str>, TableError> {
        match self.inner.get(key) {
            None => Ok(None),
            Some(MetadataValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(TableError::TypeMismatch {
                key: key.to_owned(),
                expected: ValueKind::String,
                found: other.kind(),
            }),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner
            .insert(key.into(), MetadataValue::String(value.into()));
    }

    /// Insert any supported value, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        self.inner.insert(key.into(), value.into())
    }

    pub fn value(&self, key: &str) -> Option<&MetadataValue> {
        self.inner.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Snapshot of the current keys.
    pub fn keys(&self) -> Vec<String> {
        self.inner.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataValue)> {
        self.inner.iter()
    }

    /// Copy every entry of `other` into `self`; `other` wins on collision.
    pub fn merge(&mut self, other: Table) {
        for (k, v) in other.inner {
            self.inner.insert(k, v);
        }
    }

    /// Combine tables left to right into a new table. On key collision the
    /// rightmost table wins. Nested tables are replaced, not merged.
    pub fn merged<'a, I>(tables: I) -> Table
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let mut out = Table::new();
        let mut inputs = 0usize;
        for table in tables {
            inputs += 1;
            for (k, v) in &table.inner {
                out.inner.insert(k.clone(), v.clone());
            }
        }
        tracing::debug!(
            target: "header_table::merge",
            inputs,
            entries = out.len(),
            "Merged header tables"
        );
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Table
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

impl<K, V> Extend<(K, V)> for Table
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.inner.insert(k.into(), v.into());
        }
    }
}

impl IntoIterator for Table {
    type Item = (String, MetadataValue);
    type IntoIter = btree_map::IntoIter<String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a MetadataValue);
    type IntoIter = btree_map::Iter<'a, String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
