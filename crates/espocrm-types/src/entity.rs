//! Response shapes returned by the EspoCRM API
//!
//! The client hands back raw response bodies. These types are for callers
//! that want to decode them.

use serde::{Deserialize, Serialize};

/// Body of a list response (`GET {Entity}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    /// Total number of matching records, ignoring `offset`/`maxSize`
    pub total: i64,
    /// Records in this page
    pub list: Vec<T>,
}

impl<T> ListResult<T> {
    /// Returns true if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of records in this page
    pub fn len(&self) -> usize {
        self.list.len()
    }
}

impl<T> IntoIterator for ListResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}
