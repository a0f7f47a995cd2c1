//! Person Record

use serde::{Deserialize, Serialize};

/// A structured `name,age,city` record
///
/// Records are never patched in place; build a new one instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub age: u32,
    pub city: String,
}

impl Record {
    /// Create a record from its three fields
    pub fn new(name: impl Into<String>, age: u32, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            city: city.into(),
        }
    }
}
