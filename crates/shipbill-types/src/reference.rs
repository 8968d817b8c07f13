//! References that arrive either as a bare id or as a populated object
//!
//! Backend DTOs carry fields such as `carrierId` that are sometimes the id
//! string and sometimes the whole carrier record. `Reference<T>` captures both
//! shapes so the loading layer can normalize them once.

use serde::{Deserialize, Serialize};

use crate::SnapshotError;

/// Anything addressable by a string id
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(String),
    Resolved(T),
}

impl<T: Identified> Reference<T> {
    /// The referenced id, whichever shape the reference came in
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Resolved(value) => value.id(),
        }
    }

    pub fn into_id(self) -> String {
        match self {
            Reference::Id(id) => id,
            Reference::Resolved(value) => value.id().to_string(),
        }
    }

    /// Produce the concrete value, looking ids up through `lookup`
    pub fn resolve<F>(self, kind: &'static str, lookup: F) -> Result<T, SnapshotError>
    where
        F: FnOnce(&str) -> Option<T>,
    {
        match self {
            Reference::Resolved(value) => Ok(value),
            Reference::Id(id) => lookup(&id).ok_or(SnapshotError::UnresolvedReference { kind, id }),
        }
    }
}

impl<T> From<&str> for Reference<T> {
    fn from(id: &str) -> Self {
        Reference::Id(id.to_string())
    }
}
