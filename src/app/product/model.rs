//! Product data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `products` table.
///
/// Serializes to the wire shape returned by GET and PATCH:
/// `{id, header, description, creation_date, owner}` with `creation_date`
/// as an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub header: String,
    pub description: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub owner: String,
}

/// Fields supplied by the client when creating a product. The id and
/// creation date are assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub header: String,
    pub description: String,
    pub owner: String,
}

/// The fields explicitly present in an update payload. `None` means the
/// field was absent and must be left untouched. `description` can also be
/// set to `Some(None)`, which clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub header: Option<String>,
    pub description: Option<Option<String>>,
    pub owner: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.description.is_none() && self.owner.is_none()
    }
}

impl Product {
    pub fn apply_changes(&mut self, changes: ProductChanges) {
        if let Some(header) = changes.header {
            self.header = header;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(owner) = changes.owner {
            self.owner = owner;
        }
    }
}
