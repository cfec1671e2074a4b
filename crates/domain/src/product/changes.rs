//! Dirty-field bookkeeping for partial persistence.

use std::collections::BTreeSet;

/// Product fields that can be persisted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Description,
    Category,
    BasePrice,
    Discount,
    Status,
    ArchivedAt,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Category => "category",
            Field::BasePrice => "base_price",
            Field::Discount => "discount",
            Field::Status => "status",
            Field::ArchivedAt => "archived_at",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Set of fields modified since the aggregate was loaded or created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    dirty: BTreeSet<Field>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `field` as modified. Idempotent.
    pub fn mark_dirty(&mut self, field: Field) {
        self.dirty.insert(field);
    }

    pub fn is_dirty(&self, field: Field) -> bool {
        self.dirty.contains(&field)
    }

    pub fn has_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the dirty fields in declaration order.
    pub fn dirty_fields(&self) -> Vec<Field> {
        self.dirty.iter().copied().collect()
    }

    pub fn reset(&mut self) {
        self.dirty.clear();
    }

    /// Folds another tracker's fields into this one.
    pub fn merge(&mut self, other: &ChangeTracker) {
        self.dirty.extend(other.dirty.iter().copied());
    }
}

impl FromIterator<Field> for ChangeTracker {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            dirty: iter.into_iter().collect(),
        }
    }
}
