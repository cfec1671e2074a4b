//! Ordered batch of mutations committed as one unit.

use crate::Mutation;

/// An ordered list of mutations to apply atomically.
///
/// `add` accepts `Option<Mutation>` so callers can pass "no change" results
/// straight through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitPlan {
    mutations: Vec<Mutation>,
}

impl CommitPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mutation; `None` is ignored.
    pub fn add(&mut self, mutation: impl Into<Option<Mutation>>) -> &mut Self {
        if let Some(mutation) = mutation.into() {
            self.mutations.push(mutation);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn count(&self) -> usize {
        self.mutations.len()
    }

    /// Number of outbox inserts in the plan.
    pub fn outbox_count(&self) -> usize {
        self.mutations
            .iter()
            .filter(|m| matches!(m, Mutation::InsertOutboxEvent(_)))
            .count()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn into_mutations(self) -> Vec<Mutation> {
        self.mutations
    }
}
