//! The single component that applies commit plans to storage.

use async_trait::async_trait;

use crate::{CatalogStore, CommitPlan, Result};

/// Applies a commit plan as one atomic unit.
#[async_trait]
pub trait Committer: Send + Sync {
    /// Commits every mutation in `plan` or none of them. An empty plan
    /// succeeds without touching storage.
    async fn commit(&self, plan: CommitPlan) -> Result<()>;
}

/// Committer backed by a [`CatalogStore`].
#[derive(Clone)]
pub struct StoreCommitter<S> {
    store: S,
}

impl<S: CatalogStore> StoreCommitter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: CatalogStore> Committer for StoreCommitter<S> {
    #[tracing::instrument(skip(self, plan), fields(mutations = plan.count()))]
    async fn commit(&self, plan: CommitPlan) -> Result<()> {
        if plan.is_empty() {
            tracing::debug!("empty commit plan, nothing to apply");
            return Ok(());
        }

        let outbox_events = plan.outbox_count() as u64;
        if let Err(err) = self.store.apply(plan.into_mutations()).await {
            tracing::warn!(error = %err, "commit failed");
            metrics::counter!("catalog_commit_failures_total").increment(1);
            return Err(err);
        }

        metrics::counter!("catalog_commits_total").increment(1);
        metrics::counter!("catalog_outbox_events_total").increment(outbox_events);
        tracing::debug!(outbox_events, "commit applied");
        Ok(())
    }
}
