//! Command handling infrastructure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{ProductId, SharedClock};
use domain::{Product, ProductEvent, TrackedProduct, Transition};
use store::{CatalogStore, CommitPlan, Committer, StoreCommitter};

use crate::error::{CatalogError, Result};
use crate::outbox::OutboxRepository;
use crate::repository::ProductRepository;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// The product after the command.
    pub product: Product,

    /// The events that were committed to the outbox.
    pub events: Vec<ProductEvent>,
}

/// Handler for executing commands against products.
///
/// The handler is responsible for:
/// 1. Loading the product through the repository
/// 2. Running exactly one domain transition
/// 3. Building the commit plan (product mutation, then outbox inserts)
/// 4. Handing the plan to the committer
pub struct CommandHandler<S> {
    repository: ProductRepository<S>,
    outbox: OutboxRepository,
    committer: Arc<dyn Committer>,
    clock: SharedClock,
}

impl<S> CommandHandler<S>
where
    S: CatalogStore + Clone + 'static,
{
    /// Creates a handler committing straight to `store`.
    pub fn new(store: S, clock: SharedClock) -> Self {
        let committer = Arc::new(StoreCommitter::new(store.clone()));
        Self::with_committer(store, committer, clock)
    }

    /// Creates a handler with a custom committer.
    pub fn with_committer(store: S, committer: Arc<dyn Committer>, clock: SharedClock) -> Self {
        Self {
            repository: ProductRepository::new(store),
            outbox: OutboxRepository::new(clock.clone()),
            committer,
            clock,
        }
    }
}

impl<S: CatalogStore> CommandHandler<S> {
    pub fn repository(&self) -> &ProductRepository<S> {
        &self.repository
    }

    /// Current time according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Builds the commit plan for a tracked product without committing it.
    ///
    /// The product mutation comes first, followed by one outbox insert per
    /// event in emission order.
    pub fn plan_for(&self, tracked: &TrackedProduct) -> Result<CommitPlan> {
        let mut plan = CommitPlan::new();
        plan.add(self.repository.mutation(tracked)?);
        for event in tracked.events() {
            plan.add(self.outbox.insert_mutation(event)?);
        }
        Ok(plan)
    }

    /// Commits a tracked product and clears its tracked state.
    pub async fn save(&self, tracked: &mut TrackedProduct) -> Result<Vec<ProductEvent>> {
        let plan = self.plan_for(tracked)?;
        self.committer.commit(plan).await?;

        let events = tracked.events().to_vec();
        tracked.mark_persisted();
        Ok(events)
    }

    /// Loads a product, runs one transition on it and commits the outcome.
    ///
    /// The product is loaded before `command` runs, so an unknown id is
    /// reported ahead of any argument the command itself rejects. A
    /// transition that changes nothing commits an empty plan, which never
    /// reaches storage.
    pub async fn execute<F, E>(&self, id: &ProductId, command: F) -> Result<CommandResult>
    where
        F: FnOnce(&Product, DateTime<Utc>) -> std::result::Result<Transition, E>,
        CatalogError: From<E>,
    {
        let mut tracked = self.repository.get(id).await?;
        let now = self.now();
        let transition = command(tracked.product(), now)?;
        tracked.record(transition);

        let events = self.save(&mut tracked).await?;
        Ok(CommandResult {
            product: tracked.product().clone(),
            events,
        })
    }
}
