//! Shared application state.

use catalog::ProductService;
use common::SharedClock;
use projections::ProductQueries;
use store::CatalogStore;

/// The single application object, built once at startup and shared with
/// every handler.
pub struct AppState<S> {
    pub products: ProductService<S>,
    pub queries: ProductQueries<S>,
    /// Name of the storage backend, reported by `/health`.
    pub storage: &'static str,
}

impl<S> AppState<S>
where
    S: CatalogStore + Clone + 'static,
{
    /// Builds the state with one clock shared by commands and queries.
    pub fn new(store: S, clock: SharedClock, storage: &'static str) -> Self {
        Self::with_clocks(store, clock.clone(), clock, storage)
    }

    /// Builds the state with separate write-side and read-side clocks.
    pub fn with_clocks(
        store: S,
        command_clock: SharedClock,
        query_clock: SharedClock,
        storage: &'static str,
    ) -> Self {
        Self {
            products: ProductService::new(store.clone(), command_clock),
            queries: ProductQueries::new(store, query_clock),
            storage,
        }
    }
}
