use std::sync::Arc;

use brewtab_auth::{AccountSource, Gate, TokenService};
use brewtab_ledger::LedgerAggregator;
use brewtab_store::MemoryStore;

/// Aggregator wired to the in-memory collaborators.
pub type AppAggregator = LedgerAggregator<Arc<MemoryStore>, Arc<MemoryStore>, Arc<MemoryStore>>;

/// Gate wired to the token and account collaborators.
pub type AppGate = Gate<Arc<dyn TokenService>, Arc<dyn AccountSource>>;

/// Shared service wiring for the HTTP layer.
///
/// One store backs every collaborator contract; the aggregator reads
/// through it per request (derived views are never cached).
#[derive(Clone)]
pub struct AppServices {
    store: Arc<MemoryStore>,
    aggregator: Arc<AppAggregator>,
}

impl AppServices {
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn aggregator(&self) -> &AppAggregator {
        &self.aggregator
    }

    pub fn token_service(&self) -> Arc<dyn TokenService> {
        Arc::clone(&self.store) as Arc<dyn TokenService>
    }

    pub fn account_source(&self) -> Arc<dyn AccountSource> {
        Arc::clone(&self.store) as Arc<dyn AccountSource>
    }
}

pub fn build_services() -> AppServices {
    let store = Arc::new(MemoryStore::new());

    let aggregator = Arc::new(LedgerAggregator::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
    ));

    AppServices { store, aggregator }
}
