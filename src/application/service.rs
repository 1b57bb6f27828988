use super::engine::SettlementEngine;
use crate::domain::balance::PartyBalance;
use crate::domain::ports::NetworkStoreBox;
use crate::domain::transfer::SettlementPlan;
use crate::error::Result;

/// Runs settlements against whatever network a [`NetworkStore`] holds.
///
/// [`NetworkStore`]: crate::domain::ports::NetworkStore
pub struct SettlementService {
    store: NetworkStoreBox,
    engine: SettlementEngine,
}

impl SettlementService {
    /// Creates a new `SettlementService`.
    ///
    /// # Arguments
    ///
    /// * `store` - Source of the network to settle.
    /// * `engine` - The configured settlement engine.
    pub fn new(store: NetworkStoreBox, engine: SettlementEngine) -> Self {
        Self { store, engine }
    }

    /// Loads the current network and computes its settlement plan.
    pub async fn settle(&self) -> Result<SettlementPlan> {
        let network = self.store.load().await?;
        self.engine.settle(&network)
    }

    /// Loads the current network and returns each bank's net balance.
    pub async fn balances(&self) -> Result<Vec<PartyBalance>> {
        let network = self.store.load().await?;
        self.engine.balances(&network)
    }
}
