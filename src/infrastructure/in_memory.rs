use crate::domain::network::Network;
use crate::domain::ports::NetworkStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory network store.
///
/// Clones share the same underlying network; every `load` hands out an
/// independent copy, so concurrent settlement runs never share balances.
#[derive(Default, Clone)]
pub struct InMemoryNetworkStore {
    network: Arc<RwLock<Network>>,
}

impl InMemoryNetworkStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(network: Network) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
        }
    }
}

#[async_trait]
impl NetworkStore for InMemoryNetworkStore {
    async fn load(&self) -> Result<Network> {
        let network = self.network.read().await;
        Ok(network.clone())
    }

    async fn save(&self, network: &Network) -> Result<()> {
        let mut stored = self.network.write().await;
        *stored = network.clone();
        Ok(())
    }
}
