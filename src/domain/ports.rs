use super::network::Network;
use crate::error::Result;
use async_trait::async_trait;

/// Where settlement networks are loaded from and saved to.
#[async_trait]
pub trait NetworkStore: Send + Sync {
    async fn load(&self) -> Result<Network>;
    async fn save(&self, network: &Network) -> Result<()>;
}

pub type NetworkStoreBox = Box<dyn NetworkStore>;
