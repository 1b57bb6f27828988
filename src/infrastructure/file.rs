use crate::domain::network::Network;
use crate::domain::ports::NetworkStore;
use crate::error::Result;
use crate::interfaces::csv::network_file::{NetworkReader, NetworkWriter};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A network store backed by a `BANKS` / `TRANS` file on disk.
#[derive(Debug, Clone)]
pub struct FileNetworkStore {
    path: PathBuf,
}

impl FileNetworkStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl NetworkStore for FileNetworkStore {
    async fn load(&self) -> Result<Network> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "loading network");
        NetworkReader::new(bytes.as_slice()).read()
    }

    async fn save(&self, network: &Network) -> Result<()> {
        let mut buffer = Vec::new();
        NetworkWriter::new(&mut buffer).write_network(network)?;
        tokio::fs::write(&self.path, buffer).await?;
        debug!(path = %self.path.display(), "network saved");
        Ok(())
    }
}
