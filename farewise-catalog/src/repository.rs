use async_trait::async_trait;
use farewise_core::{CoreResult, FareRecord};

use crate::providers::ProviderDirectory;
use crate::store::FixtureStore;

/// Read access to fare data for the listing layer
#[async_trait]
pub trait FareRepository: Send + Sync {
    /// Snapshot of every fare, in catalog order
    async fn list_fares(&self) -> CoreResult<Vec<FareRecord>>;

    async fn get_fare(&self, id: &str) -> CoreResult<Option<FareRecord>>;

    fn provider_directory(&self) -> &ProviderDirectory;
}

#[async_trait]
impl FareRepository for FixtureStore {
    async fn list_fares(&self) -> CoreResult<Vec<FareRecord>> {
        Ok(self.fares().to_vec())
    }

    async fn get_fare(&self, id: &str) -> CoreResult<Option<FareRecord>> {
        Ok(self.get(id).cloned())
    }

    fn provider_directory(&self) -> &ProviderDirectory {
        self.providers()
    }
}
