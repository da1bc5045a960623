use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Configuration;

/// Port for persisting the configuration model
///
/// Implementations must round-trip every field losslessly, including retainer
/// records that have no stable id yet.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Load the stored configuration, or a default one when nothing is stored
    async fn load(&self) -> Result<Configuration>;

    /// Replace the stored configuration
    async fn save(&self, configuration: &Configuration) -> Result<()>;
}
