//! Content factory for building providers from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::loaders::{
    ConfigLoader, IdleConfig, LoadResult, PoolLoader, UpgradeLoader, ZoneLoader,
};
use crate::providers::{
    EntityPool, PoolDefinition, UpgradeDefinition, UpgradeTree, ZoneDefinition, ZoneEffect,
};

/// Name under which the loaded upgrade tree registers with the aggregator.
pub const UPGRADE_TREE_NAME: &str = "upgrades";

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── upgrades.ron
/// ├── zones.ron
/// └── pools.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Everything loaded from a data directory, ready to register.
pub struct Content {
    pub config: IdleConfig,
    pub upgrades: Arc<UpgradeTree>,
    pub zones: Vec<Arc<ZoneEffect>>,
    pub pools: Vec<Arc<EntityPool>>,
}

impl Content {
    pub fn zone(&self, id: &str) -> Option<&Arc<ZoneEffect>> {
        self.zones.iter().find(|zone| zone.id() == id)
    }

    pub fn pool(&self, id: &str) -> Option<&Arc<EntityPool>> {
        self.pools.iter().find(|pool| pool.id() == id)
    }
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<IdleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load upgrade catalog from `upgrades.ron`.
    pub fn load_upgrades(&self) -> LoadResult<Vec<UpgradeDefinition>> {
        let path = self.data_dir.join("upgrades.ron");
        UpgradeLoader::load(&path)
    }

    /// Load zone catalog from `zones.ron`.
    pub fn load_zones(&self) -> LoadResult<Vec<ZoneDefinition>> {
        let path = self.data_dir.join("zones.ron");
        ZoneLoader::load(&path)
    }

    /// Load entity pool catalog from `pools.ron`.
    pub fn load_pools(&self) -> LoadResult<Vec<PoolDefinition>> {
        let path = self.data_dir.join("pools.ron");
        PoolLoader::load(&path)
    }

    /// Load every file and build the providers.
    ///
    /// Upgrades start at level zero and pools empty; nothing is registered.
    pub fn load_content(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let upgrades = UpgradeTree::new(UPGRADE_TREE_NAME, self.load_upgrades()?)
            .map_err(|e| anyhow::anyhow!("Invalid upgrade catalog: {}", e))?;
        let zones = self
            .load_zones()?
            .into_iter()
            .map(|definition| Arc::new(ZoneEffect::new(definition)))
            .collect();
        let pools = self
            .load_pools()?
            .into_iter()
            .map(|definition| Arc::new(EntityPool::new(definition)))
            .collect();

        Ok(Content {
            config,
            upgrades: Arc::new(upgrades),
            zones,
            pools,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
