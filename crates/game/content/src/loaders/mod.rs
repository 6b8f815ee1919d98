//! Content loaders for reading game data from files.
//!
//! This module converts RON/TOML files into the definitions consumed by
//! [`crate::providers`].

pub mod config;
pub mod factory;
pub mod pools;
pub mod upgrades;
pub mod zones;

pub use config::{ConfigLoader, IdleConfig};
pub use factory::{Content, ContentFactory};
pub use pools::PoolLoader;
pub use upgrades::UpgradeLoader;
pub use zones::ZoneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
