//! Data-driven content definitions, providers and loaders.
//!
//! This crate houses the concrete modifier sources an idle game registers with
//! [`idle_core::StatAggregator`], and loaders for the RON/TOML files that
//! describe them:
//! - Upgrade trees (purchasable, levelled bonuses)
//! - Zone effects (active while the player is inside the zone)
//! - Entity pools (bonuses that scale with a live population)
//! - Display configuration (TOML)
//!
//! Providers keep their mutable state in atomics so the same `Arc` handle can be
//! held by the aggregator and by whatever drives game events.

pub mod providers;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use providers::{
    Effect, EntityPool, ModifierSpec, PoolDefinition, UpgradeDefinition, UpgradeError,
    UpgradeTree, ZoneDefinition, ZoneEffect,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, IdleConfig, PoolLoader, UpgradeLoader, ZoneLoader,
};
