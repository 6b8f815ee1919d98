//! Scripted game events applied against a shared aggregator.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use idle_content::Content;
use idle_core::{ModifierProvider, StatAggregator};
use tracing::info;

use crate::config::CliConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    EnterZone(String),
    Purchase(String),
    Spawn { pool: String, count: u64 },
    Despawn { pool: String, count: u64 },
}

impl Event {
    /// Events described by the environment, in application order:
    /// zone entry, spawns, purchases, then despawns.
    pub fn script(config: &CliConfig, content: &Content) -> Vec<Self> {
        let zone = config
            .zone
            .clone()
            .or_else(|| content.config.starting_zone.clone());

        zone.map(Self::EnterZone)
            .into_iter()
            .chain(config.spawns.iter().map(|(pool, count)| Self::Spawn {
                pool: pool.clone(),
                count: *count,
            }))
            .chain(config.purchases.iter().cloned().map(Self::Purchase))
            .chain(config.despawns.iter().map(|(pool, count)| Self::Despawn {
                pool: pool.clone(),
                count: *count,
            }))
            .collect()
    }
}

/// Owns no state of its own; drives the aggregator and content it is handed.
pub struct Session<'a> {
    stats: &'a mut StatAggregator,
    content: &'a Content,
    zone: Option<Arc<dyn ModifierProvider>>,
}

impl<'a> Session<'a> {
    /// Registers the upgrade tree and every entity pool.
    pub fn new(stats: &'a mut StatAggregator, content: &'a Content) -> Self {
        stats.register_provider(content.upgrades.clone());
        for pool in &content.pools {
            stats.register_provider(pool.clone());
        }
        Self {
            stats,
            content,
            zone: None,
        }
    }

    /// Applies one event, then recalculates every stat.
    pub fn apply(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::EnterZone(id) => self.enter_zone(id)?,
            Event::Purchase(id) => {
                let level = self.content.upgrades.purchase(id)?;
                info!(target: "idle_cli", upgrade = %id, level, "Purchased upgrade");
            }
            Event::Spawn { pool, count } => {
                let total = self.find_pool(pool)?.spawn(*count);
                info!(target: "idle_cli", pool = %pool, total, "Spawned entities");
            }
            Event::Despawn { pool, count } => {
                let total = self.find_pool(pool)?.despawn(*count);
                info!(target: "idle_cli", pool = %pool, total, "Despawned entities");
            }
        }

        self.stats.recalculate_all();
        Ok(())
    }

    pub fn stats(&self) -> &StatAggregator {
        &*self.stats
    }

    fn enter_zone(&mut self, id: &str) -> Result<()> {
        let zone: Arc<dyn ModifierProvider> = self
            .content
            .zone(id)
            .ok_or_else(|| anyhow!("Unknown zone: {}", id))?
            .clone();

        self.leave_zone();
        self.stats.register_provider(Arc::clone(&zone));
        self.zone = Some(zone);
        info!(target: "idle_cli", zone = id, "Entered zone");
        Ok(())
    }

    fn leave_zone(&mut self) {
        if let Some(zone) = self.zone.take() {
            self.stats.unregister_provider(&zone);
            info!(target: "idle_cli", zone = zone.name(), "Left zone");
        }
    }

    fn find_pool(&self, id: &str) -> Result<&Arc<idle_content::EntityPool>> {
        self.content
            .pool(id)
            .ok_or_else(|| anyhow!("Unknown entity pool: {}", id))
    }
}
