//! CLI runtime configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Configuration for one scripted session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    /// Overrides `starting_zone` from `config.toml`.
    pub zone: Option<String>,
    pub purchases: Vec<String>,
    pub spawns: Vec<(String, u64)>,
    pub despawns: Vec<(String, u64)>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            zone: None,
            purchases: Vec::new(),
            spawns: Vec::new(),
            despawns: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `IDLE_DATA_DIR`: content directory (default `data`)
    /// - `IDLE_ZONE`: zone to enter at start
    /// - `IDLE_PURCHASES`: comma-separated upgrade ids, bought in order
    /// - `IDLE_SPAWNS` / `IDLE_DESPAWNS`: comma-separated `pool:count` pairs
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("IDLE_DATA_DIR") {
            config.data_dir = dir;
        }

        config.zone = read_env::<String>("IDLE_ZONE").filter(|zone| !zone.is_empty());

        if let Some(list) = read_env::<String>("IDLE_PURCHASES") {
            config.purchases = split_list(&list).map(str::to_owned).collect();
        }

        if let Some(list) = read_env::<String>("IDLE_SPAWNS") {
            config.spawns = parse_counts(&list);
        }

        if let Some(list) = read_env::<String>("IDLE_DESPAWNS") {
            config.despawns = parse_counts(&list);
        }

        config
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Parses `pool:count` pairs, skipping malformed entries.
fn parse_counts(list: &str) -> Vec<(String, u64)> {
    split_list(list)
        .filter_map(|entry| {
            let parsed = entry
                .split_once(':')
                .and_then(|(pool, count)| Some((pool.trim().to_owned(), count.trim().parse().ok()?)));
            if parsed.is_none() {
                tracing::warn!(target: "idle_cli", entry, "Ignoring malformed pool:count entry");
            }
            parsed
        })
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
