//! Scripted idle-game session: loads content, applies events, prints stat breakdowns.
mod config;
mod session;

use anyhow::Result;
use config::CliConfig;
use idle_content::ContentFactory;
use idle_core::{FormatConfig, StatAggregator, StatBreakdown, StatKey};
use session::{Event, Session};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    let content = ContentFactory::new(config.data_dir.clone()).load_content()?;
    info!(
        target: "idle_cli",
        data_dir = %config.data_dir.display(),
        upgrades = content.upgrades.len(),
        zones = content.zones.len(),
        pools = content.pools.len(),
        "Content loaded"
    );

    let mut stats = StatAggregator::new();
    let mut session = Session::new(&mut stats, &content);

    for event in Event::script(&config, &content) {
        if let Err(e) = session.apply(&event) {
            warn!(target: "idle_cli", ?event, error = %e, "Event rejected");
        }
    }

    print_breakdowns(session.stats(), &content.config.format);
    Ok(())
}

fn print_breakdowns(stats: &StatAggregator, format: &FormatConfig) {
    for stat in StatKey::all() {
        print_breakdown(&stats.breakdown(stat), format);
    }
}

fn print_breakdown(breakdown: &StatBreakdown, format: &FormatConfig) {
    let name: &str = breakdown.stat.as_ref();
    let sources: Vec<&str> = breakdown.sources().collect();
    println!(
        "{:<20} {:>10}  = ({} + {}) x {:.2}  [{}]",
        name,
        breakdown.final_value.format_with(format, None),
        breakdown.base.format_with(format, None),
        breakdown.additive_total.format_with(format, None),
        breakdown.multiplier(),
        sources.join(", "),
    );
    for provider in &breakdown.failed_providers {
        println!("{:<20} (missing contribution from {provider})", "");
    }
}
