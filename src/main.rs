//! # Hero Service Tour
//!
//! Runs every [`HeroService`](hero_service::clients::HeroService) operation once
//! and prints the resulting message log.
//!
//! Without configuration the tour runs against the seeded in-memory backend.
//! Point `HERO_SERVICE_CONFIG` at a TOML file (see [`hero_service::config`]) to
//! target a real server instead.

use hero_service::config::{load_config, ServiceConfig};
use hero_service::lifecycle::{setup_tracing, HeroSystem};
use hero_service::model::HeroCreate;
use std::path::PathBuf;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::var_os("HERO_SERVICE_CONFIG") {
        Some(path) => load_config(&PathBuf::from(path)).map_err(|e| e.to_string())?,
        None => ServiceConfig::default(),
    };

    info!("Starting hero tour");
    let system = HeroSystem::from_config(&config);
    let heroes = &system.hero_service;

    let span = tracing::info_span!("dashboard");
    async {
        let all = heroes.get_heroes().await;
        info!(count = all.len(), "Heroes loaded");

        if let Some(first) = all.first() {
            if let Some(mut hero) = heroes.get_hero(first.id).await {
                hero.name = format!("{} the Brave", hero.name);
                heroes.update_hero(&hero).await;
            }
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("roster_changes");
    async {
        if let Some(nova) = heroes.add_hero(HeroCreate::new("Nova")).await {
            info!(id = nova.id, "Hero added");
            let matches = heroes.search_heroes("nov").await;
            info!(found = matches.len(), "Search finished");
            heroes.delete_hero(&nova).await;
        }
        // blank terms never reach the backend
        heroes.search_heroes("   ").await;
        heroes.get_hero(999).await;
    }
    .instrument(span)
    .await;

    for message in system.messages.messages() {
        info!("{}", message);
    }

    system.shutdown().await?;
    info!("Tour completed");
    Ok(())
}
