// SPDX-License-Identifier: MIT OR Apache-2.0
//! classcue demo driver.
//!
//! Builds a scene from the built-in configuration (or a RON file given as the
//! first argument), triggers each element's first interaction and plays the
//! animations on a frame clock, logging every visual-state change.

use classcue_app::{CueConfig, Result, Scene};
use classcue_sequencer::{Millis, StateChange};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Frame length of the playback loop
const FRAME_MS: Millis = 16;

/// Stop looping animations after this long
const MAX_RUN_MS: Millis = 10_000;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("classcue=info,classcue_app=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting classcue v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        tracing::error!("classcue failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            CueConfig::load(path)?
        }
        None => CueConfig::default(),
    };

    let mut scene = Scene::from_config(&config)?;
    scene.set_journaling(true);
    let triggers: Vec<(String, String)> = scene
        .elements()
        .filter_map(|element| {
            element
                .bound()
                .next()
                .map(|interaction| (element.id().to_string(), interaction.name().to_string()))
        })
        .collect();
    for (id, interaction) in &triggers {
        let report = scene.trigger(id, interaction)?;
        tracing::info!("{} <- {} ({} callbacks)", id, interaction, report.invoked);
    }

    let mut interval = tokio::time::interval(Duration::from_millis(FRAME_MS));
    let mut elapsed: Millis = 0;
    loop {
        interval.tick().await;
        scene.tick(FRAME_MS);
        elapsed += FRAME_MS;
        log_changes(&mut scene, elapsed);

        if scene.is_idle() {
            tracing::info!("All animations finished after {} ms", elapsed);
            break;
        }
        if elapsed >= MAX_RUN_MS {
            tracing::warn!("Stopping after {} ms with animations still playing", elapsed);
            break;
        }
    }
    Ok(())
}

fn log_changes(scene: &mut Scene, elapsed: Millis) {
    for (id, change) in scene.take_changes() {
        match change {
            StateChange::Added(state) => tracing::info!("[{:>5} ms] {} +{}", elapsed, id, state),
            StateChange::Removed(state) => tracing::info!("[{:>5} ms] {} -{}", elapsed, id, state),
            StateChange::Cleared => tracing::info!("[{:>5} ms] {} cleared", elapsed, id),
        }
    }
}
