//! GNS3 Provider
//!
//! Applies a YAML manifest of GNS3 nodes against a controller, one resource
//! at a time, and records what it manages in a JSON state file:
//!
//! ```text
//! gns3-provider <manifest.yaml> [state.json]
//! ```
//!
//! The controller is taken from `GNS3_HOST` (default `http://localhost:3080`),
//! an optional per-request timeout from `GNS3_TIMEOUT_SECS`.

use anyhow::{Context, Result, bail};
use gns3_provider::apply::{Applier, Manifest, StateFile};
use gns3_provider::{Provider, ProviderConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_STATE_FILE: &str = "gns3-state.json";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let Some(manifest_path) = args.next().map(PathBuf::from) else {
        bail!("usage: gns3-provider <manifest.yaml> [state.json]");
    };
    let state_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));

    info!("Starting GNS3 Provider");

    let config = ProviderConfig::from_env().context("Failed to load configuration")?;
    info!("Configuration:");
    info!("  GNS3 host: {}", config.host);
    info!("  Manifest: {}", manifest_path.display());
    info!("  State file: {}", state_path.display());

    let raw = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read manifest {}", manifest_path.display()))?;
    let manifest = Manifest::from_yaml(&raw)?;
    let mut state = load_state(&state_path)?;

    let provider = Provider::new(&config)?;
    provider
        .check_connectivity()
        .await
        .with_context(|| format!("GNS3 controller at {} is not reachable", config.host))?;

    let applier = Applier::new(&provider);
    let mut failures = 0;

    for spec in &manifest.resources {
        match applier.apply_resource(spec, &mut state).await {
            Ok(action) => info!("{} ({}): {}", spec.address, spec.kind, action),
            Err(e) => {
                failures += 1;
                if e.is_ambiguous() {
                    error!("{} ({}): {} (remote state unknown, re-run to refresh)", spec.address, spec.kind, e);
                } else {
                    error!("{} ({}): {}", spec.address, spec.kind, e);
                }
            }
        }
        save_state(&state_path, &state)?;
    }

    for address in state.orphans(&manifest) {
        match applier.destroy(&address, &mut state).await {
            Ok(action) => info!("{}: {}", address, action),
            Err(e) => {
                failures += 1;
                error!("{}: {}", address, e);
            }
        }
        save_state(&state_path, &state)?;
    }

    if failures > 0 {
        bail!("{} resource(s) failed to apply", failures);
    }
    info!("Apply complete: {} resource(s) tracked", state.resources.len());
    Ok(())
}

fn load_state(path: &Path) -> Result<StateFile> {
    if !path.exists() {
        return Ok(StateFile::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    Ok(StateFile::from_json(&raw)?)
}

fn save_state(path: &Path, state: &StateFile) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("Failed to encode state")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
