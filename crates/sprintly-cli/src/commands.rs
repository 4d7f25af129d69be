//! CLI command implementations.

use std::io::Write;

use anyhow::{Context, Result};
use sprintly_api::{Cache, Client, ConfigStore, UserConfig};
use sprintly_core::{ListPrinter, Product, Style, build_forest};
use tracing::warn;

use crate::setup;
use crate::term;

/// List the user's items, refreshing the cache first when possible.
pub fn list() -> Result<()> {
    let store = ConfigStore::open_default().context("Failed to open ~/.sprintly")?;
    let config = ensure_config(&store)?;
    let renderer = term::stdout_renderer();

    if let Err(e) = refresh_cache(&store, &config) {
        warn!(error = %e, "cache refresh failed");
        eprintln!(
            "{}",
            renderer.render(
                "Unable to refresh items. List may not be up to date.",
                &[Style::BrightRed],
                true,
            )
        );
    }

    let cache = store.load_cache().context("Failed to read item cache")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ListPrinter::new(&renderer).print(&cache.products, |line| {
        let _ = out.write_all(line.as_bytes());
    });
    out.flush().context("Failed to write list")?;
    Ok(())
}

/// Re-run the credential/product setup flow.
pub fn setup() -> Result<()> {
    let store = ConfigStore::open_default().context("Failed to open ~/.sprintly")?;
    let existing = store.load_config().unwrap_or_default();
    setup::run(&store, existing.as_ref())?;
    Ok(())
}

/// Load the config, walking the user through setup when it is missing or
/// written by an incompatible version.
fn ensure_config(store: &ConfigStore) -> Result<UserConfig> {
    match store.load_config().context("Failed to read config")? {
        Some(config) if config.is_current() => Ok(config),
        Some(stale) => {
            println!("Your configuration needs to be updated. You will now be prompted to update it.");
            setup::run(store, Some(&stale))
        }
        None => setup::run(store, None),
    }
}

/// Fetch the default product's assigned items, assemble the forest, and
/// rewrite the cache.
fn refresh_cache(store: &ConfigStore, config: &UserConfig) -> Result<()> {
    let client = Client::new(&config.user, &config.key);
    let items = client
        .assigned_items(config.product.id, config.id)
        .context("Failed to fetch items")?;

    let product = Product {
        id: config.product.id,
        name: config.product.name.clone(),
        items: build_forest(&items),
    };

    store
        .store_cache(&Cache::new(vec![product]))
        .context("Failed to write item cache")?;
    Ok(())
}
