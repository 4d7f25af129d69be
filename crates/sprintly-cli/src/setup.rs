//! First-run setup: credentials and default product selection.

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use sprintly_api::{CONFIG_VERSION, Client, ConfigStore, ProductChoice, UserConfig};
use sprintly_core::Product;

/// Prompt for credentials and a default product, validate them against the
/// API, and persist the result.
pub fn run(store: &ConfigStore, existing: Option<&UserConfig>) -> Result<UserConfig> {
    let theme = ColorfulTheme::default();

    let user = prompt_with_default(
        &theme,
        "Sprint.ly username (email)",
        existing.map(|c| c.user.as_str()),
    )?;
    let key = prompt_with_default(
        &theme,
        "Sprint.ly API key",
        existing.map(|c| c.key.as_str()),
    )?;

    let client = Client::new(&user, &key);
    let whoami = client
        .whoami()
        .context("Invalid credentials. Unable to authenticate with Sprint.ly")?;
    if whoami.email != user {
        bail!("Invalid credentials. Please ensure you are using your own API key.");
    }

    let products = client.products().context("Unable to fetch product list")?;
    let product = choose_product(&theme, &products, existing.map(|c| c.product.id))?;

    let config = UserConfig {
        version: CONFIG_VERSION.to_owned(),
        user,
        key,
        id: whoami.id,
        product,
    };
    store
        .store_config(&config)
        .context("Unable to write configuration")?;
    println!("{}", style("Configuration successfully created.").green());
    Ok(config)
}

fn prompt_with_default(
    theme: &ColorfulTheme,
    prompt: &str,
    default: Option<&str>,
) -> Result<String> {
    let mut input = Input::<String>::with_theme(theme).with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_owned());
    }
    input.interact_text().context("Failed to read input")
}

/// Pick the default product: sole product auto-selects, otherwise prompt
/// until one of the listed ids is entered.
fn choose_product(
    theme: &ColorfulTheme,
    products: &[Product],
    current: Option<u64>,
) -> Result<ProductChoice> {
    match products {
        [] => bail!(
            "No products are associated with this Sprint.ly account. Add at least one and try again."
        ),
        [only] => Ok(ProductChoice {
            id: only.id,
            name: only.name.clone(),
        }),
        _ => {
            let listing = products
                .iter()
                .map(|p| format!("{} - {}", p.id, p.name))
                .collect::<Vec<_>>()
                .join(", ");

            loop {
                let mut input = Input::<u64>::with_theme(theme)
                    .with_prompt(format!("Default product id ({listing})"));
                if let Some(current) = current {
                    input = input.default(current);
                }
                let id = input.interact_text().context("Failed to read product id")?;

                if let Some(p) = products.iter().find(|p| p.id == id) {
                    return Ok(ProductChoice {
                        id: p.id,
                        name: p.name.clone(),
                    });
                }
                println!("{}", style("Not one of the listed product ids.").red());
            }
        }
    }
}
