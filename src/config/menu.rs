//! Restaurant configuration loading from config.toml
//!
//! The `[[menu_items]]` defined in config.toml make up the default menu, used
//! whenever storage has no saved menu (first run, or a discarded payload).
//! Without a config file the built-in menu is used instead.

use crate::{
    core::menu::{Catalog, Category, MenuItem},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Restaurant-wide settings
    #[serde(default)]
    pub restaurant: RestaurantConfig,
    /// Default menu
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
}

/// General restaurant settings
#[derive(Debug, Deserialize, Clone)]
pub struct RestaurantConfig {
    /// Name shown in bot replies
    pub name: String,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            name: "Order Buddy".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restaurant: RestaurantConfig::default(),
            menu_items: builtin_menu(),
        }
    }
}

/// Loads restaurant configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A menu item is invalid or two items share an id
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    parse_config(&contents)
}

/// Parses and validates config.toml contents.
///
/// # Errors
/// Returns `Config` if the TOML is invalid or the menu fails validation.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    Catalog::from_items(config.menu_items.clone()).map_err(|e| Error::Config {
        message: format!("Invalid menu in config.toml: {e}"),
    })?;
    Ok(config)
}

/// Loads ./config.toml, or the built-in defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if !path.exists() {
        info!(
            "{} not found, using the built-in menu.",
            DEFAULT_CONFIG_PATH
        );
        return Ok(Config::default());
    }
    load_config(path)
}

fn item(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: Category,
    image: &str,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        image: image.to_string(),
    }
}

/// The menu served when no config file is present.
#[must_use]
pub fn builtin_menu() -> Vec<MenuItem> {
    vec![
        item(
            "1",
            "Original Chicken Sandwich",
            "Hand-breaded chicken breast, dill pickle chips, toasted bun",
            4.99,
            Category::Main,
            "https://images.unsplash.com/photo-1606755962773-d324e0a13086?auto=format&fit=crop&w=600&q=80",
        ),
        item(
            "2",
            "Waffle Potato Fries",
            "Crispy, wave-cut potatoes cooked in canola oil",
            2.99,
            Category::Appetizer,
            "https://images.unsplash.com/photo-1630384060421-cb20d0e0649d?auto=format&fit=crop&w=600&q=80",
        ),
        item(
            "3",
            "Spicy Chicken Sandwich",
            "Hand-breaded spicy chicken breast, dill pickle chips, toasted bun",
            5.29,
            Category::Main,
            "https://images.unsplash.com/photo-1626082927389-6cd097cdc6ec?auto=format&fit=crop&w=600&q=80",
        ),
        item(
            "4",
            "Fresh Lemonade",
            "Classic or diet lemonade made with real lemon juice",
            2.49,
            Category::Beverage,
            "https://images.unsplash.com/photo-1621263764928-df1444c5e859?auto=format&fit=crop&w=600&q=80",
        ),
        item(
            "5",
            "Chocolate Chunk Cookie",
            "Freshly baked cookie with premium chocolate chunks",
            1.99,
            Category::Dessert,
            "https://images.unsplash.com/photo-1499636136210-6f4ee915583e?auto=format&fit=crop&w=600&q=80",
        ),
    ]
}
