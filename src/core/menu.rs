//! Menu catalog business logic - Handles menu items and catalog edits.
//!
//! The catalog is a plain ordered list of [`MenuItem`]s owned by the restaurant
//! service. Staff edits go through [`Catalog::add`], [`Catalog::update`] and
//! [`Catalog::remove`], all of which validate their input before touching the list.
//! Placed orders keep their own snapshot of each item, so nothing here needs to
//! know about orders.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

/// Menu section an item is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Main dishes
    Main,
    /// Starters and sides
    Appetizer,
    /// Sweets
    Dessert,
    /// Drinks
    Beverage,
}

impl Category {
    /// All categories, in the order the menu is presented.
    pub const ALL: [Self; 4] = [Self::Main, Self::Appetizer, Self::Dessert, Self::Beverage];

    /// Wire name, as stored in persisted payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Appetizer => "appetizer",
            Self::Main => "main",
            Self::Dessert => "dessert",
            Self::Beverage => "beverage",
        }
    }

    /// Section heading shown to customers.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Appetizer => "Appetizers",
            Self::Main => "Entrées",
            Self::Dessert => "Desserts",
            Self::Beverage => "Beverages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidMenuItem {
                message: format!("Unknown category '{s}'"),
            })
    }
}

/// A dish or drink on the menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique opaque identifier
    pub id: String,
    /// Display name (e.g. "Waffle Potato Fries")
    pub name: String,
    /// Short description shown under the name
    pub description: String,
    /// Unit price in dollars
    pub price: f64,
    /// Menu section
    pub category: Category,
    /// Image URL
    pub image: String,
}

impl MenuItem {
    /// Checks the item's own fields.
    ///
    /// # Errors
    /// Returns `InvalidMenuItem` for an empty id or name and `InvalidPrice` for a
    /// negative or non-finite price.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidMenuItem {
                message: "Menu item id cannot be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidMenuItem {
                message: "Menu item name cannot be empty".to_string(),
            });
        }
        validate_price(self.price)
    }
}

/// Staff input for a new menu item; the id is assigned on insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItemDraft {
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Unit price in dollars
    pub price: f64,
    /// Menu section
    pub category: Category,
    /// Image URL
    pub image: String,
}

impl MenuItemDraft {
    /// Turns the draft into a catalog item with the given id, trimming the name.
    #[must_use]
    pub fn into_item(self, id: String) -> MenuItem {
        MenuItem {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            category: self.category,
            image: self.image.trim().to_string(),
        }
    }
}

/// Rejects negative, NaN and infinite prices.
///
/// # Errors
/// Returns `InvalidPrice` carrying the offending value.
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidPrice { price });
    }
    Ok(())
}

/// The editable list of menu items, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a catalog from existing items, validating each one and the
    /// uniqueness of their ids.
    ///
    /// # Errors
    /// Returns the first validation failure found.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(Error::InvalidMenuItem {
                    message: format!("Duplicate menu item id '{}'", item.id),
                });
            }
        }
        Ok(Self { items })
    }

    /// All items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Number of items on the menu.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks an item up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Looks an item up by id, falling back to a case-insensitive name match.
    #[must_use]
    pub fn find(&self, id_or_name: &str) -> Option<&MenuItem> {
        let query = id_or_name.trim();
        self.get(query).or_else(|| {
            self.items
                .iter()
                .find(|item| item.name.eq_ignore_ascii_case(query))
        })
    }

    /// Items of one category, in catalog order.
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Appends a new item.
    ///
    /// # Errors
    /// Returns a validation error, or `InvalidMenuItem` if the id is already taken.
    pub fn add(&mut self, item: MenuItem) -> Result<()> {
        item.validate()?;
        if self.get(&item.id).is_some() {
            return Err(Error::InvalidMenuItem {
                message: format!("Duplicate menu item id '{}'", item.id),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Replaces the item with the same id, keeping its position.
    ///
    /// The catalog is left unchanged when no item has that id.
    ///
    /// # Errors
    /// Returns a validation error, or `MenuItemNotFound` if the id is absent.
    pub fn update(&mut self, item: MenuItem) -> Result<()> {
        item.validate()?;
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or_else(|| Error::MenuItemNotFound {
                id: item.id.clone(),
            })?;
        *slot = item;
        Ok(())
    }

    /// Removes the item with this id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<MenuItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Consumes the catalog, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<MenuItem> {
        self.items
    }
}
