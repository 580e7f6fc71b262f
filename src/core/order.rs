//! Order business logic - Pricing, placement snapshots and the status workflow.
//!
//! An [`Order`] is created from a priced [`Quote`] of a cart and is immutable
//! afterwards except for its [`OrderStatus`], which only ever moves forward:
//! `received -> preparing -> ready -> completed`.

use crate::{
    core::{cart::Cart, menu::Catalog, menu::MenuItem},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sales tax applied to every order subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Kitchen progress of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the customer, not yet started
    #[serde(alias = "pending")]
    Received,
    /// Being cooked
    Preparing,
    /// Waiting at the counter
    Ready,
    /// Picked up; terminal
    Completed,
}

impl OrderStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 4] = [
        Self::Received,
        Self::Preparing,
        Self::Ready,
        Self::Completed,
    ];

    /// The status that follows this one. `Completed` maps to itself.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Received => Self::Preparing,
            Self::Preparing => Self::Ready,
            Self::Ready | Self::Completed => Self::Completed,
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order: a frozen copy of the menu item and its quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Menu item as it was when the order was placed
    pub menu_item: MenuItem,
    /// Ordered quantity, at least 1
    pub quantity: u32,
}

impl OrderLine {
    /// Price of the line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.menu_item.price * f64::from(self.quantity)
    }
}

/// Subtotal, tax and total for a set of lines.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    /// Sum of line totals
    pub subtotal: f64,
    /// `subtotal * TAX_RATE`
    pub tax: f64,
    /// `subtotal + tax`
    pub total: f64,
}

impl Totals {
    /// Computes the totals for `lines`.
    #[must_use]
    pub fn from_lines(lines: &[OrderLine]) -> Self {
        let subtotal: f64 = lines.iter().map(OrderLine::line_total).sum();
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// A cart resolved against the catalog and priced, without side effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Quote {
    /// Resolved lines in cart order
    pub lines: Vec<OrderLine>,
    /// Prices for those lines
    pub totals: Totals,
}

impl Quote {
    /// Resolves every cart entry against `catalog` and prices the result.
    ///
    /// # Errors
    /// Returns `MenuItemNotFound` for the first cart entry whose id is no
    /// longer on the menu.
    pub fn for_cart(catalog: &Catalog, cart: &Cart) -> Result<Self> {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                catalog
                    .get(&line.item_id)
                    .map(|item| OrderLine {
                        menu_item: item.clone(),
                        quantity: line.quantity,
                    })
                    .ok_or_else(|| Error::MenuItemNotFound {
                        id: line.item_id.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let totals = Totals::from_lines(&lines);
        Ok(Self { lines, totals })
    }

    /// Whether the quote has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A placed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier assigned at placement
    pub id: String,
    /// Ordered lines, in cart order
    pub items: Vec<OrderLine>,
    /// Current workflow status
    pub status: OrderStatus,
    /// When the order was placed (epoch milliseconds on the wire)
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Subtotal plus tax, fixed at placement
    pub total: f64,
}

impl Order {
    /// Creates a `received` order from a quote.
    ///
    /// # Errors
    /// Returns `EmptyCart` when the quote has no lines.
    pub fn place(id: String, quote: Quote, created_at: DateTime<Utc>) -> Result<Self> {
        if quote.is_empty() {
            return Err(Error::EmptyCart);
        }
        Ok(Self {
            id,
            items: quote.lines,
            status: OrderStatus::Received,
            created_at,
            total: quote.totals.total,
        })
    }

    /// Moves the order one step forward and returns the new status.
    /// A completed order stays completed.
    pub fn advance(&mut self) -> OrderStatus {
        self.status = self.status.next();
        self.status
    }

    /// Subtotal recomputed from the stored snapshots.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(OrderLine::line_total).sum()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count: u32, line| count.saturating_add(line.quantity))
    }

    /// Last four characters of the id, used as the customer-facing label.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(index, _)| index);
        &self.id[start..]
    }

    /// Checks the invariants a stored order must satisfy.
    ///
    /// # Errors
    /// Returns `InvalidOrder`, `InvalidMenuItem` or `InvalidPrice` describing the
    /// first violation.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidOrder {
                message: "Order id cannot be empty".to_string(),
            });
        }
        if self.items.is_empty() {
            return Err(Error::InvalidOrder {
                message: format!("Order {} has no items", self.id),
            });
        }
        for line in &self.items {
            line.menu_item.validate()?;
            if line.quantity == 0 {
                return Err(Error::InvalidOrder {
                    message: format!("Order {} has a line with quantity 0", self.id),
                });
            }
        }
        crate::core::menu::validate_price(self.total)
    }
}
