//! Unified error types for `OrderBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`], so errors from the
//! core, the storage layer and the Discord layer can be propagated with `?`.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description of the problem
        message: String,
    },

    /// Error raised by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A persisted payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A menu price is negative, NaN or infinite
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// Menu item fields failed validation (empty name, duplicate id, ...)
    #[error("Invalid menu item: {message}")]
    InvalidMenuItem {
        /// What was wrong with the item
        message: String,
    },

    /// A saved order is malformed (empty id, zero quantity, duplicate id)
    #[error("Invalid order: {message}")]
    InvalidOrder {
        /// What was wrong with the order
        message: String,
    },

    /// No menu item with this id exists in the catalog
    #[error("Menu item not found: {id}")]
    MenuItemNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// No order with this id exists
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// Checkout was attempted with nothing in the cart
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,

    /// I/O failure, e.g. while reading `config.toml`
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Error from the Discord framework
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
