//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `OrderBuddy`: the customer
//! commands (menu, cart, checkout), the staff commands (menu editing, order
//! workflow), autocomplete handlers and the shared bot context.

/// Discord command implementations (customer, staff, general)
pub mod commands;
/// Splitting replies to fit Discord's embed limits
pub mod embeds;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Embed sections for the menu and order board
pub mod views;

use crate::{
    core::{cart::Cart, order::Order, service::RestaurantService, storage::SqliteStorage},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Result of a checkout attempt that the customer needs to hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The order was placed and the cart closed
    Placed(Order),
    /// There was nothing to check out
    EmptyCart,
    /// This item is no longer on the menu and was dropped from the cart
    StaleItem(String),
}

/// Shared data available to all bot commands.
///
/// All events go through the same service lock, so every state transition runs
/// to completion before the next one starts. When both locks are needed, take
/// `service` before `carts`.
pub struct BotData {
    /// Name used in replies
    pub restaurant_name: String,
    /// The restaurant state container
    pub service: Mutex<RestaurantService<SqliteStorage>>,
    /// Open carts, one per customer
    pub carts: Mutex<HashMap<serenity::UserId, Cart>>,
}

impl BotData {
    /// Creates a new `BotData` with no open carts.
    #[must_use]
    pub fn new(restaurant_name: String, service: RestaurantService<SqliteStorage>) -> Self {
        Self {
            restaurant_name,
            service: Mutex::new(service),
            carts: Mutex::new(HashMap::new()),
        }
    }

    /// Drops a deleted menu item from every open cart.
    pub async fn purge_from_carts(&self, item_id: &str) {
        let mut carts = self.carts.lock().await;
        for cart in carts.values_mut() {
            cart.purge(item_id);
        }
        carts.retain(|_, cart| !cart.is_empty());
    }

    /// Places an order from `user`'s cart.
    ///
    /// A cart entry that no longer resolves is purged so the next attempt can
    /// go through; the rest of the cart is kept.
    ///
    /// # Errors
    /// Returns any error other than an empty cart or a stale item.
    pub async fn checkout(&self, user: serenity::UserId) -> Result<CheckoutOutcome> {
        let mut service = self.service.lock().await;
        let mut carts = self.carts.lock().await;
        let Some(cart) = carts.get_mut(&user) else {
            return Ok(CheckoutOutcome::EmptyCart);
        };

        match service.place_order(cart).await {
            Ok(order) => {
                carts.remove(&user);
                Ok(CheckoutOutcome::Placed(order))
            }
            Err(Error::MenuItemNotFound { id }) => {
                cart.purge(&id);
                if cart.is_empty() {
                    carts.remove(&user);
                }
                Ok(CheckoutOutcome::StaleItem(id))
            }
            Err(Error::EmptyCart) => {
                carts.remove(&user);
                Ok(CheckoutOutcome::EmptyCart)
            }
            Err(e) => Err(e),
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework, registers all commands and runs the client until
/// it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or the gateway connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::menu(),
                commands::cart(),
                commands::checkout(),
                commands::order_status(),
                commands::staff(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
