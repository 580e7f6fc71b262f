//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions show a readable label but submit the underlying id, so commands
//! receive exact menu item and order ids.

use crate::{
    bot::BotData,
    core::report::format_money,
    errors::Error,
};
use poise::serenity_prelude as serenity;

/// Discord caps autocomplete responses at 25 entries.
const MAX_CHOICES: usize = 25;

/// Suggests menu items whose name contains the partial input.
///
/// Each choice is labelled `Name ($price)` and carries the item id as its value.
pub async fn autocomplete_menu_item(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let service = ctx.data().service.lock().await;
    let partial_lower = partial.to_lowercase();

    service
        .catalog()
        .items()
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .map(|item| {
            serenity::AutocompleteChoice::new(
                format!("{} ({})", item.name, format_money(item.price)),
                item.id.clone(),
            )
        })
        .collect()
}

/// Suggests orders that are not completed yet, newest first.
///
/// Each choice is labelled `#abcd - status - $total` and carries the full order id.
pub async fn autocomplete_active_order(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let service = ctx.data().service.lock().await;
    let partial_lower = partial.trim_start_matches('#').to_lowercase();

    let mut orders: Vec<_> = service
        .active_orders()
        .filter(|order| order.id.to_lowercase().contains(&partial_lower))
        .collect();
    orders.reverse();

    orders
        .into_iter()
        .take(MAX_CHOICES)
        .map(|order| {
            serenity::AutocompleteChoice::new(
                format!(
                    "#{} - {} - {}",
                    order.short_id(),
                    order.status,
                    format_money(order.total)
                ),
                order.id.clone(),
            )
        })
        .collect()
}
