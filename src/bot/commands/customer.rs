//! Customer Discord commands - `menu`, `cart`, `checkout` and `order_status`.
//!
//! Each customer gets their own cart, keyed by Discord user id and kept only in
//! memory until checkout. Cart replies are ephemeral so they don't clutter the channel.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, CheckoutOutcome,
            commands::choices::CategoryChoice,
            embeds::{self, EmbedPlan},
            handlers::autocomplete,
            views,
        },
        core::{menu::Category, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Brand colour for menu and order embeds.
    const EMBED_COLOR: u32 = 0x00DC_2626;
    /// Largest quantity accepted by a single `/cart add`.
    const MAX_ADD_QUANTITY: i64 = 50;

    /// Shows the menu, grouped by category.
    #[poise::command(slash_command)]
    pub async fn menu(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show one section of the menu"] category: Option<CategoryChoice>,
    ) -> Result<()> {
        let only = category.map(Category::from);

        let plan = {
            let service = ctx.data().service.lock().await;
            EmbedPlan::build(views::menu_sections(service.catalog(), only))
        };

        if plan.is_empty() {
            ctx.say("Nothing on the menu here yet.").await?;
            return Ok(());
        }

        let mut reply = poise::CreateReply::default()
            .content(format!("**{} Menu**", ctx.data().restaurant_name));
        for embed in plan.into_embeds(EMBED_COLOR) {
            reply = reply.embed(embed);
        }
        ctx.send(reply).await?;
        Ok(())
    }

    /// Parent command for managing your cart.
    #[poise::command(
        slash_command,
        subcommands("cart_view", "cart_add", "cart_remove")
    )]
    pub async fn cart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Cart commands. Available subcommands:\n\
            `/cart view` - Show your cart\n\
            `/cart add` - Add an item\n\
            `/cart remove` - Remove one of an item";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows your cart with subtotal, tax and total.
    #[poise::command(slash_command, rename = "view")]
    pub async fn cart_view(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let message = {
            let data = ctx.data();
            let service = data.service.lock().await;
            let carts = data.carts.lock().await;

            match carts.get(&ctx.author().id) {
                None => "Your cart is empty. Use `/menu` and `/cart add` to get started!"
                    .to_string(),
                Some(cart) => match service.quote(cart) {
                    Ok(quote) => format!(
                        "**Your Order** (Cart ({}))\n{}\n\nUse `/checkout` to place it.",
                        cart.item_count(),
                        report::format_quote(&quote)
                    ),
                    Err(Error::MenuItemNotFound { id }) => format!(
                        "⚠️ Your cart contains an item that is no longer on the menu ({id}). \
                        Remove it with `/cart remove`."
                    ),
                    Err(e) => return Err(e),
                },
            }
        };

        ctx.send(
            poise::CreateReply::default()
                .content(embeds::truncate(&message, embeds::MAX_CONTENT_CHARS))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Adds an item to your cart.
    #[poise::command(slash_command, rename = "add")]
    pub async fn cart_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Menu item to add"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
        #[description = "How many to add (defaults to 1)"] quantity: Option<i64>,
    ) -> Result<()> {
        let quantity = quantity.unwrap_or(1);
        if !(1..=MAX_ADD_QUANTITY).contains(&quantity) {
            ctx.say(format!(
                "❌ Quantity must be between 1 and {MAX_ADD_QUANTITY}."
            ))
            .await?;
            return Ok(());
        }

        let message = {
            let data = ctx.data();
            let service = data.service.lock().await;
            if let Some(menu_item) = service.catalog().find(&item).cloned() {
                let mut carts = data.carts.lock().await;
                let cart = carts.entry(ctx.author().id).or_default();
                for _ in 0..quantity {
                    service.add_to_cart(cart, &menu_item.id)?;
                }
                format!(
                    "✅ Added {quantity}x {}. You have {} in your cart (Cart ({})).",
                    menu_item.name,
                    cart.quantity(&menu_item.id),
                    cart.item_count()
                )
            } else {
                format!("❌ '{item}' is not on the menu.")
            }
        };

        ctx.send(
            poise::CreateReply::default()
                .content(message)
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Removes one of an item from your cart.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn cart_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Menu item to remove"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
    ) -> Result<()> {
        let message = {
            let data = ctx.data();
            let service = data.service.lock().await;
            let (item_id, name) = service
                .catalog()
                .find(&item)
                .map_or_else(|| (item.clone(), item.clone()), |m| (m.id.clone(), m.name.clone()));

            let mut carts = data.carts.lock().await;
            let user = ctx.author().id;
            match carts.get_mut(&user) {
                Some(cart) if cart.quantity(&item_id) > 0 => {
                    service.remove_from_cart(cart, &item_id);
                    let left = cart.item_count();
                    if cart.is_empty() {
                        carts.remove(&user);
                    }
                    format!("✅ Removed one {name}. Cart ({left}).")
                }
                _ => format!("'{name}' is not in your cart."),
            }
        };

        ctx.send(
            poise::CreateReply::default()
                .content(message)
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Places an order with everything in your cart.
    #[poise::command(slash_command)]
    pub async fn checkout(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let outcome = ctx.data().checkout(ctx.author().id).await?;

        match outcome {
            CheckoutOutcome::Placed(order) => {
                let embed = serenity::CreateEmbed::default()
                    .title(format!("Order #{} received", order.short_id()))
                    .color(EMBED_COLOR)
                    .description(embeds::truncate(
                        &report::format_order(&order),
                        embeds::MAX_DESCRIPTION_CHARS,
                    ))
                    .footer(serenity::CreateEmbedFooter::new(format!(
                        "Order id: {}",
                        order.id
                    )));
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
            }
            CheckoutOutcome::EmptyCart => {
                ctx.say("Your cart is empty. Add some items with `/cart add` first!")
                    .await?;
            }
            CheckoutOutcome::StaleItem(id) => {
                ctx.say(format!(
                    "⚠️ An item in your cart ({id}) is no longer on the menu and was removed. \
                    Check `/cart view` and try again."
                ))
                .await?;
            }
        }
        Ok(())
    }

    /// Shows the current status of an order.
    #[poise::command(slash_command)]
    pub async fn order_status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order id or label (e.g. #1a2b)"]
        #[autocomplete = "autocomplete::autocomplete_active_order"]
        order: String,
    ) -> Result<()> {
        let message = {
            let service = ctx.data().service.lock().await;
            service.find_order(&order).map_or_else(
                || format!("❌ No order matching '{order}'."),
                |found| embeds::truncate(&report::format_order(found), embeds::MAX_CONTENT_CHARS),
            )
        };

        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
