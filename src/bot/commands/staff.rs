//! Staff Discord commands - menu management and the order workflow.
//!
//! `/staff` groups the admin view: adding, editing and deleting menu items, and
//! moving orders through `received -> preparing -> ready -> completed`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, commands::choices::CategoryChoice, embeds::EmbedPlan,
            handlers::autocomplete, views,
        },
        core::{menu::MenuItemDraft, order::OrderStatus, report},
        errors::{Error, Result},
    };

    /// Colour for staff embeds.
    const EMBED_COLOR: u32 = 0x0025_63EB;

    /// Parent command for staff tools.
    #[poise::command(
        slash_command,
        subcommands(
            "staff_menu_add",
            "staff_menu_update",
            "staff_menu_delete",
            "staff_menu_list",
            "staff_orders",
            "staff_advance"
        )
    )]
    pub async fn staff(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Staff commands. Available subcommands:\n\
            `/staff menu_add` - Add a menu item\n\
            `/staff menu_update` - Edit a menu item\n\
            `/staff menu_delete` - Delete a menu item\n\
            `/staff menu_list` - List menu items with their ids\n\
            `/staff orders` - List active and completed orders\n\
            `/staff advance` - Move an order to its next status";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new item to the menu.
    #[poise::command(slash_command, rename = "menu_add")]
    pub async fn staff_menu_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the item (e.g., 'Spicy Chicken Sandwich')"] name: String,
        #[description = "Unit price (e.g., 5.29)"] price: f64,
        #[description = "Menu section"] category: CategoryChoice,
        #[description = "Short description"] description: Option<String>,
        #[description = "Image URL"] image: Option<String>,
    ) -> Result<()> {
        let draft = MenuItemDraft {
            name,
            description: description.unwrap_or_default(),
            price,
            category: category.into(),
            image: image.unwrap_or_default(),
        };

        let result = {
            let mut service = ctx.data().service.lock().await;
            service.add_menu_item(draft).await
        };

        match result {
            Ok(item) => {
                ctx.say(format!(
                    "✅ Added '{}' at **{}** to {} (id `{}`).",
                    item.name,
                    report::format_money(item.price),
                    item.category.heading(),
                    item.id
                ))
                .await?;
            }
            Err(e @ (Error::InvalidPrice { .. } | Error::InvalidMenuItem { .. })) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Edits an existing menu item. Placed orders keep the old details.
    #[poise::command(slash_command, rename = "menu_update")]
    pub async fn staff_menu_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Menu item to edit"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
        #[description = "New name"] name: Option<String>,
        #[description = "New unit price"] price: Option<f64>,
        #[description = "New menu section"] category: Option<CategoryChoice>,
        #[description = "New description"] description: Option<String>,
        #[description = "New image URL"] image: Option<String>,
    ) -> Result<()> {
        let message = {
            let mut service = ctx.data().service.lock().await;
            let Some(mut updated) = service.catalog().find(&item).cloned() else {
                return Err(Error::MenuItemNotFound { id: item });
            };

            if let Some(name) = name {
                updated.name = name.trim().to_string();
            }
            if let Some(price) = price {
                updated.price = price;
            }
            if let Some(category) = category {
                updated.category = category.into();
            }
            if let Some(description) = description {
                updated.description = description.trim().to_string();
            }
            if let Some(image) = image {
                updated.image = image.trim().to_string();
            }

            match service.update_menu_item(updated.clone()).await {
                Ok(()) => format!(
                    "✅ Updated '{}': **{}**, {}.",
                    updated.name,
                    report::format_money(updated.price),
                    updated.category.heading()
                ),
                Err(e @ (Error::InvalidPrice { .. } | Error::InvalidMenuItem { .. })) => {
                    format!("❌ {e}")
                }
                Err(e) => return Err(e),
            }
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Deletes a menu item. It is also dropped from any open carts.
    #[poise::command(slash_command, rename = "menu_delete")]
    pub async fn staff_menu_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Menu item to delete"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
    ) -> Result<()> {
        let data = ctx.data();
        let removed = {
            let mut service = data.service.lock().await;
            let Some(id) = service.catalog().find(&item).map(|m| m.id.clone()) else {
                return Err(Error::MenuItemNotFound { id: item });
            };
            let removed = service.delete_menu_item(&id).await?;
            data.purge_from_carts(&removed.id).await;
            removed
        };

        ctx.say(format!("✅ '{}' has been removed from the menu.", removed.name))
            .await?;
        Ok(())
    }

    /// Lists all menu items with their ids.
    #[poise::command(slash_command, rename = "menu_list")]
    pub async fn staff_menu_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let plan = {
            let service = ctx.data().service.lock().await;
            EmbedPlan::build(vec![views::menu_list_section(service.catalog())])
        };

        if plan.is_empty() {
            ctx.say("The menu is empty. Use `/staff menu_add` to create some items!")
                .await?;
            return Ok(());
        }

        send_embeds(ctx, plan).await
    }

    /// Lists active orders, oldest first, then completed orders, newest first.
    #[poise::command(slash_command, rename = "orders")]
    pub async fn staff_orders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let plan = {
            let service = ctx.data().service.lock().await;
            EmbedPlan::build(views::order_board(&*service))
        };

        if plan.is_empty() {
            ctx.say("No orders yet.").await?;
            return Ok(());
        }

        send_embeds(ctx, plan).await
    }

    async fn send_embeds(ctx: poise::Context<'_, BotData, Error>, plan: EmbedPlan) -> Result<()> {
        let mut reply = poise::CreateReply::default();
        for embed in plan.into_embeds(EMBED_COLOR) {
            reply = reply.embed(embed);
        }
        ctx.send(reply).await?;
        Ok(())
    }

    /// Moves an order to its next status.
    #[poise::command(slash_command, rename = "advance")]
    pub async fn staff_advance(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order id or label (e.g. #1a2b)"]
        #[autocomplete = "autocomplete::autocomplete_active_order"]
        order: String,
    ) -> Result<()> {
        let message = {
            let mut service = ctx.data().service.lock().await;
            let Some((order_id, label, before)) = service
                .find_order(&order)
                .map(|o| (o.id.clone(), o.short_id().to_string(), o.status))
            else {
                return Err(Error::OrderNotFound { id: order });
            };

            let after = service.advance_order(&order_id).await?;
            if before == OrderStatus::Completed {
                format!("Order #{label} is already completed.")
            } else {
                format!("✅ Order #{label}: {before} → **{after}**")
            }
        };

        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
