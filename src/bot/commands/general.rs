//! General Discord commands - ping and help.
//! These commands don't touch restaurant state.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = format!(
            "**{} Help**\n\n\
            **Ordering**\n\
            • `/menu [category]` - Shows the menu.\n\
            • `/cart add <item> [quantity]` - Adds an item to your cart.\n\
            • `/cart remove <item>` - Removes one of an item from your cart.\n\
            • `/cart view` - Shows your cart with subtotal, tax and total.\n\
            • `/checkout` - Places your order.\n\
            • `/order_status <order>` - Shows where an order is.\n\n\
            **Staff**\n\
            • `/staff menu_add|menu_update|menu_delete|menu_list` - Edit the menu.\n\
            • `/staff orders` - Lists active orders.\n\
            • `/staff advance <order>` - Moves an order to its next status.\n\n\
            **Utility**\n\
            • `/ping` - Checks if the bot is responsive.\n\
            • `/help` - Shows this help message.",
            ctx.data().restaurant_name
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
