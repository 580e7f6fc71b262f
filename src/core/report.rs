//! Report formatting - Menu sections, cart receipts and order tickets.
//!
//! These functions are framework-agnostic and return plain structured data or
//! strings that the bot layer drops into messages and embeds.

use crate::core::{
    menu::{Catalog, Category, MenuItem},
    order::{Order, OrderLine, Quote, TAX_RATE},
};

/// One category of the menu with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection<'a> {
    /// Category of the section
    pub category: Category,
    /// Items in catalog order
    pub items: Vec<&'a MenuItem>,
}

/// Groups the menu into sections in presentation order, skipping empty ones.
#[must_use]
pub fn menu_sections(catalog: &Catalog) -> Vec<MenuSection<'_>> {
    Category::ALL
        .into_iter()
        .map(|category| MenuSection {
            category,
            items: catalog.items_in(category).collect(),
        })
        .filter(|section| !section.items.is_empty())
        .collect()
}

/// Formats a dollar amount rounded to cents, e.g. `$14.01`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Formats one line as `2x Chicken Sandwich - $9.98`.
#[must_use]
pub fn format_line(line: &OrderLine) -> String {
    format!(
        "{}x {} - {}",
        line.quantity,
        line.menu_item.name,
        format_money(line.line_total())
    )
}

/// Multi-line receipt for a cart quote: lines, subtotal, tax and total.
#[must_use]
pub fn format_quote(quote: &Quote) -> String {
    let mut out: Vec<String> = quote.lines.iter().map(format_line).collect();
    out.push(String::new());
    out.push(format!("Subtotal: {}", format_money(quote.totals.subtotal)));
    out.push(format!(
        "Tax ({:.0}%): {}",
        TAX_RATE * 100.0,
        format_money(quote.totals.tax)
    ));
    out.push(format!("**Total: {}**", format_money(quote.totals.total)));
    out.join("\n")
}

/// When an order was placed, e.g. `2024-05-01 12:30 UTC`.
#[must_use]
pub fn format_placed_at(order: &Order) -> String {
    order.created_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Kitchen ticket for an order: label, status, lines and total.
#[must_use]
pub fn format_order(order: &Order) -> String {
    let mut out = vec![format!(
        "**Order #{}** ({}) - {}",
        order.short_id(),
        order.status,
        format_placed_at(order)
    )];
    out.extend(order.items.iter().map(format_line));
    out.push(format!("Total: {}", format_money(order.total)));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::cart::Cart;
    use crate::test_utils::{fixed_time, menu_item, test_menu};

    #[test]
    fn test_menu_sections_order_and_skip_empty() {
        let catalog = Catalog::from_items(vec![
            menu_item("1", "Lemonade", 2.49, Category::Beverage),
            menu_item("2", "Sandwich", 4.99, Category::Main),
            menu_item("3", "Fries", 2.99, Category::Appetizer),
        ])
        .unwrap();

        let sections = menu_sections(&catalog);
        let categories: Vec<Category> = sections.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![Category::Main, Category::Appetizer, Category::Beverage]
        );
        assert_eq!(sections[0].items[0].name, "Sandwich");
        assert_eq!(sections[1].items[0].name, "Fries");
    }

    #[test]
    fn test_format_money_rounds_to_cents() {
        assert_eq!(format_money(1.0376), "$1.04");
        assert_eq!(format_money(14.0076), "$14.01");
        assert_eq!(format_money(0.0), "$0.00");
    }

    #[test]
    fn test_format_quote() {
        let catalog = Catalog::from_items(test_menu()).unwrap();
        let mut cart = Cart::new();
        cart.add("1");
        cart.add("1");
        cart.add("2");
        let quote = Quote::for_cart(&catalog, &cart).unwrap();

        let text = format_quote(&quote);
        assert!(text.contains("2x Chicken Sandwich - $9.98"));
        assert!(text.contains("1x Waffle Fries - $2.99"));
        assert!(text.contains("Subtotal: $12.97"));
        assert!(text.contains("Tax (8%): $1.04"));
        assert!(text.contains("**Total: $14.01**"));
    }

    #[test]
    fn test_format_order() {
        let catalog = Catalog::from_items(test_menu()).unwrap();
        let mut cart = Cart::new();
        cart.add("2");
        let quote = Quote::for_cart(&catalog, &cart).unwrap();
        let order = Order::place("abcd-9f2e".to_string(), quote, fixed_time()).unwrap();

        let text = format_order(&order);
        assert!(text.starts_with("**Order #9f2e** (received) - 2024-05-01 12:30 UTC"));
        assert!(text.contains("1x Waffle Fries - $2.99"));
        assert!(text.ends_with("Total: $3.23"));
        assert_eq!(format_placed_at(&order), "2024-05-01 12:30 UTC");
    }
}
