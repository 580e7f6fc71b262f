//! Embed sections for the customer menu and the staff screens.

use crate::{
    bot::embeds::{Field, Section},
    core::{
        menu::{Catalog, Category},
        report,
        service::RestaurantService,
        storage::Storage,
    },
};

/// One section per non-empty category, optionally limited to `only`.
#[must_use]
pub fn menu_sections(catalog: &Catalog, only: Option<Category>) -> Vec<Section> {
    report::menu_sections(catalog)
        .into_iter()
        .filter(|section| only.is_none_or(|c| c == section.category))
        .map(|section| {
            let fields = section
                .items
                .iter()
                .map(|item| {
                    Field::new(
                        format!("{} - {}", item.name, report::format_money(item.price)),
                        item.description.clone(),
                    )
                })
                .collect();
            Section::new(section.category.heading(), fields)
        })
        .collect()
}

/// Every menu item with its id, in catalog order.
#[must_use]
pub fn menu_list_section(catalog: &Catalog) -> Section {
    let fields = catalog
        .items()
        .iter()
        .map(|item| {
            Field::new(
                format!("{} ({})", item.name, report::format_money(item.price)),
                format!("{} · id `{}`", item.category.heading(), item.id),
            )
        })
        .collect();
    Section::new("Menu Items", fields)
}

/// Active orders oldest first, followed by completed orders newest first.
pub fn order_board<S: Storage>(service: &RestaurantService<S>) -> Vec<Section> {
    let active = service
        .active_orders()
        .map(|order| {
            let lines: Vec<String> = order.items.iter().map(report::format_line).collect();
            Field::new(
                format!("Order #{} · {}", order.short_id(), order.status),
                format!(
                    "Placed {}\n{}\nTotal: {}",
                    report::format_placed_at(order),
                    lines.join("\n"),
                    report::format_money(order.total)
                ),
            )
        })
        .collect();

    let mut completed: Vec<_> = service.completed_orders().collect();
    completed.reverse();
    let completed = completed
        .into_iter()
        .map(|order| {
            Field::new(
                format!("#{} · {}", order.short_id(), report::format_placed_at(order)),
                format!(
                    "{} item(s) · Total: {}",
                    order.item_count(),
                    report::format_money(order.total)
                ),
            )
        })
        .collect();

    vec![
        Section::new("Active Orders", active),
        Section::new("Completed Orders", completed),
    ]
}
