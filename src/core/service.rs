//! Restaurant service - Owns the menu and order collections.
//!
//! [`RestaurantService`] is the single state container behind both the customer
//! and the staff flows. It is created from a [`Storage`] (init-on-load), changes
//! state only through the operations below, and mirrors both collections back to
//! storage after every change. Carts are per-session values owned by the caller
//! and passed in by reference; they are never persisted.

use crate::{
    core::{
        cart::Cart,
        menu::{Catalog, MenuItem, MenuItemDraft},
        order::{Order, OrderStatus, Quote},
        sources::{Clock, IdGenerator, SystemClock, UuidGenerator},
        storage::Storage,
    },
    errors::{Error, Result},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// State-owning service for the menu, orders and checkout.
pub struct RestaurantService<S> {
    catalog: Catalog,
    orders: Vec<Order>,
    storage: S,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<S> std::fmt::Debug for RestaurantService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestaurantService")
            .field("menu_items", &self.catalog.len())
            .field("orders", &self.orders.len())
            .finish_non_exhaustive()
    }
}

impl<S: Storage> RestaurantService<S> {
    /// Loads state from `storage` with UUID ids and the system clock.
    ///
    /// # Errors
    /// See [`RestaurantService::load_with`].
    pub async fn load(storage: S, default_menu: Vec<MenuItem>) -> Result<Self> {
        Self::load_with(
            storage,
            default_menu,
            Arc::new(UuidGenerator),
            Arc::new(SystemClock),
        )
        .await
    }

    /// Loads state from `storage`, falling back to `default_menu` and an empty
    /// order list for whichever collection has nothing usable saved.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read or `default_menu` is invalid.
    #[instrument(skip_all)]
    pub async fn load_with(
        storage: S,
        default_menu: Vec<MenuItem>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let stored = storage.load().await?;

        let catalog = if let Some(menu) = stored.menu {
            info!("Loaded {} saved menu items.", menu.len());
            Catalog::from_items(menu)?
        } else {
            info!(
                "No saved menu found, using {} default items.",
                default_menu.len()
            );
            Catalog::from_items(default_menu).map_err(|e| Error::Config {
                message: format!("Invalid default menu: {e}"),
            })?
        };

        let orders = stored.orders.unwrap_or_default();
        info!("Loaded {} saved orders.", orders.len());

        Ok(Self {
            catalog,
            orders,
            storage,
            ids,
            clock,
        })
    }

    /// The current menu.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Looks an order up by its full id.
    #[must_use]
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    /// Looks an order up by full id, falling back to the newest order whose
    /// short label matches.
    #[must_use]
    pub fn find_order(&self, id_or_label: &str) -> Option<&Order> {
        let query = id_or_label.trim().trim_start_matches('#');
        self.order(query).or_else(|| {
            self.orders
                .iter()
                .rev()
                .find(|order| order.short_id().eq_ignore_ascii_case(query))
        })
    }

    /// Orders that still need kitchen work, oldest first.
    pub fn active_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders
            .iter()
            .filter(|order| !order.status.is_terminal())
    }

    /// Completed orders, oldest first.
    pub fn completed_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|order| order.status.is_terminal())
    }

    /// Adds a new item to the menu with a freshly generated id.
    ///
    /// # Errors
    /// Returns a validation error for an empty name or invalid price.
    #[instrument(skip(self))]
    pub async fn add_menu_item(&mut self, draft: MenuItemDraft) -> Result<MenuItem> {
        let item = draft.into_item(self.ids.next_id());
        self.catalog.add(item.clone())?;
        info!("Added menu item '{}' (ID: {})", item.name, item.id);
        self.persist().await;
        Ok(item)
    }

    /// Replaces the menu item with the same id. Placed orders keep their snapshots.
    ///
    /// # Errors
    /// Returns a validation error, or `MenuItemNotFound` (with the menu unchanged)
    /// if no item has that id.
    #[instrument(skip(self))]
    pub async fn update_menu_item(&mut self, item: MenuItem) -> Result<()> {
        let id = item.id.clone();
        self.catalog.update(item)?;
        info!("Updated menu item {}", id);
        self.persist().await;
        Ok(())
    }

    /// Removes a menu item. Callers holding carts should purge the id from them.
    ///
    /// # Errors
    /// Returns `MenuItemNotFound` if no item has that id.
    #[instrument(skip(self))]
    pub async fn delete_menu_item(&mut self, item_id: &str) -> Result<MenuItem> {
        let removed = self
            .catalog
            .remove(item_id)
            .ok_or_else(|| Error::MenuItemNotFound {
                id: item_id.to_string(),
            })?;
        info!("Deleted menu item '{}' (ID: {})", removed.name, removed.id);
        self.persist().await;
        Ok(removed)
    }

    /// Adds one unit of a menu item to `cart`.
    ///
    /// # Errors
    /// Returns `MenuItemNotFound` (leaving the cart unchanged) for an id that is
    /// not on the menu.
    pub fn add_to_cart(&self, cart: &mut Cart, item_id: &str) -> Result<()> {
        if self.catalog.get(item_id).is_none() {
            return Err(Error::MenuItemNotFound {
                id: item_id.to_string(),
            });
        }
        cart.add(item_id);
        Ok(())
    }

    /// Removes one unit of a menu item from `cart`; absent ids are ignored.
    pub fn remove_from_cart(&self, cart: &mut Cart, item_id: &str) {
        cart.remove(item_id);
    }

    /// Prices `cart` against the current menu without changing anything.
    ///
    /// # Errors
    /// Returns `MenuItemNotFound` if the cart refers to an item no longer on the menu.
    pub fn quote(&self, cart: &Cart) -> Result<Quote> {
        Quote::for_cart(&self.catalog, cart)
    }

    /// Places an order from `cart`, appends it and clears the cart.
    ///
    /// # Errors
    /// Returns `EmptyCart` for an empty cart and `MenuItemNotFound` when an entry
    /// no longer resolves; in both cases nothing is appended and the cart is kept.
    #[instrument(skip(self, cart), fields(lines = cart.lines().len()))]
    pub async fn place_order(&mut self, cart: &mut Cart) -> Result<Order> {
        if cart.is_empty() {
            return Err(Error::EmptyCart);
        }
        let quote = self.quote(cart)?;
        let order = Order::place(self.ids.next_id(), quote, self.clock.now())?;

        self.orders.push(order.clone());
        cart.clear();
        info!(
            "Placed order {} with {} items, total ${:.2}",
            order.id,
            order.item_count(),
            order.total
        );
        self.persist().await;
        Ok(order)
    }

    /// Moves an order one step along the workflow and returns its new status.
    /// Completed orders stay completed.
    ///
    /// # Errors
    /// Returns `OrderNotFound` if no order has that id.
    #[instrument(skip(self))]
    pub async fn advance_order(&mut self, order_id: &str) -> Result<OrderStatus> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or_else(|| Error::OrderNotFound {
                id: order_id.to_string(),
            })?;

        let before = order.status;
        let after = order.advance();
        if before == after {
            debug!("Order {} is already {}", order_id, after);
            return Ok(after);
        }

        info!("Order {} moved from {} to {}", order_id, before, after);
        self.persist().await;
        Ok(after)
    }

    /// Writes both collections to storage. Failures are logged, not returned.
    async fn persist(&self) {
        if let Err(e) = self
            .storage
            .save(self.catalog.items(), &self.orders)
            .await
        {
            error!("Failed to persist restaurant state: {}", e);
        }
    }

    /// The storage this service mirrors to.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        menu::Category,
        storage::{MENU_KEY, MemoryStorage, ORDERS_KEY, SqliteStorage, StoredState},
    };
    use crate::test_utils::{
        FailingStorage, assert_money_eq, draft, fixed_time, init_test_tracing, menu_item,
        setup_service, setup_test_db, test_service,
    };

    #[tokio::test]
    async fn test_load_without_saved_data_uses_defaults() -> Result<()> {
        let service = setup_service().await?;

        assert_eq!(service.catalog().len(), 2);
        assert!(service.orders().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_prefers_saved_menu() -> Result<()> {
        let storage = MemoryStorage::new();
        storage
            .save(&[menu_item("x", "Milkshake", 3.49, Category::Dessert)], &[])
            .await?;

        let service = test_service(storage).await?;
        assert_eq!(service.catalog().len(), 1);
        assert_eq!(service.catalog().items()[0].name, "Milkshake");
        Ok(())
    }

    #[tokio::test]
    async fn test_load_with_corrupt_data_falls_back() -> Result<()> {
        init_test_tracing();
        let storage = MemoryStorage::with_raw(MENU_KEY, "not json");
        storage.put_raw(ORDERS_KEY, r#"[{"id": 7}]"#);

        let service = test_service(storage).await?;
        assert_eq!(service.catalog().len(), 2);
        assert!(service.orders().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_default_menu_is_config_error() {
        let result = RestaurantService::load(
            MemoryStorage::new(),
            vec![menu_item("1", "Bad", -1.0, Category::Main)],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[tokio::test]
    async fn test_place_order_worked_example() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "1")?;
        service.add_to_cart(&mut cart, "1")?;
        service.add_to_cart(&mut cart, "2")?;

        let order = service.place_order(&mut cart).await?;

        assert!(cart.is_empty());
        assert_eq!(service.orders().len(), 1);
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.created_at, fixed_time());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].menu_item.id, "1");
        assert_eq!(order.items[0].quantity, 2);
        assert_money_eq(order.subtotal(), 12.97);
        assert_money_eq(order.total, order.subtotal() * 1.08);
        assert_eq!(format!("{:.2}", order.total), "14.01");
        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_persists_collections() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "2")?;
        let order = service.place_order(&mut cart).await?;

        let stored = service.storage().load().await?;
        assert_eq!(stored.orders, Some(vec![order]));
        assert_eq!(stored.menu.map(|m| m.len()), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_empty_cart() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();

        let result = service.place_order(&mut cart).await;
        assert!(matches!(result.unwrap_err(), Error::EmptyCart));
        assert!(service.orders().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_with_stale_entry_fails_cleanly() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "1")?;
        service.add_to_cart(&mut cart, "2")?;
        service.delete_menu_item("2").await?;

        let result = service.place_order(&mut cart).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MenuItemNotFound { id } if id == "2"
        ));
        assert!(service.orders().is_empty());
        assert_eq!(cart.item_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_unknown_item() -> Result<()> {
        let service = setup_service().await?;
        let mut cart = Cart::new();

        let result = service.add_to_cart(&mut cart, "nope");
        assert!(matches!(
            result.unwrap_err(),
            Error::MenuItemNotFound { id: _ }
        ));
        assert!(cart.is_empty());

        service.remove_from_cart(&mut cart, "nope");
        assert!(cart.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_price_edit_does_not_change_placed_order() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "1")?;
        let order = service.place_order(&mut cart).await?;

        let mut repriced = service.catalog().get("1").unwrap().clone();
        repriced.price = 99.0;
        service.update_menu_item(repriced).await?;

        let stored = service.order(&order.id).unwrap();
        assert_eq!(stored.total, order.total);
        assert_eq!(stored.items[0].menu_item.price, 4.99);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_referenced_item_keeps_order() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "1")?;
        let order = service.place_order(&mut cart).await?;

        service.delete_menu_item("1").await?;

        assert!(service.catalog().get("1").is_none());
        assert_eq!(service.order(&order.id), Some(&order));
        Ok(())
    }

    #[tokio::test]
    async fn test_menu_crud() -> Result<()> {
        let mut service = setup_service().await?;

        let added = service
            .add_menu_item(draft("Chocolate Cookie", 1.99, Category::Dessert))
            .await?;
        assert_eq!(service.catalog().len(), 3);
        assert_eq!(service.catalog().items()[2], added);

        let mut edited = added.clone();
        edited.name = "Chocolate Chunk Cookie".to_string();
        service.update_menu_item(edited).await?;
        assert_eq!(
            service.catalog().get(&added.id).unwrap().name,
            "Chocolate Chunk Cookie"
        );

        let missing = service
            .update_menu_item(menu_item("ghost", "Ghost", 1.0, Category::Main))
            .await;
        assert!(matches!(
            missing.unwrap_err(),
            Error::MenuItemNotFound { id: _ }
        ));

        service.delete_menu_item(&added.id).await?;
        assert_eq!(service.catalog().len(), 2);
        assert!(service.delete_menu_item(&added.id).await.is_err());

        let stored = service.storage().load().await?;
        assert_eq!(stored.menu.map(|m| m.len()), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_menu_item_validation() -> Result<()> {
        let mut service = setup_service().await?;

        let result = service
            .add_menu_item(draft("", 1.0, Category::Main))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidMenuItem { message: _ }
        ));

        let result = service
            .add_menu_item(draft("Soup", f64::NAN, Category::Main))
            .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidPrice { .. }));

        assert_eq!(service.catalog().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_advance_order_workflow() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "1")?;
        let order = service.place_order(&mut cart).await?;

        assert_eq!(
            service.advance_order(&order.id).await?,
            OrderStatus::Preparing
        );
        assert_eq!(service.advance_order(&order.id).await?, OrderStatus::Ready);
        assert_eq!(
            service.active_orders().count(),
            1,
            "ready orders are still active"
        );

        assert_eq!(
            service.advance_order(&order.id).await?,
            OrderStatus::Completed
        );
        assert_eq!(
            service.advance_order(&order.id).await?,
            OrderStatus::Completed
        );
        assert_eq!(service.active_orders().count(), 0);
        assert_eq!(service.completed_orders().count(), 1);

        let stored = service.storage().load().await?;
        assert_eq!(stored.orders.unwrap()[0].status, OrderStatus::Completed);
        Ok(())
    }

    #[tokio::test]
    async fn test_advance_unknown_order() -> Result<()> {
        let mut service = setup_service().await?;
        let result = service.advance_order("missing").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::OrderNotFound { id } if id == "missing"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_order_by_short_label() -> Result<()> {
        let mut service = setup_service().await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "1")?;
        let order = service.place_order(&mut cart).await?;

        let label = format!("#{}", order.short_id());
        assert_eq!(service.find_order(&label).map(|o| &o.id), Some(&order.id));
        assert_eq!(service.find_order(&order.id), Some(&order));
        assert!(service.find_order("zzzz").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_state_survives_reload_through_sqlite() -> Result<()> {
        let db = setup_test_db().await?;
        let mut service = test_service(SqliteStorage::new(db.clone())).await?;
        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "2")?;
        let order = service.place_order(&mut cart).await?;
        service.advance_order(&order.id).await?;

        let reloaded = test_service(SqliteStorage::new(db)).await?;
        assert_eq!(reloaded.orders().len(), 1);
        assert_eq!(reloaded.orders()[0].status, OrderStatus::Preparing);
        assert_eq!(reloaded.orders()[0].total, order.total);
        assert_eq!(reloaded.catalog(), service.catalog());

        let stored: StoredState = reloaded.storage().load().await?;
        assert!(stored.menu.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_save_keeps_in_memory_changes() -> Result<()> {
        init_test_tracing();
        let mut service = test_service(FailingStorage::default()).await?;

        let mut cart = Cart::new();
        service.add_to_cart(&mut cart, "1")?;
        service.add_to_cart(&mut cart, "2")?;
        let order = service.place_order(&mut cart).await?;
        assert!(cart.is_empty());
        assert_eq!(service.orders().len(), 1);
        assert_eq!(service.storage().save_attempts(), 1);

        let status = service.advance_order(&order.id).await?;
        assert_eq!(status, OrderStatus::Preparing);
        assert_eq!(service.order(&order.id).unwrap().status, OrderStatus::Preparing);
        assert_eq!(service.storage().save_attempts(), 2);

        let removed = service.delete_menu_item("2").await?;
        assert_eq!(removed.name, "Waffle Fries");
        assert!(service.catalog().get("2").is_none());
        assert_eq!(service.storage().save_attempts(), 3);

        // The placed order still carries its snapshot
        assert_eq!(service.orders()[0].items.len(), 2);
        Ok(())
    }
}
