//! Persistence mirror - Best-effort write-through of the menu and order collections.
//!
//! Each collection is stored as one JSON array under its own key. Loading runs
//! every blob through a validated parse: a payload that does not deserialize,
//! or that breaks an invariant, is discarded with a warning and reported as
//! absent so the caller falls back to its defaults.

use crate::{
    core::{menu::Catalog, menu::MenuItem, order::Order},
    entities::{StorageEntry, storage_entry},
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait, sea_query::OnConflict,
};
use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::{Mutex, PoisonError},
};
use tracing::{debug, instrument, warn};

/// Key of the menu collection.
pub const MENU_KEY: &str = "menuItems";
/// Key of the order collection.
pub const ORDERS_KEY: &str = "orders";

/// Collections read back from storage. `None` means nothing usable was saved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoredState {
    /// Saved menu, if present and valid
    pub menu: Option<Vec<MenuItem>>,
    /// Saved orders, if present and valid
    pub orders: Option<Vec<Order>>,
}

/// Where the restaurant state is mirrored.
pub trait Storage: Send + Sync {
    /// Reads both collections.
    fn load(&self) -> impl Future<Output = Result<StoredState>> + Send;

    /// Overwrites both collections.
    fn save(&self, menu: &[MenuItem], orders: &[Order]) -> impl Future<Output = Result<()>> + Send;
}

/// Parses and validates a saved menu.
///
/// # Errors
/// Returns a serialization error for malformed JSON or the validation error of
/// the first invalid item.
pub fn decode_menu(raw: &str) -> Result<Vec<MenuItem>> {
    let items: Vec<MenuItem> = serde_json::from_str(raw)?;
    Ok(Catalog::from_items(items)?.into_items())
}

/// Parses and validates saved orders.
///
/// # Errors
/// Returns a serialization error for malformed JSON, or a validation error for
/// an invalid order or a repeated order id.
pub fn decode_orders(raw: &str) -> Result<Vec<Order>> {
    let orders: Vec<Order> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(orders.len());
    for order in &orders {
        order.validate()?;
        if !seen.insert(order.id.as_str()) {
            return Err(Error::InvalidOrder {
                message: format!("Duplicate order id '{}'", order.id),
            });
        }
    }
    Ok(orders)
}

/// Runs a decoder over an optional blob, turning failures into `None`.
fn decode_or_discard<T>(
    key: &str,
    raw: Option<&str>,
    decode: impl FnOnce(&str) -> Result<T>,
) -> Option<T> {
    let raw = raw?;
    match decode(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding stored '{}' collection: {}", key, e);
            None
        }
    }
}

fn decode_state(menu_raw: Option<&str>, orders_raw: Option<&str>) -> StoredState {
    StoredState {
        menu: decode_or_discard(MENU_KEY, menu_raw, decode_menu),
        orders: decode_or_discard(ORDERS_KEY, orders_raw, decode_orders),
    }
}

/// SQLite-backed storage using the `storage_entries` table.
#[derive(Clone, Debug)]
pub struct SqliteStorage {
    db: DatabaseConnection,
}

impl SqliteStorage {
    /// Wraps an open connection. The table must already exist
    /// (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let entry = StorageEntry::find_by_id(key.to_string())
            .one(&self.db)
            .await?;
        Ok(entry.map(|e| e.value))
    }

    /// Writes a raw blob under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the database write fails.
    pub async fn write_raw(&self, key: &str, value: String) -> Result<()> {
        upsert_entry(&self.db, key, value).await
    }
}

async fn upsert_entry<C: ConnectionTrait>(conn: &C, key: &str, value: String) -> Result<()> {
    let entry = storage_entry::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_at: Set(chrono::Utc::now().naive_utc()),
    };
    StorageEntry::insert(entry)
        .on_conflict(
            OnConflict::column(storage_entry::Column::Key)
                .update_columns([
                    storage_entry::Column::Value,
                    storage_entry::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

impl Storage for SqliteStorage {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<StoredState> {
        let menu_raw = self.read(MENU_KEY).await?;
        let orders_raw = self.read(ORDERS_KEY).await?;
        debug!(
            "Loaded stored state (menu present: {}, orders present: {})",
            menu_raw.is_some(),
            orders_raw.is_some()
        );
        Ok(decode_state(menu_raw.as_deref(), orders_raw.as_deref()))
    }

    #[instrument(skip(self, menu, orders), fields(menu_items = menu.len(), order_count = orders.len()))]
    async fn save(&self, menu: &[MenuItem], orders: &[Order]) -> Result<()> {
        let menu_json = serde_json::to_string(menu)?;
        let orders_json = serde_json::to_string(orders)?;

        // Both collections land together or not at all
        let txn = self.db.begin().await?;
        upsert_entry(&txn, MENU_KEY, menu_json).await?;
        upsert_entry(&txn, ORDERS_KEY, orders_json).await?;
        txn.commit().await?;
        Ok(())
    }
}

/// In-process storage holding raw JSON blobs, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw blob under `key`.
    #[must_use]
    pub fn with_raw(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.put_raw(key, value);
        store
    }

    /// Replaces the raw blob under `key`.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    /// Returns the raw blob under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl Storage for MemoryStorage {
    async fn load(&self) -> Result<StoredState> {
        Ok(decode_state(
            self.raw(MENU_KEY).as_deref(),
            self.raw(ORDERS_KEY).as_deref(),
        ))
    }

    async fn save(&self, menu: &[MenuItem], orders: &[Order]) -> Result<()> {
        let menu_json = serde_json::to_string(menu)?;
        let orders_json = serde_json::to_string(orders)?;
        self.put_raw(MENU_KEY, &menu_json);
        self.put_raw(ORDERS_KEY, &orders_json);
        Ok(())
    }
}
