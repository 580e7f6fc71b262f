//! Shared test utilities for `OrderBuddy`.
//!
//! This module provides helpers for setting up test databases and services with
//! deterministic ids and timestamps, plus small builders for menu items.
#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        menu::{Category, MenuItem, MenuItemDraft},
        service::RestaurantService,
        sources::{Clock, IdGenerator},
        order::Order,
        storage::{MemoryStorage, Storage, StoredState},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber (idempotent).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Ids `id-1`, `id-2`, ... in call order.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("id-{n}")
    }
}

/// Clock frozen at [`fixed_time`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_time()
    }
}

/// Storage that loads nothing and fails every save, counting the attempts.
#[derive(Debug, Default)]
pub struct FailingStorage {
    saves: AtomicU64,
}

impl FailingStorage {
    /// Number of saves attempted so far.
    pub fn save_attempts(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }
}

impl Storage for FailingStorage {
    async fn load(&self) -> Result<StoredState> {
        Ok(StoredState::default())
    }

    async fn save(&self, _menu: &[MenuItem], _orders: &[Order]) -> Result<()> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        Err(Error::Database(DbErr::Custom("disk full".to_string())))
    }
}

/// 2024-05-01 12:30:00 UTC.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
}

/// Builds a menu item with an empty description and image.
pub fn menu_item(id: &str, name: &str, price: f64, category: Category) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        price,
        category,
        image: String::new(),
    }
}

/// Builds a staff draft with an empty description and image.
pub fn draft(name: &str, price: f64, category: Category) -> MenuItemDraft {
    MenuItemDraft {
        name: name.to_string(),
        description: String::new(),
        price,
        category,
        image: String::new(),
    }
}

/// Two-item menu: `1` Chicken Sandwich at 4.99 and `2` Waffle Fries at 2.99.
pub fn test_menu() -> Vec<MenuItem> {
    vec![
        menu_item("1", "Chicken Sandwich", 4.99, Category::Main),
        menu_item("2", "Waffle Fries", 2.99, Category::Appetizer),
    ]
}

/// Loads a service over `storage` with [`test_menu`] as the default menu and
/// deterministic collaborators.
pub async fn test_service<S: Storage>(storage: S) -> Result<RestaurantService<S>> {
    RestaurantService::load_with(
        storage,
        test_menu(),
        Arc::new(SequentialIds::default()),
        Arc::new(FixedClock),
    )
    .await
}

/// A service over fresh in-memory storage.
pub async fn setup_service() -> Result<RestaurantService<MemoryStorage>> {
    test_service(MemoryStorage::new()).await
}

/// Asserts two money amounts agree to well below a cent.
pub fn assert_money_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
