//! Storage entry entity - One persisted collection per row.
//!
//! The persistence mirror keeps each collection as a whole JSON document under
//! a fixed key (`menuItems`, `orders`). Rows are overwritten in full on every save.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage entry database model - a keyed JSON blob
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_entries")]
pub struct Model {
    /// Collection key (e.g. `"menuItems"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized collection
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When the collection was last written
    pub updated_at: DateTime,
}

/// `StorageEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
