//! Entity module - Contains the SeaORM entity definitions for the database.
//! The restaurant state lives in a single key/value table; each row holds one
//! whole collection.

pub mod storage_entry;

pub use storage_entry::{
    Column as StorageEntryColumn, Entity as StorageEntry, Model as StorageEntryModel,
};
