//! Core business logic - framework-agnostic menu, cart, order and persistence code.
//!
//! Nothing in here knows about Discord; the bot layer drives everything through
//! [`service::RestaurantService`].

/// Cart state machine
pub mod cart;
/// Menu items and the editable catalog
pub mod menu;
/// Pricing, order snapshots and the status workflow
pub mod order;
/// Display formatting for menus, receipts and tickets
pub mod report;
/// State-owning service tying catalog, orders and storage together
pub mod service;
/// Injected id and clock sources
pub mod sources;
/// Persistence mirror
pub mod storage;
