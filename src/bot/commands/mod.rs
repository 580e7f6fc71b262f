//! Discord command implementations organized by view.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Slash-command choices shared by several commands
pub mod choices;

/// Customer commands: menu, cart and checkout
pub mod customer;

/// General utility commands
pub mod general;

/// Staff commands: menu management and order workflow
pub mod staff;

// Export commands
pub use customer::*;
pub use general::*;
pub use staff::*;
