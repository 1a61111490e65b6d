//! Domain value objects

pub mod access_window;
pub mod capabilities;
pub mod purchase;

pub use access_window::{AccessWindow, accessible_date_for, is_date_accessible};
pub use capabilities::Capabilities;
pub use purchase::PurchaseEvent;
