//! External service provider ports

pub mod purchase;

pub use purchase::PurchaseBackend;
