//! Purchase backend providers

pub mod null;
pub mod sandbox;

pub use null::NullPurchaseBackend;
pub use sandbox::{SANDBOX_RECEIPT_KEY, SandboxPurchaseBackend, SandboxReceipt};
