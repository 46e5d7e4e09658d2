//! Idle/clicker economy
//!
//! Cook kebabs by hand, buy upgrades that cook for you.

pub mod catalog;
pub mod store;

pub use catalog::{Upgrade, UpgradeId};
pub use store::{IDLE_STORAGE_KEY, IDLE_TICK_SECONDS, IdleState, IdleStore, Owned, StoreError};
