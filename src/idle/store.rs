//! Persisted idle-game store
//!
//! One explicitly-owned store is created at startup and lives for the whole
//! session. Every mutation writes the full snapshot back to storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::UpgradeId;
use crate::persistence::{self, KeyValueStore};

/// Storage key for the idle snapshot
pub const IDLE_STORAGE_KEY: &str = "kebab-tycoon-v1";
/// Snapshot format version
pub const IDLE_STATE_VERSION: u32 = 1;
/// Passive income is credited (and saved) in chunks of at least this many seconds
pub const IDLE_TICK_SECONDS: f64 = 1.0;

/// Errors from store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Not enough kebabs for the upgrade
    #[error("insufficient kebabs for {upgrade:?}: need {cost}, have {available}")]
    InsufficientKebabs {
        upgrade: UpgradeId,
        cost: f64,
        available: f64,
    },
}

/// Owned upgrade counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Owned {
    pub grill: u32,
    pub chef: u32,
    pub franchise: u32,
}

impl Owned {
    pub fn get(&self, id: UpgradeId) -> u32 {
        match id {
            UpgradeId::Grill => self.grill,
            UpgradeId::Chef => self.chef,
            UpgradeId::Franchise => self.franchise,
        }
    }

    fn get_mut(&mut self, id: UpgradeId) -> &mut u32 {
        match id {
            UpgradeId::Grill => &mut self.grill,
            UpgradeId::Chef => &mut self.chef,
            UpgradeId::Franchise => &mut self.franchise,
        }
    }
}

/// Idle-game economy state
///
/// `kebabs` is a float that is neither clamped nor rounded: passive accrual
/// produces fractional balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdleState {
    pub kebabs: f64,
    pub kebabs_per_click: f64,
    pub kebabs_per_second: f64,
    pub owned: Owned,
}

impl Default for IdleState {
    fn default() -> Self {
        Self {
            kebabs: 0.0,
            kebabs_per_click: 1.0,
            kebabs_per_second: 0.0,
            owned: Owned::default(),
        }
    }
}

impl IdleState {
    /// Price of the next unit of `id`
    pub fn upgrade_cost(&self, id: UpgradeId) -> f64 {
        id.upgrade().cost_at(self.owned.get(id))
    }

    pub fn can_buy(&self, id: UpgradeId) -> bool {
        self.kebabs >= self.upgrade_cost(id)
    }

    /// Debit the cost and apply the upgrade's bonus
    ///
    /// Returns the new owned count.
    pub fn buy(&mut self, id: UpgradeId) -> Result<u32, StoreError> {
        let cost = self.upgrade_cost(id);
        if self.kebabs < cost {
            return Err(StoreError::InsufficientKebabs {
                upgrade: id,
                cost,
                available: self.kebabs,
            });
        }
        let upgrade = id.upgrade();
        self.kebabs -= cost;
        self.kebabs_per_click += upgrade.adds_kebabs_per_click;
        self.kebabs_per_second += upgrade.adds_kebabs_per_second;
        let owned = self.owned.get_mut(id);
        *owned += 1;
        Ok(*owned)
    }

    /// Manual production action
    pub fn cook(&mut self) {
        self.kebabs += self.kebabs_per_click;
    }

    /// Passive accrual over `delta_seconds`; non-positive deltas are ignored.
    ///
    /// Returns whether anything changed.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        if delta_seconds <= 0.0 {
            return false;
        }
        self.kebabs += self.kebabs_per_second * delta_seconds;
        true
    }
}

/// On-disk envelope
#[derive(Debug, Serialize, Deserialize)]
struct Persisted {
    state: IdleState,
    version: u32,
}

/// The idle-game store: state plus the storage it persists to
pub struct IdleStore<S: KeyValueStore> {
    state: IdleState,
    storage: S,
    /// Wall-clock seconds not yet credited
    pending: f64,
}

impl<S: KeyValueStore> IdleStore<S> {
    /// Load the persisted snapshot, or start fresh
    pub fn open(storage: S) -> Self {
        let state = match persistence::read_json::<Persisted, _>(&storage, IDLE_STORAGE_KEY) {
            Ok(Some(saved)) if saved.version == IDLE_STATE_VERSION => {
                log::info!("Loaded idle game ({:.0} kebabs)", saved.state.kebabs);
                saved.state
            }
            Ok(Some(saved)) => {
                log::warn!("Unknown idle save version {}, starting fresh", saved.version);
                IdleState::default()
            }
            Ok(None) => IdleState::default(),
            Err(e) => {
                log::warn!("Ignoring idle save: {}", e);
                IdleState::default()
            }
        };
        Self {
            state,
            storage,
            pending: 0.0,
        }
    }

    pub fn state(&self) -> &IdleState {
        &self.state
    }

    pub fn buy(&mut self, id: UpgradeId) -> Result<u32, StoreError> {
        let owned = self.state.buy(id)?;
        log::info!("Bought {} (now {})", id.as_str(), owned);
        self.persist();
        Ok(owned)
    }

    pub fn cook(&mut self) {
        self.state.cook();
        self.persist();
    }

    pub fn tick(&mut self, delta_seconds: f64) {
        if self.state.tick(delta_seconds) {
            self.persist();
        }
    }

    /// Collect frame time, crediting passive income once a whole
    /// [`IDLE_TICK_SECONDS`] chunk has built up.
    ///
    /// Returns whether income was credited.
    pub fn accrue(&mut self, raw_seconds: f64) -> bool {
        if raw_seconds > 0.0 {
            self.pending += raw_seconds;
        }
        if self.pending < IDLE_TICK_SECONDS {
            return false;
        }
        let elapsed = std::mem::take(&mut self.pending);
        self.tick(elapsed);
        true
    }

    /// Restore defaults, dropping any uncredited time
    pub fn reset(&mut self) {
        self.state = IdleState::default();
        self.pending = 0.0;
        log::info!("Idle game reset");
        self.persist();
    }

    fn persist(&mut self) {
        let envelope = Persisted {
            state: self.state.clone(),
            version: IDLE_STATE_VERSION,
        };
        persistence::save_best_effort(&mut self.storage, IDLE_STORAGE_KEY, &envelope);
    }

    /// Give back the underlying storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    #[cfg(test)]
    fn storage(&self) -> &S {
        &self.storage
    }
}
