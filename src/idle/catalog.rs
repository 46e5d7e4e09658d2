//! Upgrade catalog for the idle game

use serde::{Deserialize, Serialize};

/// Upgrade identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeId {
    Grill,
    Chef,
    Franchise,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 3] = [UpgradeId::Grill, UpgradeId::Chef, UpgradeId::Franchise];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeId::Grill => "grill",
            UpgradeId::Chef => "chef",
            UpgradeId::Franchise => "franchise",
        }
    }

    /// Catalog entry for this upgrade
    pub fn upgrade(&self) -> &'static Upgrade {
        match self {
            UpgradeId::Grill => &GRILL,
            UpgradeId::Chef => &CHEF,
            UpgradeId::Franchise => &FRANCHISE,
        }
    }
}

/// Static upgrade definition
#[derive(Debug, Clone, PartialEq)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    pub cost_multiplier: f64,
    pub adds_kebabs_per_second: f64,
    pub adds_kebabs_per_click: f64,
}

impl Upgrade {
    /// Price of the next unit when `owned` are already bought:
    /// `floor(base * multiplier^owned)`, never below 1
    pub fn cost_at(&self, owned: u32) -> f64 {
        let exponent = owned.min(i32::MAX as u32) as i32;
        (self.base_cost * self.cost_multiplier.powi(exponent))
            .floor()
            .max(1.0)
    }
}

pub const GRILL: Upgrade = Upgrade {
    id: UpgradeId::Grill,
    name: "Grill",
    description: "A small grill that cooks kebabs on its own.",
    base_cost: 10.0,
    cost_multiplier: 1.15,
    adds_kebabs_per_second: 0.5,
    adds_kebabs_per_click: 0.0,
};

pub const CHEF: Upgrade = Upgrade {
    id: UpgradeId::Chef,
    name: "Chef",
    description: "A chef adds kebabs to every click.",
    base_cost: 20.0,
    cost_multiplier: 1.25,
    adds_kebabs_per_second: 0.0,
    adds_kebabs_per_click: 1.0,
};

pub const FRANCHISE: Upgrade = Upgrade {
    id: UpgradeId::Franchise,
    name: "Franchise",
    description: "Open a shop - big passive income.",
    base_cost: 100.0,
    cost_multiplier: 1.3,
    adds_kebabs_per_second: 5.0,
    adds_kebabs_per_click: 0.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grill_cost_curve() {
        assert_eq!(GRILL.cost_at(0), 10.0);
        assert_eq!(GRILL.cost_at(1), 11.0);
        assert_eq!(GRILL.cost_at(2), 13.0);
    }

    #[test]
    fn test_cost_never_below_one() {
        let cheap = Upgrade {
            base_cost: 0.2,
            ..GRILL
        };
        assert_eq!(cheap.cost_at(0), 1.0);
    }

    #[test]
    fn test_ids_match_catalog() {
        for id in UpgradeId::ALL {
            assert_eq!(id.upgrade().id, id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
