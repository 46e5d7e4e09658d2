//! HUD snapshot publishing
//!
//! The frame loop owns the authoritative counters; the DOM layer only sees
//! snapshots handed out by [`HudPublisher`], which throttles updates so text
//! nodes aren't rewritten every frame.

use crate::idle::{IdleState, Upgrade, UpgradeId};

/// Minimum seconds between publishes of counter-only changes
pub const HUD_PUBLISH_INTERVAL: f64 = 0.1;

/// Derived view of the arcade for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u32,
    pub lives: u32,
    pub is_running: bool,
    pub is_game_over: bool,
}

impl HudSnapshot {
    /// Overlay headline when the game isn't running
    pub fn banner(&self) -> Option<&'static str> {
        if self.is_running {
            None
        } else if self.is_game_over {
            Some("Game over!")
        } else {
            Some("Kebab Tycoon - Arcade")
        }
    }

    /// Overlay hint when the game isn't running
    pub fn prompt(&self) -> Option<&'static str> {
        if self.is_running {
            None
        } else if self.is_game_over {
            Some("Press Enter or click to play again")
        } else {
            Some("Press Enter or click to start")
        }
    }

    fn same_flags(&self, other: &HudSnapshot) -> bool {
        self.is_running == other.is_running && self.is_game_over == other.is_game_over
    }
}

/// Explicit publish step between the simulation and the DOM
#[derive(Debug, Default)]
pub struct HudPublisher {
    last: Option<HudSnapshot>,
    last_time: f64,
}

impl HudPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a fresh snapshot at `now` seconds.
    ///
    /// Returns the snapshot when it should be pushed to the UI: always the
    /// first time, immediately on phase changes, and at most once per
    /// [`HUD_PUBLISH_INTERVAL`] for counter changes.
    pub fn poll(&mut self, snapshot: HudSnapshot, now: f64) -> Option<HudSnapshot> {
        let publish = match &self.last {
            None => true,
            Some(last) if *last == snapshot => false,
            Some(last) if !last.same_flags(&snapshot) => true,
            Some(_) => now - self.last_time >= HUD_PUBLISH_INTERVAL,
        };
        if publish {
            self.last = Some(snapshot);
            self.last_time = now;
            Some(snapshot)
        } else {
            None
        }
    }
}

/// One upgrade row in the idle panel
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeRow {
    pub id: UpgradeId,
    /// Button label, e.g. `Grill (+0.5/s)`
    pub label: String,
    pub description: &'static str,
    pub cost: String,
    pub owned: String,
    pub affordable: bool,
}

/// Display text for the idle panel counters
#[derive(Debug, Clone, PartialEq)]
pub struct IdlePanel {
    pub kebabs: String,
    pub per_click: String,
    pub per_second: String,
    pub upgrades: Vec<UpgradeRow>,
}

impl IdlePanel {
    pub fn from_state(state: &IdleState) -> Self {
        Self {
            // Balances are fractional; show whole kebabs only
            kebabs: format!("{}", state.kebabs.floor()),
            per_click: format_rate(state.kebabs_per_click),
            per_second: format_rate(state.kebabs_per_second),
            upgrades: UpgradeId::ALL
                .iter()
                .map(|&id| UpgradeRow {
                    id,
                    label: upgrade_label(id.upgrade()),
                    description: id.upgrade().description,
                    cost: format!("{}", state.upgrade_cost(id)),
                    owned: state.owned.get(id).to_string(),
                    affordable: state.can_buy(id),
                })
                .collect(),
        }
    }
}

fn upgrade_label(upgrade: &Upgrade) -> String {
    if upgrade.adds_kebabs_per_second > 0.0 {
        format!("{} (+{}/s)", upgrade.name, format_rate(upgrade.adds_kebabs_per_second))
    } else {
        format!("{} (+{}/click)", upgrade.name, format_rate(upgrade.adds_kebabs_per_click))
    }
}

/// Whole numbers without decimals, otherwise one decimal place
fn format_rate(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(score: u32) -> HudSnapshot {
        HudSnapshot {
            score,
            lives: 3,
            is_running: true,
            is_game_over: false,
        }
    }

    #[test]
    fn test_first_poll_publishes() {
        let mut hud = HudPublisher::new();
        assert_eq!(hud.poll(HudSnapshot::default(), 0.0), Some(HudSnapshot::default()));
    }

    #[test]
    fn test_unchanged_is_skipped() {
        let mut hud = HudPublisher::new();
        hud.poll(running(1), 0.0);
        assert_eq!(hud.poll(running(1), 5.0), None);
    }

    #[test]
    fn test_counter_changes_are_throttled() {
        let mut hud = HudPublisher::new();
        hud.poll(running(1), 1.0);
        assert_eq!(hud.poll(running(2), 1.05), None);
        assert_eq!(hud.poll(running(3), 1.11), Some(running(3)));
        assert_eq!(hud.poll(running(4), 1.15), None);
    }

    #[test]
    fn test_phase_change_is_immediate() {
        let mut hud = HudPublisher::new();
        hud.poll(running(4), 1.0);
        let over = HudSnapshot {
            score: 4,
            lives: 0,
            is_running: false,
            is_game_over: true,
        };
        assert_eq!(hud.poll(over, 1.001), Some(over));
    }

    #[test]
    fn test_banner_text() {
        assert!(running(0).banner().is_none());
        let idle = HudSnapshot::default();
        assert_eq!(idle.banner(), Some("Kebab Tycoon - Arcade"));
        let over = HudSnapshot {
            is_game_over: true,
            ..Default::default()
        };
        assert_eq!(over.banner(), Some("Game over!"));
        assert!(over.prompt().is_some_and(|p| p.contains("again")));
    }

    #[test]
    fn test_idle_panel_text() {
        let mut state = IdleState::default();
        state.kebabs = 12.7;
        let panel = IdlePanel::from_state(&state);
        assert_eq!(panel.kebabs, "12");
        assert_eq!(panel.per_click, "1");
        assert_eq!(panel.per_second, "0");

        let grill = &panel.upgrades[0];
        assert_eq!(grill.id, UpgradeId::Grill);
        assert_eq!(grill.label, "Grill (+0.5/s)");
        assert_eq!(panel.upgrades[1].label, "Chef (+1/click)");
        assert_eq!(panel.upgrades[2].label, "Franchise (+5/s)");
        assert!(!grill.description.is_empty());
        assert_eq!(grill.cost, "10");
        assert_eq!(grill.owned, "0");
        assert!(grill.affordable);
        assert!(!panel.upgrades[2].affordable);
    }

    #[test]
    fn test_idle_panel_after_purchase() {
        let mut state = IdleState::default();
        state.kebabs = 10.0;
        state.buy(UpgradeId::Grill).unwrap();
        let panel = IdlePanel::from_state(&state);
        assert_eq!(panel.per_second, "0.5");
        assert_eq!(panel.upgrades[0].cost, "11");
        assert_eq!(panel.upgrades[0].owned, "1");
    }
}
