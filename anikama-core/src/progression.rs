//! Legacy XP / level track.
//!
//! Runs beside the affinity score: passive activity (viewing stories,
//! chatting) earns XP, and every `xp_per_level` points is a level.

use serde::{Deserialize, Serialize};

use crate::config::ProgressionConfig;
use crate::types::CompanionId;

/// Activity that earns XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Watched one of the companion's stories.
    ViewStory,
    /// Sent the companion a chat message.
    SentMsg,
}

impl ActivityKind {
    /// Parse the client's action label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "view_story" => Some(Self::ViewStory),
            "sent_msg" => Some(Self::SentMsg),
            _ => None,
        }
    }
}

/// Stored XP state for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AffinityProgress {
    /// Total XP earned.
    pub xp: u32,
    /// Level derived from `xp`.
    pub level: u32,
}

/// Outcome of recording one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressOutcome {
    /// Companion the activity was about.
    pub companion_id: CompanionId,
    /// XP after the activity.
    pub xp: u32,
    /// Level after the activity.
    pub level: u32,
    /// XP awarded.
    pub xp_gained: u32,
    /// Whether the level went up.
    pub leveled_up: bool,
}

/// XP and level rules.
#[derive(Debug, Clone)]
pub struct Progression {
    config: ProgressionConfig,
}

impl Progression {
    /// Create with the given rewards.
    #[must_use]
    pub fn new(config: ProgressionConfig) -> Self {
        Self { config }
    }

    /// Level for a total XP: `xp / xp_per_level + 1`.
    #[must_use]
    pub fn calculate_level(&self, xp: u32) -> u32 {
        xp / self.config.xp_per_level.max(1) + 1
    }

    /// XP for an action label; 0 for anything unrewarded.
    #[must_use]
    pub fn xp_for_action(&self, action: &str) -> u32 {
        match ActivityKind::from_label(action) {
            Some(ActivityKind::ViewStory) => self.config.view_story_xp,
            Some(ActivityKind::SentMsg) => self.config.sent_msg_xp,
            None => 0,
        }
    }

    /// Whether going from `old_xp` to `new_xp` crosses a level boundary.
    #[must_use]
    pub fn did_level_up(&self, old_xp: u32, new_xp: u32) -> bool {
        self.calculate_level(new_xp) > self.calculate_level(old_xp)
    }

    /// Add `gained` XP to `current` (or a fresh pair).
    #[must_use]
    pub fn award(&self, current: Option<AffinityProgress>, gained: u32) -> AffinityProgress {
        let xp = current.map_or(0, |p| p.xp).saturating_add(gained);
        AffinityProgress {
            xp,
            level: self.calculate_level(xp),
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(ProgressionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_formula() {
        let p = Progression::default();
        assert_eq!(p.calculate_level(0), 1);
        assert_eq!(p.calculate_level(99), 1);
        assert_eq!(p.calculate_level(100), 2);
        assert_eq!(p.calculate_level(250), 3);
    }

    #[test]
    fn rewards_per_action() {
        let p = Progression::default();
        assert_eq!(p.xp_for_action("view_story"), 5);
        assert_eq!(p.xp_for_action("sent_msg"), 1);
        assert_eq!(p.xp_for_action("reaction_heart"), 0);
    }

    #[test]
    fn level_up_detection() {
        let p = Progression::default();
        assert!(p.did_level_up(98, 103));
        assert!(!p.did_level_up(100, 105));
        assert!(!p.did_level_up(5, 5));
    }

    #[test]
    fn award_starts_fresh_pairs_at_zero() {
        let p = Progression::default();
        let first = p.award(None, 5);
        assert_eq!(first, AffinityProgress { xp: 5, level: 1 });
        let next = p.award(Some(AffinityProgress { xp: 97, level: 1 }), 5);
        assert_eq!(next, AffinityProgress { xp: 102, level: 2 });
    }

    #[test]
    fn zero_points_per_level_does_not_divide_by_zero() {
        let p = Progression::new(ProgressionConfig {
            xp_per_level: 0,
            ..ProgressionConfig::default()
        });
        assert_eq!(p.calculate_level(7), 8);
    }
}
