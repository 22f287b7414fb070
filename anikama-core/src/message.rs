//! Toast messages and reaction-video selection.

use serde::{Deserialize, Serialize};

use crate::types::{MoodState, PersonalityType};

/// Shown whenever the companion ends up sad.
pub const HEARTBREAK_MESSAGE: &str = "You broke their heart...";
/// Shown for a positive delta.
pub const POSITIVE_MESSAGE: &str = "Relationship deepened!";
/// Shown for a negative delta.
pub const NEGATIVE_MESSAGE: &str = "They didn't like that...";
/// Shown when nothing changed.
pub const NEUTRAL_MESSAGE: &str = "No reaction.";

/// Pick the toast for an interaction.
///
/// A sad companion always gets the heartbreak line; otherwise the sign of
/// `delta` decides. `personality` does not change the text yet.
#[must_use]
pub fn generate_message(
    _personality: Option<PersonalityType>,
    mood: MoodState,
    delta: i32,
) -> &'static str {
    if mood == MoodState::Sad {
        return HEARTBREAK_MESSAGE;
    }
    match delta.signum() {
        1 => POSITIVE_MESSAGE,
        -1 => NEGATIVE_MESSAGE,
        _ => NEUTRAL_MESSAGE,
    }
}

/// Choose between the happy and sad reaction videos.
///
/// Positive deltas play `happy`, negative ones `sad`, zero plays nothing.
/// An empty reference counts as missing.
#[must_use]
pub fn select_reaction_asset<'a>(delta: i32, happy: &'a str, sad: &'a str) -> Option<&'a str> {
    let chosen = match delta.signum() {
        1 => happy,
        -1 => sad,
        _ => return None,
    };
    (!chosen.is_empty()).then_some(chosen)
}

/// A companion's reaction videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionAssets {
    /// Played after a positive interaction.
    pub happy_reaction_url: String,
    /// Played after a negative interaction.
    pub sad_reaction_url: String,
}

impl ReactionAssets {
    /// Create from the two URLs.
    #[must_use]
    pub fn new(happy_reaction_url: impl Into<String>, sad_reaction_url: impl Into<String>) -> Self {
        Self {
            happy_reaction_url: happy_reaction_url.into(),
            sad_reaction_url: sad_reaction_url.into(),
        }
    }

    /// See [`select_reaction_asset`].
    #[must_use]
    pub fn select(&self, delta: i32) -> Option<&str> {
        select_reaction_asset(delta, &self.happy_reaction_url, &self.sad_reaction_url)
    }
}
