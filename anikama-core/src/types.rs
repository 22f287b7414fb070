//! Core type definitions for the affinity system.
//!
//! Enumerations serialize to the labels stored in the database and sent to
//! the client (`"Ore-sama"`, `"reaction_heart"`, `"jealous"`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for an app user.
    UserId
);
uuid_id!(
    /// Unique identifier for a companion character.
    CompanionId
);
uuid_id!(
    /// Unique identifier for a story posted by a companion.
    StoryId
);

// ---------------------------------------------------------------------------
// Affinity score bounds
// ---------------------------------------------------------------------------

/// Lowest reachable affinity score.
pub const MIN_AFFINITY: i32 = -100;
/// Highest reachable affinity score.
pub const MAX_AFFINITY: i32 = 100;

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Fixed personality archetype of a companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityType {
    /// Cold on the outside, pleased by bold gestures.
    Tsundere,
    /// Openly affectionate.
    Deredere,
    /// Reserved, barely reacts.
    Kuudere,
    /// Self-assured, enjoys any attention.
    #[serde(rename = "Ore-sama", alias = "OreSama")]
    OreSama,
}

impl PersonalityType {
    /// All archetypes, in table order.
    pub const ALL: [Self; 4] = [Self::Tsundere, Self::Deredere, Self::Kuudere, Self::OreSama];

    /// Parse the label stored on a companion record.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Tsundere" => Some(Self::Tsundere),
            "Deredere" => Some(Self::Deredere),
            "Kuudere" => Some(Self::Kuudere),
            "Ore-sama" | "OreSama" => Some(Self::OreSama),
            _ => None,
        }
    }

    /// Canonical storage label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Tsundere => "Tsundere",
            Self::Deredere => "Deredere",
            Self::Kuudere => "Kuudere",
            Self::OreSama => "Ore-sama",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Reactions
// ---------------------------------------------------------------------------

/// A reaction the user sends to a companion's story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionType {
    /// Heart.
    #[serde(rename = "reaction_heart")]
    Love,
    /// Fire.
    #[serde(rename = "reaction_fire")]
    Fire,
    /// Laughing face.
    #[serde(rename = "reaction_laugh")]
    Laugh,
    /// Angry face.
    #[serde(rename = "reaction_angry")]
    Angry,
}

impl ReactionType {
    /// All reactions.
    pub const ALL: [Self; 4] = [Self::Love, Self::Fire, Self::Laugh, Self::Angry];

    /// Parse the action label sent by the client.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "reaction_heart" => Some(Self::Love),
            "reaction_fire" => Some(Self::Fire),
            "reaction_laugh" => Some(Self::Laugh),
            "reaction_angry" => Some(Self::Angry),
            _ => None,
        }
    }

    /// Wire label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Love => "reaction_heart",
            Self::Fire => "reaction_fire",
            Self::Laugh => "reaction_laugh",
            Self::Angry => "reaction_angry",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Story mood
// ---------------------------------------------------------------------------

/// Mood tag of the story the user reacted to.
///
/// Stories carry a free-form label; only `"happy"` and `"sad"` change the
/// delta; every other label is [`StoryMood::Neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoryMood {
    /// Uplifting story.
    Happy,
    /// Sad story.
    Sad,
    /// Anything else, including no story at all.
    #[default]
    Neutral,
}

impl StoryMood {
    /// Classify a raw mood label. Matching is exact.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "happy" => Self::Happy,
            "sad" => Self::Sad,
            _ => Self::Neutral,
        }
    }

    /// Canonical label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
        }
    }
}

impl From<&str> for StoryMood {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<String> for StoryMood {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<StoryMood> for String {
    fn from(mood: StoryMood) -> Self {
        mood.label().to_string()
    }
}

impl fmt::Display for StoryMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Companion mood
// ---------------------------------------------------------------------------

/// How a companion currently feels about the user.
///
/// Derived from score and recency; the stored copy is only a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodState {
    /// Score exactly zero.
    #[default]
    Neutral,
    /// Positive score.
    Happy,
    /// High score but the user has been away for more than a day.
    Jealous,
    /// Mildly negative score.
    Annoyed,
    /// Very high score.
    Flirty,
    /// Score below -20.
    Sad,
}

impl MoodState {
    /// Parse a stored mood label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "neutral" => Some(Self::Neutral),
            "happy" => Some(Self::Happy),
            "jealous" => Some(Self::Jealous),
            "annoyed" => Some(Self::Annoyed),
            "flirty" => Some(Self::Flirty),
            "sad" => Some(Self::Sad),
            _ => None,
        }
    }

    /// Storage / wire label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Jealous => "jealous",
            Self::Annoyed => "annoyed",
            Self::Flirty => "flirty",
            Self::Sad => "sad",
        }
    }
}

impl fmt::Display for MoodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Persisted relationship between one user and one companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// The user.
    pub user_id: UserId,
    /// The companion.
    pub companion_id: CompanionId,
    /// Current affinity score, always within [`MIN_AFFINITY`, `MAX_AFFINITY`].
    pub affinity_score: i32,
    /// Mood computed at the last interaction.
    pub current_mood: MoodState,
    /// When the last interaction happened.
    pub last_interaction_at: DateTime<Utc>,
}

impl Relationship {
    /// Recompute the mood as of `now`.
    ///
    /// The cached [`Relationship::current_mood`] goes stale once a day has
    /// passed, since jealousy depends on elapsed time.
    #[must_use]
    pub fn mood_at(&self, now: DateTime<Utc>) -> MoodState {
        crate::engine::classify_mood(self.affinity_score, self.last_interaction_at, now)
    }
}

/// A companion character as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Companion {
    /// Unique identifier.
    pub id: CompanionId,
    /// Display name.
    pub name: String,
    /// Raw personality label; see [`Companion::personality`].
    pub personality_type: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

impl Companion {
    /// Parsed personality, `None` when the stored label is unknown.
    #[must_use]
    pub fn personality(&self) -> Option<PersonalityType> {
        PersonalityType::from_label(&self.personality_type)
    }
}
