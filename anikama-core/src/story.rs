//! Companion stories and premium locking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CompanionId, StoryId, StoryMood};

/// Subscription tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    /// Free account.
    #[default]
    Free,
    /// Paying account; sees premium stories.
    Premium,
}

impl UserTier {
    /// Parse a stored tier label. Anything unrecognised is `Free`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == "premium" { Self::Premium } else { Self::Free }
    }
}

/// Kind of media a story shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

impl MediaType {
    /// Parse a stored media label; anything but `"video"` is an image.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == "video" { Self::Video } else { Self::Image }
    }

    /// Storage label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// A story posted by a companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Unique identifier.
    pub id: StoryId,
    /// Companion who posted it.
    pub companion_id: CompanionId,
    /// Media location; empty when redacted.
    pub media_url: String,
    /// Image or video.
    pub media_type: MediaType,
    /// Display duration in seconds.
    pub duration: u32,
    /// Position within the companion's story ring.
    pub order_index: u32,
    /// Free-form mood label, if any.
    pub mood: Option<String>,
    /// Only premium users may view it.
    pub is_premium: bool,
    /// Computed for the viewer; never stored.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_locked: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Mood that applies to reactions on this story.
    #[must_use]
    pub fn story_mood(&self) -> StoryMood {
        self.mood.as_deref().map_or(StoryMood::Neutral, StoryMood::from_label)
    }

    /// This story as seen by a viewer on `tier`.
    ///
    /// Premium stories are locked for free users and their media URL is
    /// blanked.
    #[must_use]
    pub fn locked_for(mut self, tier: UserTier) -> Self {
        self.is_locked = self.is_premium && tier != UserTier::Premium;
        if self.is_locked {
            self.media_url.clear();
        }
        self
    }
}
