//! The persistence boundary.
//!
//! The engine never reads or writes storage itself. Whatever sits behind
//! [`RelationshipStore`] owns the relationship rows and is responsible for
//! applying updates to one (user, companion) pair atomically.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::message::ReactionAssets;
use crate::progression::AffinityProgress;
use crate::story::Story;
use crate::types::{Companion, CompanionId, MoodState, Relationship, StoryId, UserId};

/// New state for a relationship row, produced by a read-modify-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipUpdate {
    /// Score to store.
    pub affinity_score: i32,
    /// Mood to cache alongside it.
    pub current_mood: MoodState,
}

/// Storage collaborator for the interaction service.
pub trait RelationshipStore: Send + Sync {
    /// Look up a companion.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    fn fetch_companion(&self, companion: CompanionId) -> Result<Option<Companion>>;

    /// Look up a story.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    fn fetch_story(&self, story: StoryId) -> Result<Option<Story>>;

    /// Look up a companion's reaction videos.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    fn fetch_reaction_assets(&self, companion: CompanionId) -> Result<Option<ReactionAssets>>;

    /// Current relationship row for a pair, if one exists.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    fn fetch_relationship(
        &self,
        user: UserId,
        companion: CompanionId,
    ) -> Result<Option<Relationship>>;

    /// Insert or overwrite the relationship row for a pair.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    fn upsert_relationship(
        &self,
        user: UserId,
        companion: CompanionId,
        affinity_score: i32,
        current_mood: MoodState,
        now: DateTime<Utc>,
    ) -> Result<()>;

    /// Read the current row, compute its replacement with `apply`, store it
    /// stamped with `now`, and return what was stored.
    ///
    /// The default is a plain fetch followed by an upsert, which can lose an
    /// update when two callers race on the same pair. Implementations that
    /// can serialise the two steps should override it.
    ///
    /// # Errors
    /// Returns an error if the backing store fails. Nothing is written in
    /// that case.
    fn modify_relationship(
        &self,
        user: UserId,
        companion: CompanionId,
        now: DateTime<Utc>,
        apply: &mut dyn FnMut(Option<&Relationship>) -> RelationshipUpdate,
    ) -> Result<Relationship> {
        let current = self.fetch_relationship(user, companion)?;
        let update = apply(current.as_ref());
        self.upsert_relationship(user, companion, update.affinity_score, update.current_mood, now)?;
        Ok(Relationship {
            user_id: user,
            companion_id: companion,
            affinity_score: update.affinity_score,
            current_mood: update.current_mood,
            last_interaction_at: now,
        })
    }

    /// Legacy XP state for a pair.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    fn fetch_progress(
        &self,
        user: UserId,
        companion: CompanionId,
    ) -> Result<Option<AffinityProgress>>;

    /// Insert or overwrite the legacy XP state for a pair.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    fn upsert_progress(
        &self,
        user: UserId,
        companion: CompanionId,
        progress: AffinityProgress,
        now: DateTime<Utc>,
    ) -> Result<()>;
}
