//! Interaction service: resolves engine inputs from a store, runs the
//! engine, persists the result.
//!
//! This is the collaborator a request handler calls. It owns every
//! fallible step; [`crate::engine`] stays pure.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{AnikamaConfig, ProgressionConfig, RelationshipConfig};
use crate::engine::{self, InteractionInput, InteractionOutcome};
use crate::error::{AffinityError, Result};
use crate::progression::{ProgressOutcome, Progression};
use crate::store::{RelationshipStore, RelationshipUpdate};
use crate::types::{CompanionId, MoodState, ReactionType, StoryId, StoryMood, UserId};

/// A reaction sent by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractRequest {
    /// Companion being reacted to.
    pub companion_id: CompanionId,
    /// Reaction label, e.g. `"reaction_heart"`.
    pub action: String,
    /// Story the reaction was sent from, if any.
    #[serde(default)]
    pub story_id: Option<StoryId>,
}

/// What the client gets back after a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractResponse {
    /// Score after the interaction.
    pub new_score: i32,
    /// Change applied.
    pub delta: i32,
    /// Companion mood after the interaction.
    pub new_mood: MoodState,
    /// Toast text.
    pub toast_message: String,
    /// Reaction video to play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_video_url: Option<String>,
}

impl From<InteractionOutcome> for InteractResponse {
    fn from(outcome: InteractionOutcome) -> Self {
        Self {
            new_score: outcome.new_score,
            delta: outcome.delta,
            new_mood: outcome.new_mood,
            toast_message: outcome.message,
            reaction_video_url: outcome.reaction_asset,
        }
    }
}

impl InteractResponse {
    /// Encode as the JSON body sent to the client.
    ///
    /// # Errors
    /// Returns [`AffinityError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AffinityError::Serialization(e.to_string()))
    }
}

/// Relationship as shown on a companion's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipStatus {
    /// Whether the pair has ever interacted.
    pub found: bool,
    /// Stored score, 0 when not found.
    pub affinity_score: i32,
    /// Cached mood, neutral when not found.
    pub current_mood: MoodState,
    /// Last interaction time, absent when not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction_at: Option<DateTime<Utc>>,
}

/// Runs interactions against a [`RelationshipStore`].
#[derive(Debug)]
pub struct InteractionService<S> {
    store: S,
    config: RelationshipConfig,
    progression: Progression,
}

impl<S: RelationshipStore> InteractionService<S> {
    /// Create a service with default progression rewards.
    #[must_use]
    pub fn new(store: S, config: RelationshipConfig) -> Self {
        Self::with_progression(store, config, ProgressionConfig::default())
    }

    /// Create a service from the full application config.
    #[must_use]
    pub fn from_config(store: S, config: &AnikamaConfig) -> Self {
        Self::with_progression(store, config.relationship.clone(), config.progression.clone())
    }

    /// Create a service with explicit progression rewards.
    #[must_use]
    pub fn with_progression(
        store: S,
        config: RelationshipConfig,
        progression: ProgressionConfig,
    ) -> Self {
        Self {
            store,
            config,
            progression: Progression::new(progression),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a reaction now.
    ///
    /// # Errors
    /// See [`InteractionService::interact_at`].
    pub fn interact(&self, user: UserId, request: &InteractRequest) -> Result<InteractResponse> {
        self.interact_at(user, request, Utc::now())
    }

    /// Apply a reaction at `now`.
    ///
    /// The relationship read, engine run and write happen in one
    /// [`RelationshipStore::modify_relationship`] call.
    ///
    /// # Errors
    /// [`AffinityError::CompanionNotFound`] for an unknown companion; any
    /// store failure while reading the companion or touching the
    /// relationship row. Story and asset lookups degrade instead of failing.
    pub fn interact_at(
        &self,
        user: UserId,
        request: &InteractRequest,
        now: DateTime<Utc>,
    ) -> Result<InteractResponse> {
        let companion = self
            .store
            .fetch_companion(request.companion_id)?
            .ok_or(AffinityError::CompanionNotFound(request.companion_id))?;

        let personality = companion.personality();
        if personality.is_none() {
            warn!(
                companion = %companion.id,
                label = %companion.personality_type,
                "Unknown personality type; using a zero base delta"
            );
        }
        let reaction = ReactionType::from_label(&request.action);
        let story_mood = self.resolve_story_mood(request.story_id);
        let first_contact = self.first_contact_at(now);

        let mut outcome = InteractionOutcome::default();
        self.store.modify_relationship(user, companion.id, now, &mut |current| {
            let input = InteractionInput {
                personality,
                reaction,
                story_mood,
                current_score: current.map_or(0, |r| r.affinity_score),
                last_interaction_at: current.map_or(first_contact, |r| r.last_interaction_at),
                now,
            };
            let result = engine::evaluate(&input, None);
            let update = RelationshipUpdate {
                affinity_score: result.new_score,
                current_mood: result.new_mood,
            };
            outcome = result;
            update
        })?;

        if outcome.delta != 0 {
            outcome.reaction_asset = self.resolve_reaction_asset(companion.id, outcome.delta);
        }

        info!(
            user = %user,
            companion = %companion.id,
            action = %request.action,
            story_mood = %story_mood,
            delta = outcome.delta,
            score = outcome.new_score,
            mood = %outcome.new_mood,
            "Interaction applied"
        );

        Ok(outcome.into())
    }

    /// Current relationship between `user` and `companion`.
    ///
    /// A pair that never interacted reports `found: false`, score 0, neutral.
    ///
    /// # Errors
    /// Any store failure.
    pub fn relationship_status(
        &self,
        user: UserId,
        companion: CompanionId,
    ) -> Result<RelationshipStatus> {
        Ok(match self.store.fetch_relationship(user, companion)? {
            Some(row) => RelationshipStatus {
                found: true,
                affinity_score: row.affinity_score,
                current_mood: row.current_mood,
                last_interaction_at: Some(row.last_interaction_at),
            },
            None => RelationshipStatus {
                found: false,
                affinity_score: 0,
                current_mood: MoodState::Neutral,
                last_interaction_at: None,
            },
        })
    }

    /// Award legacy XP for a passive activity now.
    ///
    /// # Errors
    /// See [`InteractionService::record_activity_at`].
    pub fn record_activity(
        &self,
        user: UserId,
        companion: CompanionId,
        action: &str,
    ) -> Result<ProgressOutcome> {
        self.record_activity_at(user, companion, action, Utc::now())
    }

    /// Award legacy XP for a passive activity at `now`.
    ///
    /// # Errors
    /// [`AffinityError::InvalidAction`] if `action` earns nothing; any store
    /// failure.
    pub fn record_activity_at(
        &self,
        user: UserId,
        companion: CompanionId,
        action: &str,
        now: DateTime<Utc>,
    ) -> Result<ProgressOutcome> {
        let xp_gained = self.progression.xp_for_action(action);
        if xp_gained == 0 {
            return Err(AffinityError::InvalidAction(action.to_string()));
        }

        let current = self.store.fetch_progress(user, companion)?;
        let old_xp = current.map_or(0, |p| p.xp);
        let updated = self.progression.award(current, xp_gained);
        self.store.upsert_progress(user, companion, updated, now)?;

        let leveled_up = self.progression.did_level_up(old_xp, updated.xp);
        debug!(
            user = %user,
            companion = %companion,
            action,
            xp = updated.xp,
            level = updated.level,
            leveled_up,
            "Activity recorded"
        );

        Ok(ProgressOutcome {
            companion_id: companion,
            xp: updated.xp,
            level: updated.level,
            xp_gained,
            leveled_up,
        })
    }

    /// Where a never-seen pair's last interaction is placed. A lookback
    /// past the calendar's range lands on the earliest representable time.
    fn first_contact_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_hours(i64::from(self.config.first_contact_lookback_hours))
            .and_then(|lookback| now.checked_sub_signed(lookback))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn resolve_story_mood(&self, story: Option<StoryId>) -> StoryMood {
        let fallback = StoryMood::from_label(&self.config.default_story_mood);
        let Some(story) = story else {
            return fallback;
        };

        match self.store.fetch_story(story) {
            Ok(Some(found)) => found
                .mood
                .as_deref()
                .map_or(fallback, StoryMood::from_label),
            Ok(None) => {
                debug!(story = %story, "Story not found; using default mood");
                fallback
            }
            Err(e) => {
                warn!(story = %story, error = %e, "Story lookup failed; using default mood");
                fallback
            }
        }
    }

    fn resolve_reaction_asset(&self, companion: CompanionId, delta: i32) -> Option<String> {
        match self.store.fetch_reaction_assets(companion) {
            Ok(assets) => assets.and_then(|a| a.select(delta).map(str::to_owned)),
            Err(e) => {
                warn!(companion = %companion, error = %e, "Reaction asset lookup failed");
                None
            }
        }
    }
}
