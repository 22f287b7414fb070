//! Affinity engine: interaction → (delta, score, mood, toast).
//!
//! Three pure stages run in sequence:
//!
//! 1. [`compute_delta`]: personality × reaction lookup, adjusted by the
//!    mood of the story being reacted to.
//! 2. [`update_score`]: add and clamp to [`MIN_AFFINITY`, `MAX_AFFINITY`].
//! 3. [`classify_mood`]: ordered rule list over score and elapsed time.
//!
//! [`evaluate`] chains them and adds the cosmetic toast/asset stage from
//! [`crate::message`]. Nothing here does I/O or keeps state between calls.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{self, ReactionAssets};
use crate::types::{MAX_AFFINITY, MIN_AFFINITY, MoodState, PersonalityType, ReactionType, StoryMood};

/// Delta applied for an angry reaction, regardless of anything else.
pub const ANGRY_DELTA: i32 = -20;
/// Delta for laughing at a sad story. Replaces the personality base.
pub const SAD_STORY_LAUGH_DELTA: i32 = -10;
/// Bonus applied on top of the base for story-appropriate reactions.
pub const STORY_MOOD_BONUS: i32 = 5;
/// How long a high-affinity companion waits before turning jealous.
pub const JEALOUSY_AFTER_HOURS: i64 = 24;

// ---------------------------------------------------------------------------
// Stage 1: delta
// ---------------------------------------------------------------------------

/// Personality × reaction base table.
///
/// | Personality | Love | Fire | Laugh |
/// |---|---|---|---|
/// | Tsundere | −2 | +5 | −5 |
/// | Deredere | +10 | −2 | +5 |
/// | Kuudere | +2 | 0 | 0 |
/// | Ore-sama | +3 | +5 | +5 |
///
/// Pairs outside the table (anger) are 0.
#[must_use]
pub fn base_delta(personality: PersonalityType, reaction: ReactionType) -> i32 {
    use PersonalityType::{Deredere, Kuudere, OreSama, Tsundere};
    use ReactionType::{Fire, Laugh, Love};

    match (personality, reaction) {
        (Tsundere, Love) => -2,
        (Tsundere, Fire) | (OreSama, Fire | Laugh) => 5,
        (Tsundere, Laugh) => -5,
        (Deredere, Love) => 10,
        (Deredere, Fire) => -2,
        (Deredere, Laugh) => 5,
        (Kuudere, Love) => 2,
        (OreSama, Love) => 3,
        _ => 0,
    }
}

/// Affinity change caused by one reaction.
///
/// Total and deterministic. Anger always costs [`ANGRY_DELTA`]. Love and
/// laughter are adjusted by the story mood; fire never is.
#[must_use]
pub fn compute_delta(
    personality: PersonalityType,
    reaction: ReactionType,
    story_mood: StoryMood,
) -> i32 {
    delta_for(Some(personality), reaction, story_mood)
}

/// [`compute_delta`] for inputs resolved from raw labels.
///
/// An unknown personality contributes a base of 0 but still gets the story
/// adjustment. An unknown reaction changes nothing.
#[must_use]
pub fn compute_delta_lenient(
    personality: Option<PersonalityType>,
    reaction: Option<ReactionType>,
    story_mood: StoryMood,
) -> i32 {
    reaction.map_or(0, |reaction| delta_for(personality, reaction, story_mood))
}

fn delta_for(
    personality: Option<PersonalityType>,
    reaction: ReactionType,
    story_mood: StoryMood,
) -> i32 {
    if reaction == ReactionType::Angry {
        return ANGRY_DELTA;
    }

    let base = personality.map_or(0, |p| base_delta(p, reaction));

    match (story_mood, reaction) {
        (StoryMood::Sad, ReactionType::Laugh) => SAD_STORY_LAUGH_DELTA,
        (StoryMood::Sad | StoryMood::Happy, ReactionType::Love)
        | (StoryMood::Happy, ReactionType::Laugh) => base + STORY_MOOD_BONUS,
        _ => base,
    }
}

// ---------------------------------------------------------------------------
// Stage 2: score
// ---------------------------------------------------------------------------

/// Apply `delta` and clamp into [`MIN_AFFINITY`, `MAX_AFFINITY`].
///
/// Saturating for any pair of `i32`s; never wraps.
#[must_use]
pub fn update_score(current_score: i32, delta: i32) -> i32 {
    current_score.saturating_add(delta).clamp(MIN_AFFINITY, MAX_AFFINITY)
}

// ---------------------------------------------------------------------------
// Stage 3: mood
// ---------------------------------------------------------------------------

/// One entry of the mood decision list.
#[derive(Debug, Clone, Copy)]
pub struct MoodRule {
    /// Mood produced when the rule matches.
    pub mood: MoodState,
    /// Predicate over (score, time since last interaction).
    pub applies: fn(i32, Duration) -> bool,
}

fn heartbroken(score: i32, _: Duration) -> bool {
    score < -20
}

fn neglected(score: i32, elapsed: Duration) -> bool {
    score > 50 && elapsed > Duration::hours(JEALOUSY_AFTER_HOURS)
}

fn smitten(score: i32, _: Duration) -> bool {
    score > 80
}

fn negative(score: i32, _: Duration) -> bool {
    score < 0
}

fn positive(score: i32, _: Duration) -> bool {
    score > 0
}

fn always(_: i32, _: Duration) -> bool {
    true
}

/// Mood rules in evaluation order. The first match wins.
///
/// Jealousy sits before flirting: a high score with a long absence reads
/// as jealous even above 80.
pub const MOOD_RULES: [MoodRule; 6] = [
    MoodRule { mood: MoodState::Sad, applies: heartbroken },
    MoodRule { mood: MoodState::Jealous, applies: neglected },
    MoodRule { mood: MoodState::Flirty, applies: smitten },
    MoodRule { mood: MoodState::Annoyed, applies: negative },
    MoodRule { mood: MoodState::Happy, applies: positive },
    MoodRule { mood: MoodState::Neutral, applies: always },
];

/// Classify the companion's mood from score and time since last contact.
#[must_use]
pub fn classify_mood(
    score: i32,
    last_interaction_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> MoodState {
    classify_mood_elapsed(score, now.signed_duration_since(last_interaction_at))
}

/// [`classify_mood`] with the elapsed time already computed.
#[must_use]
pub fn classify_mood_elapsed(score: i32, elapsed: Duration) -> MoodState {
    MOOD_RULES
        .iter()
        .find(|rule| (rule.applies)(score, elapsed))
        .map_or(MoodState::Neutral, |rule| rule.mood)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Everything the engine needs for one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionInput {
    /// Companion archetype; `None` when the stored label was not recognised.
    pub personality: Option<PersonalityType>,
    /// Reaction sent; `None` when the action label was not recognised.
    pub reaction: Option<ReactionType>,
    /// Mood of the story reacted to.
    pub story_mood: StoryMood,
    /// Score before this interaction.
    pub current_score: i32,
    /// When the previous interaction happened.
    pub last_interaction_at: DateTime<Utc>,
    /// When this interaction happens.
    pub now: DateTime<Utc>,
}

impl InteractionInput {
    /// Input for fully resolved personality and reaction.
    #[must_use]
    pub fn new(
        personality: PersonalityType,
        reaction: ReactionType,
        story_mood: StoryMood,
        current_score: i32,
        last_interaction_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            personality: Some(personality),
            reaction: Some(reaction),
            story_mood,
            current_score,
            last_interaction_at,
            now,
        }
    }
}

/// Result of running the engine over one interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOutcome {
    /// Signed change applied to the score.
    pub delta: i32,
    /// Score after clamping.
    pub new_score: i32,
    /// Mood after this interaction.
    pub new_mood: MoodState,
    /// Toast shown to the user.
    pub message: String,
    /// Reaction video to play, if any.
    pub reaction_asset: Option<String>,
}

/// Run the whole pipeline.
///
/// `assets` are the companion's reaction videos; pass `None` when the
/// companion has none.
#[must_use]
pub fn evaluate(input: &InteractionInput, assets: Option<&ReactionAssets>) -> InteractionOutcome {
    let delta = compute_delta_lenient(input.personality, input.reaction, input.story_mood);
    let new_score = update_score(input.current_score, delta);
    let new_mood = classify_mood(new_score, input.last_interaction_at, input.now);
    let message = message::generate_message(input.personality, new_mood, delta);
    let reaction_asset = assets.and_then(|a| a.select(delta)).map(str::to_owned);

    InteractionOutcome {
        delta,
        new_score,
        new_mood,
        message: message.to_owned(),
        reaction_asset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).single().expect("valid date")
    }

    fn hours(h: i64) -> Duration {
        Duration::hours(h)
    }

    #[test]
    fn anger_always_costs_twenty() {
        for p in PersonalityType::ALL {
            for mood in [StoryMood::Happy, StoryMood::Sad, StoryMood::Neutral] {
                assert_eq!(compute_delta(p, ReactionType::Angry, mood), -20, "{p} / {mood}");
            }
        }
        assert_eq!(
            compute_delta_lenient(None, Some(ReactionType::Angry), StoryMood::Happy),
            -20
        );
    }

    #[test]
    fn base_table_on_neutral_stories() {
        use PersonalityType::*;
        use ReactionType::*;

        let expected = [
            (Tsundere, [-2, 5, -5]),
            (Deredere, [10, -2, 5]),
            (Kuudere, [2, 0, 0]),
            (OreSama, [3, 5, 5]),
        ];
        for (p, row) in expected {
            for (reaction, want) in [Love, Fire, Laugh].into_iter().zip(row) {
                assert_eq!(compute_delta(p, reaction, StoryMood::Neutral), want, "{p} {reaction}");
            }
        }
    }

    #[test]
    fn happy_story_boosts_love() {
        assert_eq!(
            compute_delta(PersonalityType::Deredere, ReactionType::Love, StoryMood::Happy),
            15
        );
        assert_eq!(
            compute_delta(PersonalityType::Tsundere, ReactionType::Love, StoryMood::Happy),
            3
        );
    }

    #[test]
    fn happy_story_boosts_laughter() {
        assert_eq!(
            compute_delta(PersonalityType::Tsundere, ReactionType::Laugh, StoryMood::Happy),
            0
        );
        assert_eq!(
            compute_delta(PersonalityType::OreSama, ReactionType::Laugh, StoryMood::Happy),
            10
        );
    }

    #[test]
    fn laughing_at_sad_story_replaces_base() {
        for p in PersonalityType::ALL {
            assert_eq!(compute_delta(p, ReactionType::Laugh, StoryMood::Sad), -10, "{p}");
        }
    }

    #[test]
    fn sad_story_still_rewards_love() {
        assert_eq!(compute_delta(PersonalityType::Kuudere, ReactionType::Love, StoryMood::Sad), 7);
        assert_eq!(compute_delta(PersonalityType::Tsundere, ReactionType::Love, StoryMood::Sad), 3);
    }

    #[test]
    fn fire_ignores_story_mood() {
        for p in PersonalityType::ALL {
            let neutral = compute_delta(p, ReactionType::Fire, StoryMood::Neutral);
            assert_eq!(compute_delta(p, ReactionType::Fire, StoryMood::Happy), neutral);
            assert_eq!(compute_delta(p, ReactionType::Fire, StoryMood::Sad), neutral);
        }
    }

    #[test]
    fn unknown_labels_are_lenient() {
        assert_eq!(compute_delta_lenient(None, Some(ReactionType::Love), StoryMood::Neutral), 0);
        assert_eq!(compute_delta_lenient(None, Some(ReactionType::Love), StoryMood::Happy), 5);
        assert_eq!(compute_delta_lenient(None, Some(ReactionType::Laugh), StoryMood::Sad), -10);
        assert_eq!(
            compute_delta_lenient(Some(PersonalityType::Deredere), None, StoryMood::Happy),
            0
        );
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(update_score(95, 15), 100);
        assert_eq!(update_score(-90, -20), -100);
        assert_eq!(update_score(10, -2), 8);
        assert_eq!(update_score(i32::MAX, i32::MAX), 100);
        assert_eq!(update_score(i32::MIN, -1), -100);
    }

    #[test]
    fn jealousy_depends_on_elapsed_time() {
        let now = t0();
        assert_eq!(classify_mood(60, now - hours(25), now), MoodState::Jealous);
        assert_eq!(classify_mood(60, now - hours(1), now), MoodState::Happy);
    }

    #[test]
    fn jealousy_takes_precedence_over_flirting() {
        let now = t0();
        assert_eq!(classify_mood(90, now - hours(48), now), MoodState::Jealous);
        assert_eq!(classify_mood(90, now - hours(2), now), MoodState::Flirty);
    }

    #[test]
    fn jealousy_needs_strictly_more_than_a_day() {
        let now = t0();
        assert_eq!(classify_mood(70, now - hours(24), now), MoodState::Happy);
        assert_eq!(
            classify_mood(70, now - hours(24) - Duration::seconds(1), now),
            MoodState::Jealous
        );
        assert_eq!(classify_mood(50, now - hours(100), now), MoodState::Happy);
    }

    #[test]
    fn heartbreak_ignores_elapsed_time() {
        let now = t0();
        for elapsed in [0, 1, 25, 1_000] {
            assert_eq!(classify_mood(-25, now - hours(elapsed), now), MoodState::Sad);
        }
    }

    #[test]
    fn mood_boundaries() {
        let recent = hours(1);
        assert_eq!(classify_mood_elapsed(-21, recent), MoodState::Sad);
        assert_eq!(classify_mood_elapsed(-20, recent), MoodState::Annoyed);
        assert_eq!(classify_mood_elapsed(-1, recent), MoodState::Annoyed);
        assert_eq!(classify_mood_elapsed(0, recent), MoodState::Neutral);
        assert_eq!(classify_mood_elapsed(1, recent), MoodState::Happy);
        assert_eq!(classify_mood_elapsed(80, recent), MoodState::Happy);
        assert_eq!(classify_mood_elapsed(81, recent), MoodState::Flirty);
        assert_eq!(classify_mood_elapsed(0, hours(500)), MoodState::Neutral);
    }

    #[test]
    fn evaluate_runs_all_stages() {
        let now = t0();
        let assets = ReactionAssets::new("https://cdn/happy.mp4", "https://cdn/sad.mp4");
        let input = InteractionInput::new(
            PersonalityType::Deredere,
            ReactionType::Love,
            StoryMood::Happy,
            40,
            now - hours(2),
            now,
        );

        let outcome = evaluate(&input, Some(&assets));
        assert_eq!(outcome.delta, 15);
        assert_eq!(outcome.new_score, 55);
        assert_eq!(outcome.new_mood, MoodState::Happy);
        assert_eq!(outcome.message, message::POSITIVE_MESSAGE);
        assert_eq!(outcome.reaction_asset.as_deref(), Some("https://cdn/happy.mp4"));
    }

    #[test]
    fn scripted_deredere_trace() {
        use ReactionType::{Angry, Fire, Laugh, Love};
        use StoryMood::{Happy, Neutral, Sad};

        // (reaction, story mood, hours since previous, delta, score, mood)
        let script = [
            (Love, Happy, 240, 15, 15, MoodState::Happy),
            (Love, Neutral, 1, 10, 25, MoodState::Happy),
            (Laugh, Sad, 1, -10, 15, MoodState::Happy),
            (Love, Happy, 1, 15, 30, MoodState::Happy),
            (Love, Happy, 1, 15, 45, MoodState::Happy),
            (Love, Happy, 1, 15, 60, MoodState::Happy),
            (Fire, Happy, 30, -2, 58, MoodState::Jealous),
            (Love, Sad, 2, 15, 73, MoodState::Happy),
            (Love, Happy, 1, 15, 88, MoodState::Flirty),
            (Love, Happy, 1, 15, 100, MoodState::Flirty),
            (Angry, Neutral, 48, -20, 80, MoodState::Jealous),
            (Angry, Neutral, 1, -20, 60, MoodState::Happy),
            (Angry, Neutral, 1, -20, 40, MoodState::Happy),
            (Angry, Neutral, 1, -20, 20, MoodState::Happy),
            (Angry, Neutral, 1, -20, 0, MoodState::Neutral),
            (Angry, Neutral, 1, -20, -20, MoodState::Annoyed),
            (Angry, Neutral, 1, -20, -40, MoodState::Sad),
        ];

        let mut score = 0;
        let mut now = t0();
        for (step, (reaction, story, gap, delta, expect_score, expect_mood)) in
            script.into_iter().enumerate()
        {
            let last = now;
            now += hours(gap);
            let input = InteractionInput::new(
                PersonalityType::Deredere,
                reaction,
                story,
                score,
                last,
                now,
            );
            let outcome = evaluate(&input, None);
            assert_eq!(outcome.delta, delta, "step {step}: delta");
            assert_eq!(outcome.new_score, expect_score, "step {step}: score");
            assert_eq!(outcome.new_mood, expect_mood, "step {step}: mood");
            assert!(outcome.reaction_asset.is_none());
            score = outcome.new_score;
        }

        assert_eq!(score, -40);
    }
}
