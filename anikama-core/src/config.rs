//! Configuration for the Anikama core, loadable from `anikama.toml`.
//!
//! Every section and field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnikamaConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Defaults used when resolving interaction inputs.
    #[serde(default)]
    pub relationship: RelationshipConfig,
    /// Legacy XP / level track.
    #[serde(default)]
    pub progression: ProgressionConfig,
    /// SQLite store settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl AnikamaConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `AffinityError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::AffinityError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log filter used when `RUST_LOG` is unset: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// Defaults for resolving interaction inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipConfig {
    /// Story mood label assumed when the reaction has no story, or the
    /// story has no mood.
    #[serde(default = "default_story_mood")]
    pub default_story_mood: String,
    /// How far in the past a never-seen pair's "last interaction" is placed.
    #[serde(default = "default_240")]
    pub first_contact_lookback_hours: u32,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            default_story_mood: default_story_mood(),
            first_contact_lookback_hours: 240,
        }
    }
}

/// Legacy XP / level rewards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// XP needed per level.
    #[serde(default = "default_100")]
    pub xp_per_level: u32,
    /// XP for viewing a story.
    #[serde(default = "default_5")]
    pub view_story_xp: u32,
    /// XP for sending a chat message.
    #[serde(default = "default_1")]
    pub sent_msg_xp: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_per_level: 100,
            view_story_xp: 5,
            sent_msg_xp: 1,
        }
    }
}

/// SQLite store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Use WAL mode for concurrent reads.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// How long a writer waits on a locked database, in milliseconds.
    #[serde(default = "default_5000")]
    pub busy_timeout_ms: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            wal_mode: true,
            busy_timeout_ms: 5000,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_story_mood() -> String { "neutral".to_string() }
fn default_1() -> u32 { 1 }
fn default_5() -> u32 { 5 }
fn default_100() -> u32 { 100 }
fn default_240() -> u32 { 240 }
fn default_5000() -> u32 { 5000 }
