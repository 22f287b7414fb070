//! SQLite implementation of [`RelationshipStore`].
//!
//! Schema:
//!
//! ```sql
//! CREATE TABLE companions     (id PK, name, personality_type, avatar_url);
//! CREATE TABLE stories        (id PK, companion_id, media_url, media_type,
//!                              duration, order_index, mood NULL, is_premium, created_at);
//! CREATE TABLE reactions      (companion_id PK, happy_reaction_url, sad_reaction_url);
//! CREATE TABLE relationships  (user_id, companion_id, affinity_score,
//!                              current_mood, last_interaction_at,
//!                              PRIMARY KEY (user_id, companion_id));
//! CREATE TABLE user_affinity  (user_id, companion_id, xp, level, last_interaction,
//!                              PRIMARY KEY (user_id, companion_id));
//! ```
//!
//! IDs are stored as UUID text and timestamps as RFC 3339 text. The single
//! connection sits behind a mutex; relationship read-modify-writes run in an
//! `IMMEDIATE` transaction so concurrent interactions on one pair serialise.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, TransactionBehavior, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PersistenceConfig;
use crate::error::{AffinityError, Result};
use crate::message::ReactionAssets;
use crate::progression::AffinityProgress;
use crate::store::{RelationshipStore, RelationshipUpdate};
use crate::story::{MediaType, Story};
use crate::types::{Companion, CompanionId, MoodState, Relationship, StoryId, UserId};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS companions (
        id               TEXT PRIMARY KEY,
        name             TEXT NOT NULL,
        personality_type TEXT NOT NULL,
        avatar_url       TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE IF NOT EXISTS stories (
        id           TEXT PRIMARY KEY,
        companion_id TEXT NOT NULL REFERENCES companions(id) ON DELETE CASCADE,
        media_url    TEXT NOT NULL,
        media_type   TEXT NOT NULL,
        duration     INTEGER NOT NULL,
        order_index  INTEGER NOT NULL,
        mood         TEXT,
        is_premium   INTEGER NOT NULL DEFAULT 0,
        created_at   TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS reactions (
        companion_id       TEXT PRIMARY KEY REFERENCES companions(id) ON DELETE CASCADE,
        happy_reaction_url TEXT NOT NULL,
        sad_reaction_url   TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS relationships (
        user_id             TEXT NOT NULL,
        companion_id        TEXT NOT NULL,
        affinity_score      INTEGER NOT NULL,
        current_mood        TEXT NOT NULL,
        last_interaction_at TEXT NOT NULL,
        PRIMARY KEY (user_id, companion_id)
    );
    CREATE TABLE IF NOT EXISTS user_affinity (
        user_id          TEXT NOT NULL,
        companion_id     TEXT NOT NULL,
        xp               INTEGER NOT NULL,
        level            INTEGER NOT NULL,
        last_interaction TEXT NOT NULL,
        PRIMARY KEY (user_id, companion_id)
    );
";

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

fn decode_uuid(table: &'static str, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AffinityError::CorruptRecord {
        table,
        reason: format!("invalid id '{raw}': {e}"),
    })
}

fn decode_time(table: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AffinityError::CorruptRecord {
            table,
            reason: format!("invalid timestamp '{raw}': {e}"),
        })
}

fn decode_mood(raw: &str) -> Result<MoodState> {
    MoodState::from_label(raw).ok_or_else(|| AffinityError::CorruptRecord {
        table: "relationships",
        reason: format!("unknown mood '{raw}'"),
    })
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// Handle to an open SQLite database holding companions, stories and
/// relationships.
///
/// # Usage
///
/// ```no_run
/// # use anikama_core::persistence::SqliteStore;
/// # use anikama_core::config::PersistenceConfig;
/// # use anikama_core::store::RelationshipStore;
/// # use anikama_core::types::{CompanionId, UserId};
/// let store = SqliteStore::open("anikama.db", &PersistenceConfig::default())?;
/// let row = store.fetch_relationship(UserId::new(), CompanionId::new())?;
/// assert!(row.is_none());
/// # Ok::<(), anikama_core::error::AffinityError>(())
/// ```
pub struct SqliteStore {
    conn: Mutex<Connection>,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) an SQLite database at `path`.
    ///
    /// The schema is created if it does not exist. WAL mode is enabled when
    /// `config.wal_mode` is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;
        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        Self::prepare(&conn, config)?;

        info!(
            path = %db_path.display(),
            wal = config.wal_mode,
            "Relationship store opened"
        );

        Ok(Self {
            conn: Mutex::new(conn),
            config: config.clone(),
            db_path,
        })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(&conn, config)?;

        Ok(Self {
            conn: Mutex::new(conn),
            config: config.clone(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn prepare(conn: &Connection, config: &PersistenceConfig) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_millis(u64::from(config.busy_timeout_ms)))?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------

    /// Insert or replace a companion.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] on SQLite failures.
    pub fn insert_companion(&self, companion: &Companion) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO companions (id, name, personality_type, avatar_url)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                personality_type = excluded.personality_type,
                avatar_url = excluded.avatar_url",
            params![
                companion.id.0.to_string(),
                companion.name,
                companion.personality_type,
                companion.avatar_url
            ],
        )?;
        Ok(())
    }

    /// Insert or replace a story. The companion must exist.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] on SQLite failures, including a
    /// foreign-key violation for an unknown companion.
    pub fn insert_story(&self, story: &Story) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO stories
                (id, companion_id, media_url, media_type, duration, order_index,
                 mood, is_premium, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                companion_id = excluded.companion_id,
                media_url = excluded.media_url,
                media_type = excluded.media_type,
                duration = excluded.duration,
                order_index = excluded.order_index,
                mood = excluded.mood,
                is_premium = excluded.is_premium,
                created_at = excluded.created_at",
            params![
                story.id.0.to_string(),
                story.companion_id.0.to_string(),
                story.media_url,
                story.media_type.label(),
                story.duration,
                story.order_index,
                story.mood,
                story.is_premium,
                story.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Set a companion's reaction videos.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] on SQLite failures.
    pub fn insert_reaction_assets(
        &self,
        companion: CompanionId,
        assets: &ReactionAssets,
    ) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO reactions (companion_id, happy_reaction_url, sad_reaction_url)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(companion_id) DO UPDATE SET
                happy_reaction_url = excluded.happy_reaction_url,
                sad_reaction_url = excluded.sad_reaction_url",
            params![
                companion.0.to_string(),
                assets.happy_reaction_url,
                assets.sad_reaction_url
            ],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Relationship rows
    // ------------------------------------------------------------------

    fn query_relationship(
        conn: &Connection,
        user: UserId,
        companion: CompanionId,
    ) -> Result<Option<Relationship>> {
        let row: Option<(i32, String, String)> = conn
            .prepare_cached(
                "SELECT affinity_score, current_mood, last_interaction_at
                 FROM relationships
                 WHERE user_id = ?1 AND companion_id = ?2",
            )?
            .query_row(params![user.0.to_string(), companion.0.to_string()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()?;

        let Some((affinity_score, mood, last)) = row else {
            return Ok(None);
        };

        Ok(Some(Relationship {
            user_id: user,
            companion_id: companion,
            affinity_score,
            current_mood: decode_mood(&mood)?,
            last_interaction_at: decode_time("relationships", &last)?,
        }))
    }

    fn write_relationship(
        conn: &Connection,
        user: UserId,
        companion: CompanionId,
        update: RelationshipUpdate,
        now: DateTime<Utc>,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO relationships
                (user_id, companion_id, affinity_score, current_mood, last_interaction_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, companion_id) DO UPDATE SET
                affinity_score = excluded.affinity_score,
                current_mood = excluded.current_mood,
                last_interaction_at = excluded.last_interaction_at",
            params![
                user.0.to_string(),
                companion.0.to_string(),
                update.affinity_score,
                update.current_mood.label(),
                now.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Utility
    // ------------------------------------------------------------------

    /// Number of stored relationship rows.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] on SQLite failures.
    pub fn relationship_count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .lock()
                .query_row("SELECT COUNT(*) FROM relationships", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Copy the database to `dest_path` using SQLite's online-backup API.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] on SQLite failures.
    pub fn backup<P: AsRef<Path>>(&self, dest_path: P) -> Result<()> {
        let start = Instant::now();
        let mut dest = Connection::open(dest_path.as_ref())?;
        let conn = self.conn.lock();
        let backup = rusqlite::backup::Backup::new(&conn, &mut dest)?;
        backup.run_to_completion(256, Duration::from_millis(50), None)?;

        info!(
            dest = %dest_path.as_ref().display(),
            elapsed_ms = start.elapsed().as_millis(),
            "Database backup completed"
        );
        Ok(())
    }

    /// Path to the database file (or `:memory:`).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run an integrity check on the database.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Database`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let result: String =
            self.conn
                .lock()
                .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok(result == "ok")
    }
}

impl RelationshipStore for SqliteStore {
    fn fetch_companion(&self, companion: CompanionId) -> Result<Option<Companion>> {
        let conn = self.conn.lock();
        let row: Option<(String, String, String)> = conn
            .prepare_cached(
                "SELECT name, personality_type, avatar_url FROM companions WHERE id = ?1",
            )?
            .query_row(params![companion.0.to_string()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()?;

        Ok(row.map(|(name, personality_type, avatar_url)| Companion {
            id: companion,
            name,
            personality_type,
            avatar_url,
        }))
    }

    fn fetch_story(&self, story: StoryId) -> Result<Option<Story>> {
        type StoryRow = (String, String, String, u32, u32, Option<String>, bool, String);

        let conn = self.conn.lock();
        let row: Option<StoryRow> = conn
            .prepare_cached(
                "SELECT companion_id, media_url, media_type, duration, order_index,
                        mood, is_premium, created_at
                 FROM stories WHERE id = ?1",
            )?
            .query_row(params![story.0.to_string()], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ))
            })
            .optional()?;

        let Some((
            companion_id,
            media_url,
            media_type,
            duration,
            order_index,
            mood,
            is_premium,
            created_at,
        )) = row
        else {
            return Ok(None);
        };

        Ok(Some(Story {
            id: story,
            companion_id: CompanionId(decode_uuid("stories", &companion_id)?),
            media_url,
            media_type: MediaType::from_label(&media_type),
            duration,
            order_index,
            mood,
            is_premium,
            is_locked: false,
            created_at: decode_time("stories", &created_at)?,
        }))
    }

    fn fetch_reaction_assets(&self, companion: CompanionId) -> Result<Option<ReactionAssets>> {
        let conn = self.conn.lock();
        let assets = conn
            .prepare_cached(
                "SELECT happy_reaction_url, sad_reaction_url
                 FROM reactions WHERE companion_id = ?1",
            )?
            .query_row(params![companion.0.to_string()], |row| {
                Ok(ReactionAssets {
                    happy_reaction_url: row.get(0)?,
                    sad_reaction_url: row.get(1)?,
                })
            })
            .optional()?;
        Ok(assets)
    }

    fn fetch_relationship(
        &self,
        user: UserId,
        companion: CompanionId,
    ) -> Result<Option<Relationship>> {
        Self::query_relationship(&self.conn.lock(), user, companion)
    }

    fn upsert_relationship(
        &self,
        user: UserId,
        companion: CompanionId,
        affinity_score: i32,
        current_mood: MoodState,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let update = RelationshipUpdate { affinity_score, current_mood };
        Self::write_relationship(&self.conn.lock(), user, companion, update, now)
    }

    fn modify_relationship(
        &self,
        user: UserId,
        companion: CompanionId,
        now: DateTime<Utc>,
        apply: &mut dyn FnMut(Option<&Relationship>) -> RelationshipUpdate,
    ) -> Result<Relationship> {
        let start = Instant::now();
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = Self::query_relationship(&tx, user, companion)?;
        let update = apply(current.as_ref());
        Self::write_relationship(&tx, user, companion, update, now)?;
        tx.commit()?;

        debug!(
            user = %user,
            companion = %companion,
            previous = current.as_ref().map(|r| r.affinity_score),
            score = update.affinity_score,
            mood = %update.current_mood,
            elapsed_us = start.elapsed().as_micros(),
            "Relationship updated"
        );

        Ok(Relationship {
            user_id: user,
            companion_id: companion,
            affinity_score: update.affinity_score,
            current_mood: update.current_mood,
            last_interaction_at: now,
        })
    }

    fn fetch_progress(
        &self,
        user: UserId,
        companion: CompanionId,
    ) -> Result<Option<AffinityProgress>> {
        let conn = self.conn.lock();
        let progress = conn
            .prepare_cached(
                "SELECT xp, level FROM user_affinity WHERE user_id = ?1 AND companion_id = ?2",
            )?
            .query_row(params![user.0.to_string(), companion.0.to_string()], |row| {
                Ok(AffinityProgress {
                    xp: row.get(0)?,
                    level: row.get(1)?,
                })
            })
            .optional()?;
        Ok(progress)
    }

    fn upsert_progress(
        &self,
        user: UserId,
        companion: CompanionId,
        progress: AffinityProgress,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO user_affinity (user_id, companion_id, xp, level, last_interaction)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, companion_id) DO UPDATE SET
                xp = excluded.xp,
                level = excluded.level,
                last_interaction = excluded.last_interaction",
            params![
                user.0.to_string(),
                companion.0.to_string(),
                progress.xp,
                progress.level,
                now.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory(&PersistenceConfig::default()).expect("open")
    }

    fn companion(personality: &str) -> Companion {
        Companion {
            id: CompanionId::new(),
            name: "Asuka".to_string(),
            personality_type: personality.to_string(),
            avatar_url: "https://cdn/asuka.png".to_string(),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).single().expect("valid date")
    }

    #[test]
    fn companion_round_trip() {
        let store = store();
        let asuka = companion("Tsundere");
        store.insert_companion(&asuka).expect("insert");

        let loaded = store.fetch_companion(asuka.id).expect("fetch").expect("Some");
        assert_eq!(loaded, asuka);
        assert!(store.fetch_companion(CompanionId::new()).expect("fetch").is_none());
    }

    #[test]
    fn story_round_trip() {
        let store = store();
        let asuka = companion("Tsundere");
        store.insert_companion(&asuka).expect("insert");

        let story = Story {
            id: StoryId::new(),
            companion_id: asuka.id,
            media_url: "https://cdn/beach.jpg".to_string(),
            media_type: MediaType::Image,
            duration: 5,
            order_index: 2,
            mood: Some("happy".to_string()),
            is_premium: true,
            is_locked: false,
            created_at: at(9),
        };
        store.insert_story(&story).expect("insert story");

        let loaded = store.fetch_story(story.id).expect("fetch").expect("Some");
        assert_eq!(loaded, story);
    }

    #[test]
    fn story_requires_existing_companion() {
        let store = store();
        let story = Story {
            id: StoryId::new(),
            companion_id: CompanionId::new(),
            media_url: String::new(),
            media_type: MediaType::Video,
            duration: 10,
            order_index: 0,
            mood: None,
            is_premium: false,
            is_locked: false,
            created_at: at(9),
        };
        assert!(matches!(store.insert_story(&story), Err(AffinityError::Database(_))));
    }

    #[test]
    fn reaction_assets_round_trip() {
        let store = store();
        let asuka = companion("Tsundere");
        store.insert_companion(&asuka).expect("insert");
        assert!(store.fetch_reaction_assets(asuka.id).expect("fetch").is_none());

        let assets = ReactionAssets::new("https://cdn/happy.mp4", "https://cdn/sad.mp4");
        store.insert_reaction_assets(asuka.id, &assets).expect("insert assets");
        assert_eq!(store.fetch_reaction_assets(asuka.id).expect("fetch"), Some(assets));
    }

    #[test]
    fn relationship_upsert_overwrites() {
        let store = store();
        let (user, comp) = (UserId::new(), CompanionId::new());

        store
            .upsert_relationship(user, comp, 10, MoodState::Happy, at(8))
            .expect("first");
        store
            .upsert_relationship(user, comp, -30, MoodState::Sad, at(9))
            .expect("second");

        let row = store.fetch_relationship(user, comp).expect("fetch").expect("Some");
        assert_eq!(row.affinity_score, -30);
        assert_eq!(row.current_mood, MoodState::Sad);
        assert_eq!(row.last_interaction_at, at(9));
        assert_eq!(store.relationship_count().expect("count"), 1);
    }

    #[test]
    fn modify_relationship_sees_previous_row() {
        let store = store();
        let (user, comp) = (UserId::new(), CompanionId::new());

        let first = store
            .modify_relationship(user, comp, at(8), &mut |current| {
                assert!(current.is_none());
                RelationshipUpdate { affinity_score: 5, current_mood: MoodState::Happy }
            })
            .expect("first");
        assert_eq!(first.affinity_score, 5);

        let second = store
            .modify_relationship(user, comp, at(9), &mut |current| {
                let current = current.expect("row exists");
                assert_eq!(current.last_interaction_at, at(8));
                RelationshipUpdate {
                    affinity_score: current.affinity_score + 10,
                    current_mood: MoodState::Happy,
                }
            })
            .expect("second");
        assert_eq!(second.affinity_score, 15);
        assert_eq!(second.last_interaction_at, at(9));
    }

    #[test]
    fn corrupt_mood_is_reported() {
        let store = store();
        let (user, comp) = (UserId::new(), CompanionId::new());
        store
            .upsert_relationship(user, comp, 10, MoodState::Happy, at(8))
            .expect("upsert");
        store
            .conn
            .lock()
            .execute("UPDATE relationships SET current_mood = 'ecstatic'", [])
            .expect("corrupt");

        let err = store.fetch_relationship(user, comp).expect_err("should fail");
        assert!(matches!(err, AffinityError::CorruptRecord { table: "relationships", .. }));
    }

    #[test]
    fn progress_round_trip() {
        let store = store();
        let (user, comp) = (UserId::new(), CompanionId::new());
        assert!(store.fetch_progress(user, comp).expect("fetch").is_none());

        let progress = AffinityProgress { xp: 105, level: 2 };
        store.upsert_progress(user, comp, progress, at(10)).expect("upsert");
        assert_eq!(store.fetch_progress(user, comp).expect("fetch"), Some(progress));
    }

    #[test]
    fn integrity_check_passes() {
        assert!(store().integrity_check().expect("check"));
    }

    #[test]
    fn in_memory_store_reports_memory_path() {
        assert_eq!(store().db_path(), Path::new(":memory:"));
    }

    #[test]
    fn file_based_open_and_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("anikama.db");
        let config = PersistenceConfig::default();

        let store = SqliteStore::open(&db_path, &config).expect("open");
        assert_eq!(store.db_path(), db_path.as_path());
        let (user, comp) = (UserId::new(), CompanionId::new());
        store
            .upsert_relationship(user, comp, 42, MoodState::Happy, at(12))
            .expect("upsert");

        let backup_path = dir.path().join("anikama_backup.db");
        store.backup(&backup_path).expect("backup");

        let restored = SqliteStore::open(&backup_path, &config).expect("open backup");
        let row = restored.fetch_relationship(user, comp).expect("fetch").expect("Some");
        assert_eq!(row.affinity_score, 42);
    }
}
