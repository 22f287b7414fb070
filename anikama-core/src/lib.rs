//! # Anikama Core Library
//!
//! Relationship core for the Anikama companion app.
//!
//! Every (user, companion) pair carries a bounded affinity score and a
//! derived mood. The [`engine`] turns one interaction into the next state:
//!
//! - **Delta**: personality × reaction, adjusted by the mood of the story
//!   the user was looking at
//! - **Score**: prior score plus delta, clamped to [-100, 100]
//! - **Mood**: an ordered rule list over score and time since last contact
//! - **Toast**: a short message for the client (see [`message`])
//!
//! The engine is pure. Reading and writing relationships goes through the
//! [`store::RelationshipStore`] trait; [`persistence::SqliteStore`] is the
//! bundled implementation and [`interaction::InteractionService`] wires the
//! two together the way a request handler would.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod message;
pub mod persistence;
pub mod progression;
pub mod store;
pub mod story;
pub mod telemetry;
pub mod types;

pub use config::AnikamaConfig;
pub use error::AffinityError;
pub use interaction::InteractionService;
pub use persistence::SqliteStore;
pub use store::RelationshipStore;
pub use types::*;
