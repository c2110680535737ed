//! # Character
//!
//! DnD Beyond characters and dice rolls against them.
//!
//! - [`DdbClient`]: [`CharacterRepository`] over the public DnD Beyond character service; turns the
//!   raw sheet (stats, class levels, race/class/background/item/feat modifiers) into a [`Character`].
//! - [`CachedCharacterService`]: [`CharacterService`] that puts a result cache in front of a
//!   repository and maps repository errors to [`CharacterError`].
//! - [`RollService`]: ability checks, saving throws, skill checks, initiative and death saves,
//!   with an injectable [`DiceRoller`].

mod ddb;
mod error;
mod models;
mod roll;
mod service;

pub use ddb::{DdbClient, DDB_API_BASE};
pub use error::{CharacterError, RepositoryError};
pub use models::{Ability, Character, RollResult, Skill};
pub use roll::{ability_modifier, DiceRoller, RandomDice, RollKind, RollService};
pub use service::CachedCharacterService;

use async_trait::async_trait;

/// Source of characters by id.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    async fn get(&self, id: i64) -> Result<Character, RepositoryError>;
}

/// Character lookup as seen by bot handlers.
#[async_trait]
pub trait CharacterService: Send + Sync {
    async fn get(&self, id: i64) -> Result<Character, CharacterError>;

    /// Drops any cached copy of the character so the next `get` fetches it again.
    async fn forget(&self, id: i64);
}
