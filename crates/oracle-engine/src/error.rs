//! Error types for the oracle draw engine.

use thiserror::Error;

use crate::draw::DrawKind;

/// Result type for engine construction and operator commands.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while building an engine or applying operator overrides.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The effect catalog has no entries.
    #[error("effect catalog is empty")]
    EmptyCatalog,

    /// The same effect identifier appears twice in a catalog.
    #[error("duplicate effect in catalog: {0}")]
    DuplicateEffect(String),

    /// The requested effect identifier is not in the catalog.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// The configured UTC offset is not a valid fixed offset.
    #[error("invalid UTC offset: {0} hours")]
    InvalidOffset(i32),

    /// A catalog document could not be parsed.
    #[error("invalid catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),
}

/// Why a draw request was refused.
///
/// Every variant is recoverable: a refused draw leaves the engine untouched
/// and the participant may try again later or with another draw kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// No cycle has been started yet.
    #[error("this week's oracle has not been set yet; ask an operator if this persists")]
    NotInitialized,

    /// The current cycle already has a winner.
    #[error("this week's oracle game has already ended")]
    Concluded,

    /// The participant is not allowed to perform this kind of draw right now.
    #[error(transparent)]
    Ineligible(#[from] Ineligibility),
}

/// A specific eligibility rule that blocked a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    /// A standard or boosted draw was already made today.
    #[error("you have already drawn today (kind: {0})")]
    AlreadyDrawnToday(DrawKind),

    /// The boosted draw for this cycle has been spent.
    #[error("you have already used your boosted draw this week")]
    BoostUsedThisCycle,

    /// No standard or boosted draw is waiting to unlock a bonus draw.
    #[error("a bonus draw is available once, right after a standard or boosted draw")]
    BonusNotUnlocked,
}
