//! Thread-safe handle to a single engine.
//!
//! Every mutating operation holds the write lock for its whole
//! read-then-write sequence, so two racing draws can never both win and no
//! counter update is lost. Reads share the lock. Nothing inside the lock does
//! I/O; text rendering happens on the returned values after release.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::draw::DrawKind;
use crate::engine::{CycleState, GameEngine};
use crate::error::{DrawError, EngineResult, Ineligibility};
use crate::ledger::{ParticipantId, ParticipantRecord};
use crate::report::{Announcement, DrawOutcome, Reply, Summary};
use crate::schedule::WeeklySchedule;

/// Cloneable handle shared by request handlers and the periodic trigger.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<GameEngine>>,
}

impl SharedEngine {
    /// Take ownership of an engine.
    pub fn new(engine: GameEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// See [`GameEngine::draw`].
    pub fn draw(
        &self,
        participant: &ParticipantId,
        display_name: &str,
        kind: DrawKind,
    ) -> Result<DrawOutcome, DrawError> {
        self.inner.write().draw(participant, display_name, kind)
    }

    /// Draw and render the public message or private refusal.
    pub fn draw_reply(&self, participant: &ParticipantId, display_name: &str, kind: DrawKind) -> Reply {
        let result = self.draw(participant, display_name, kind);
        Reply::from(result)
    }

    /// See [`GameEngine::advance_cycle`].
    pub fn advance_cycle(&self) -> Announcement {
        self.inner.write().advance_cycle()
    }

    /// See [`GameEngine::advance_cycle_to`].
    pub fn advance_cycle_to(&self, target: &str) -> EngineResult<Announcement> {
        self.inner.write().advance_cycle_to(target)
    }

    /// See [`GameEngine::advance_if_due`].
    pub fn advance_if_due(&self, schedule: &mut WeeklySchedule) -> Option<Announcement> {
        self.inner.write().advance_if_due(schedule)
    }

    /// See [`GameEngine::check_eligibility`].
    pub fn check_eligibility(
        &self,
        participant: &ParticipantId,
        kind: DrawKind,
    ) -> Result<(), Ineligibility> {
        self.inner.read().check_eligibility(participant, kind)
    }

    /// See [`GameEngine::summary`].
    pub fn summary(&self) -> Summary {
        self.inner.read().summary()
    }

    /// See [`GameEngine::recommend_channel`].
    pub fn recommend_channel(&self) -> Option<u32> {
        self.inner.write().recommend_channel()
    }

    /// Copy of the current cycle state.
    pub fn cycle(&self) -> CycleState {
        self.inner.read().cycle().clone()
    }

    /// Copy of one participant's record.
    pub fn record(&self, participant: &ParticipantId) -> Option<ParticipantRecord> {
        self.inner.read().ledger().get(participant).cloned()
    }

    /// Run `f` with shared access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&GameEngine) -> R) -> R {
        f(&self.inner.read())
    }
}

impl From<GameEngine> for SharedEngine {
    fn from(engine: GameEngine) -> Self {
        Self::new(engine)
    }
}
