//! The game-state engine.
//!
//! `GameEngine` owns the effect catalog, the current cycle, and the
//! participant ledger. It is a plain single-threaded value; wrap it in a
//! [`SharedEngine`](crate::shared::SharedEngine) to reach it from concurrent
//! request handlers.
//!
//! A cycle moves through three states: no target yet, active, and concluded
//! once someone draws the target. Advancing always starts a fresh active
//! cycle. Draws are only accepted while a cycle is active.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calendar::LocalCalendar;
use crate::catalog::EffectCatalog;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::draw::{DrawKind, roll};
use crate::error::{DrawError, EngineError, EngineResult, Ineligibility};
use crate::ledger::{Ledger, ParticipantId, ParticipantRecord};
use crate::report::{Announcement, DrawOutcome, Summary, SummaryRow, WinDetails};
use crate::schedule::WeeklySchedule;

/// Where a cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
    /// No cycle has been started.
    Uninitialized,
    /// A target is live and nobody has drawn it yet.
    Active,
    /// The target has been drawn; draws are closed until the next advance.
    Concluded,
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Active => write!(f, "active"),
            Self::Concluded => write!(f, "concluded"),
        }
    }
}

/// Metadata of the current cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
    /// The hidden target, unset before the first advance.
    pub current_target: Option<String>,
    /// Incremented once per advance.
    pub cycle_index: u64,
    /// Whether the target has been drawn this cycle.
    pub winner_found: bool,
    /// When the cycle last advanced.
    pub last_reset_time: Option<DateTime<Utc>>,
}

impl CycleState {
    /// The cycle's phase.
    pub fn phase(&self) -> CyclePhase {
        match (&self.current_target, self.winner_found) {
            (None, _) => CyclePhase::Uninitialized,
            (Some(_), false) => CyclePhase::Active,
            (Some(_), true) => CyclePhase::Concluded,
        }
    }
}

/// The Oracle draw game.
pub struct GameEngine {
    catalog: EffectCatalog,
    config: EngineConfig,
    calendar: LocalCalendar,
    cycle: CycleState,
    ledger: Ledger,
    rng: StdRng,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("catalog", &self.catalog.len())
            .field("cycle", &self.cycle)
            .field("participants", &self.ledger.len())
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Create an engine reading wall-clock time.
    pub fn new(catalog: EffectCatalog, config: EngineConfig) -> EngineResult<Self> {
        Self::with_clock(catalog, config, SystemClock)
    }

    /// Create an engine reading time from `clock`.
    pub fn with_clock(
        catalog: EffectCatalog,
        config: EngineConfig,
        clock: impl Clock + 'static,
    ) -> EngineResult<Self> {
        if catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        let calendar = LocalCalendar::new(config.utc_offset_hours)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            catalog,
            config,
            calendar,
            cycle: CycleState::default(),
            ledger: Ledger::new(),
            rng,
            clock: Box::new(clock),
        })
    }

    /// The effect catalog.
    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The local calendar used for day and week boundaries.
    pub fn calendar(&self) -> &LocalCalendar {
        &self.calendar
    }

    /// The current cycle.
    pub fn cycle(&self) -> &CycleState {
        &self.cycle
    }

    /// The participant ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Current instant according to the engine's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Start a new cycle with a target picked uniformly from the catalog.
    pub fn advance_cycle(&mut self) -> Announcement {
        let target = self.catalog.random(&mut self.rng).id.clone();
        self.start_cycle(target)
    }

    /// Start a new cycle with a chosen target.
    pub fn advance_cycle_to(&mut self, target: &str) -> EngineResult<Announcement> {
        if !self.catalog.contains(target) {
            return Err(EngineError::UnknownEffect(target.to_string()));
        }
        Ok(self.start_cycle(target.to_string()))
    }

    /// Advance if `schedule` says the weekly window has opened.
    pub fn advance_if_due(&mut self, schedule: &mut WeeklySchedule) -> Option<Announcement> {
        let local = self.calendar.local(self.clock.now());
        schedule.poll(local).then(|| self.advance_cycle())
    }

    fn start_cycle(&mut self, target: String) -> Announcement {
        let now = self.clock.now();
        self.cycle.cycle_index += 1;
        self.cycle.winner_found = false;
        self.cycle.last_reset_time = Some(now);
        self.cycle.current_target = Some(target.clone());
        self.ledger.reset_cycle();

        info!(
            cycle = self.cycle.cycle_index,
            oracle = %target,
            participants = self.ledger.len(),
            "oracle cycle advanced"
        );

        let description = self
            .catalog
            .get(&target)
            .map(|e| e.description.clone())
            .unwrap_or_default();
        Announcement {
            cycle_index: self.cycle.cycle_index,
            target,
            description,
            week: self.calendar.week_label(now),
        }
    }

    /// Check whether `participant` may make a draw of `kind` right now.
    ///
    /// Unknown participants are judged as if they had a fresh record.
    pub fn check_eligibility(
        &self,
        participant: &ParticipantId,
        kind: DrawKind,
    ) -> Result<(), Ineligibility> {
        let today = self.calendar.today(self.clock.now());
        match self.ledger.get(participant) {
            Some(record) => record.check(kind, today),
            None => ParticipantRecord::default().check(kind, today),
        }
    }

    /// Attempt a draw.
    ///
    /// Fails without touching any state if no cycle is active or the
    /// participant is not eligible.
    pub fn draw(
        &mut self,
        participant: &ParticipantId,
        display_name: &str,
        kind: DrawKind,
    ) -> Result<DrawOutcome, DrawError> {
        let Some(target) = self.cycle.current_target.clone() else {
            debug!(%participant, %kind, "draw refused: no cycle");
            return Err(DrawError::NotInitialized);
        };
        if self.cycle.winner_found {
            debug!(%participant, %kind, "draw refused: cycle concluded");
            return Err(DrawError::Concluded);
        }
        if let Err(reason) = self.check_eligibility(participant, kind) {
            debug!(%participant, %kind, %reason, "draw refused: ineligible");
            return Err(reason.into());
        }

        let result = roll(&self.catalog, &target, kind, &mut self.rng);
        let today = self.calendar.today(self.clock.now());
        let cycle_index = self.cycle.cycle_index;
        let record = self.ledger.entry(participant, display_name);
        record.record_draw(kind, today);

        debug!(%participant, %kind, result = %result, attempts = record.attempts, "draw");

        let reward = if result == target && !self.cycle.winner_found {
            self.cycle.winner_found = true;
            Some(record.record_win(
                cycle_index,
                self.config.win_reward,
                self.config.streak_bonus,
                self.config.streak_threshold,
            ))
        } else {
            None
        };

        let win = reward.map(|reward| {
            info!(
                %participant,
                cycle = cycle_index,
                oracle = %target,
                reward = reward.total(),
                streak = reward.streak,
                "oracle cycle won"
            );
            WinDetails {
                reward,
                summary: self.summary(),
            }
        });

        Ok(DrawOutcome {
            participant: participant.clone(),
            display_name: display_name.to_string(),
            kind,
            result,
            win,
        })
    }

    /// Report on the current cycle and every known participant.
    pub fn summary(&self) -> Summary {
        Summary {
            cycle_index: self.cycle.cycle_index,
            target: self.cycle.current_target.clone(),
            week: self.calendar.week_label(self.clock.now()),
            winner_found: self.cycle.winner_found,
            rows: self
                .ledger
                .iter()
                .map(|(id, r)| SummaryRow {
                    participant: id.clone(),
                    display_name: r.display_name.clone(),
                    attempts: r.attempts,
                    bonus_tokens_spent: r.bonus_tokens_spent,
                    reward_balance: r.reward_balance,
                })
                .collect(),
        }
    }

    /// Recommend a channel from the configured pool.
    pub fn recommend_channel(&mut self) -> Option<u32> {
        self.config.channels.pick(&mut self.rng)
    }
}
