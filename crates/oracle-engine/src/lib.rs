//! Game-state engine for the weekly Oracle draw.
//!
//! Each week a hidden target ("the oracle") is picked from an effect catalog.
//! Participants make standard, boosted and bonus draws against the catalog
//! odds; the first draw that matches the target ends the week and earns a
//! reward. The engine enforces draw eligibility, detects winners, pays
//! streak bonuses and keeps a per-participant ledger.

pub mod calendar;
pub mod catalog;
pub mod channel;
pub mod clock;
pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod report;
pub mod schedule;
pub mod shared;

pub use calendar::{LocalCalendar, WeekLabel};
pub use catalog::{Effect, EffectCatalog};
pub use channel::ChannelPool;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use draw::DrawKind;
pub use engine::{CyclePhase, CycleState, GameEngine};
pub use error::{DrawError, EngineError, EngineResult, Ineligibility};
pub use ledger::{Ledger, ParticipantId, ParticipantRecord, WinReward};
pub use report::{Announcement, DrawOutcome, Reply, Summary, SummaryRow, WinDetails};
pub use schedule::WeeklySchedule;
pub use shared::SharedEngine;
