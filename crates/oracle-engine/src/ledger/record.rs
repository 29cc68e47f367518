//! Per-participant bookkeeping and eligibility rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::draw::DrawKind;
use crate::error::Ineligibility;

/// Everything the engine remembers about one participant.
///
/// Draw usage and balances are scoped to the current cycle and cleared on
/// every advance; the streak fields carry over between cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Name shown in summaries (the most recent one seen).
    pub display_name: String,
    /// Local date of the last standard or boosted draw.
    pub last_draw_date: Option<NaiveDate>,
    /// Kind of the last standard or boosted draw.
    pub last_draw_kind: Option<DrawKind>,
    /// Whether the boosted draw has been used this cycle.
    pub week_boost_used: bool,
    /// Whether a bonus draw is currently unlocked.
    pub eligible_for_bonus_draw: bool,
    /// Draws of any kind made this cycle.
    pub attempts: u32,
    /// Bonus draws spent this cycle, as a non-positive running total.
    pub bonus_tokens_spent: i64,
    /// Reward units granted this cycle.
    pub reward_balance: i64,
    /// Cycles won back to back, reset when a streak pays out.
    pub consecutive_wins: u32,
    /// Cycle index of the most recent win.
    pub last_win_cycle_index: Option<u64>,
}

/// Rewards granted for a single winning draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinReward {
    /// Base reward for winning the cycle.
    pub reward: i64,
    /// Streak bonus, if this win completed a streak.
    pub streak_bonus: Option<i64>,
    /// Streak length counted by this win, before any payout reset.
    pub streak: u32,
}

impl WinReward {
    /// Base reward plus any streak bonus.
    pub fn total(&self) -> i64 {
        self.reward + self.streak_bonus.unwrap_or(0)
    }
}

impl ParticipantRecord {
    /// Create an empty record for a participant.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Check whether a draw of `kind` is allowed on local date `today`.
    pub fn check(&self, kind: DrawKind, today: NaiveDate) -> Result<(), Ineligibility> {
        match kind {
            DrawKind::Standard | DrawKind::Boosted => {
                if self.last_draw_date == Some(today) {
                    let used = self.last_draw_kind.unwrap_or(DrawKind::Standard);
                    return Err(Ineligibility::AlreadyDrawnToday(used));
                }
                if kind == DrawKind::Boosted && self.week_boost_used {
                    return Err(Ineligibility::BoostUsedThisCycle);
                }
            }
            DrawKind::Bonus => {
                if !self.eligible_for_bonus_draw {
                    return Err(Ineligibility::BonusNotUnlocked);
                }
            }
        }
        Ok(())
    }

    /// Record a successful draw of `kind` made on `today`.
    pub fn record_draw(&mut self, kind: DrawKind, today: NaiveDate) {
        self.attempts += 1;
        match kind {
            DrawKind::Standard | DrawKind::Boosted => {
                self.last_draw_date = Some(today);
                self.last_draw_kind = Some(kind);
                if kind == DrawKind::Boosted {
                    self.week_boost_used = true;
                }
                self.eligible_for_bonus_draw = true;
            }
            DrawKind::Bonus => {
                self.eligible_for_bonus_draw = false;
                self.bonus_tokens_spent -= 1;
            }
        }
    }

    /// Credit a cycle win and advance the streak.
    ///
    /// A win directly after a win in the previous cycle extends the streak;
    /// any other win starts a new one. Reaching `threshold` pays `bonus` and
    /// resets the streak to zero.
    pub fn record_win(&mut self, cycle_index: u64, reward: i64, bonus: i64, threshold: u32) -> WinReward {
        self.reward_balance += reward;

        let previous = cycle_index.checked_sub(1);
        if previous.is_some() && self.last_win_cycle_index == previous {
            self.consecutive_wins += 1;
        } else {
            self.consecutive_wins = 1;
        }
        self.last_win_cycle_index = Some(cycle_index);
        let streak = self.consecutive_wins;

        let streak_bonus = if self.consecutive_wins >= threshold {
            self.reward_balance += bonus;
            self.consecutive_wins = 0;
            Some(bonus)
        } else {
            None
        };

        WinReward {
            reward,
            streak_bonus,
            streak,
        }
    }

    /// Clear everything scoped to a single cycle. Streak fields survive.
    pub fn reset_cycle(&mut self) {
        self.last_draw_date = None;
        self.last_draw_kind = None;
        self.week_boost_used = false;
        self.eligible_for_bonus_draw = false;
        self.attempts = 0;
        self.bonus_tokens_spent = 0;
        self.reward_balance = 0;
    }

    /// Rewards earned net of bonus tokens spent.
    pub fn net(&self) -> i64 {
        self.reward_balance + self.bonus_tokens_spent
    }
}
