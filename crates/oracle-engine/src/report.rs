//! Values returned by engine operations and their text rendering.
//!
//! Operations return plain data so that callers can release the engine lock
//! before formatting. `Display` produces the chat-ready text.

use serde::{Deserialize, Serialize};

use crate::calendar::WeekLabel;
use crate::draw::DrawKind;
use crate::error::DrawError;
use crate::ledger::{ParticipantId, WinReward};

/// Announcement produced when a new cycle starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Index of the cycle that just started.
    pub cycle_index: u64,
    /// The new hidden target.
    pub target: String,
    /// Benefit granted by the target.
    pub description: String,
    /// Month/week label at the time of the advance.
    pub week: WeekLabel,
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "📅 {} oracle\n- **{}**", self.week, self.target)?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}

/// Result of a successful draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    /// Who drew.
    pub participant: ParticipantId,
    /// Name to show in the public message.
    pub display_name: String,
    /// Kind of draw performed.
    pub kind: DrawKind,
    /// The drawn identifier.
    pub result: String,
    /// Present when this draw won the cycle.
    pub win: Option<WinDetails>,
}

/// What a winning draw earned, plus the closing summary of the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinDetails {
    /// Rewards granted by this win.
    pub reward: WinReward,
    /// Cycle summary taken right after the win.
    pub summary: Summary,
}

impl DrawOutcome {
    /// Whether this draw won the cycle.
    pub fn is_win(&self) -> bool {
        self.win.is_some()
    }
}

impl std::fmt::Display for DrawOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "🔮 **{}** drew the oracle\n- **{}**", self.display_name, self.result)?;
        if let Some(win) = &self.win {
            if let Some(bonus) = win.reward.streak_bonus {
                write!(
                    f,
                    "\n🎉 **{}**, {} weeks in a row! {bonus} bonus rewards granted!",
                    self.display_name, win.reward.streak
                )?;
            }
            write!(f, "\n\n✨ This week's game is over.\n\n{}", win.summary)?;
        }
        Ok(())
    }
}

/// One participant's line in a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Participant identifier.
    pub participant: ParticipantId,
    /// Display name.
    pub display_name: String,
    /// Draws made this cycle.
    pub attempts: u32,
    /// Bonus tokens spent (non-positive).
    pub bonus_tokens_spent: i64,
    /// Rewards granted this cycle.
    pub reward_balance: i64,
}

impl SummaryRow {
    /// Rewards net of bonus tokens spent.
    pub fn net(&self) -> i64 {
        self.reward_balance + self.bonus_tokens_spent
    }
}

impl std::fmt::Display for SummaryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "- {} ({}) | attempts: {}, bonus used: {}, rewarded: {} // 💰 net: {:+}",
            self.display_name,
            self.participant,
            self.attempts,
            self.bonus_tokens_spent,
            self.reward_balance,
            self.net()
        )
    }
}

/// Snapshot of the current cycle for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Index of the current cycle (0 before the first advance).
    pub cycle_index: u64,
    /// Current hidden target, if a cycle has started.
    pub target: Option<String>,
    /// Month/week label at the time of the snapshot.
    pub week: WeekLabel,
    /// Whether the cycle already has a winner.
    pub winner_found: bool,
    /// One row per known participant, in first-seen order.
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    /// Find a participant's row.
    pub fn row(&self, participant: &ParticipantId) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| &r.participant == participant)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let target = self.target.as_deref().unwrap_or("(not set)");
        write!(f, "📅 {} oracle\n- **{target}**\n\n**Participation summary**", self.week)?;
        for row in &self.rows {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

/// A rendered response and who should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Broadcast to everyone.
    Public(String),
    /// Shown only to the requester.
    Private(String),
}

impl Reply {
    /// The response text.
    pub fn text(&self) -> &str {
        match self {
            Self::Public(text) | Self::Private(text) => text,
        }
    }

    /// Whether the response is meant for everyone.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public(_))
    }
}

impl From<Result<DrawOutcome, DrawError>> for Reply {
    fn from(result: Result<DrawOutcome, DrawError>) -> Self {
        match result {
            Ok(outcome) => Self::Public(outcome.to_string()),
            Err(err) => Self::Private(err.to_string()),
        }
    }
}
