//! The participant ledger.

pub mod record;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use record::{ParticipantRecord, WinReward};

/// Opaque, unique identifier of a participant (a chat user id, for example).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// All participant records, in the order participants first appeared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    records: HashMap<ParticipantId, ParticipantRecord>,
    order: Vec<ParticipantId>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a participant.
    pub fn get(&self, id: &ParticipantId) -> Option<&ParticipantRecord> {
        self.records.get(id)
    }

    /// Fetch a participant's record, creating it on first reference.
    ///
    /// The stored display name is refreshed to `display_name`.
    pub fn entry(&mut self, id: &ParticipantId, display_name: &str) -> &mut ParticipantRecord {
        if !self.records.contains_key(id) {
            self.order.push(id.clone());
        }
        let record = self
            .records
            .entry(id.clone())
            .or_insert_with(|| ParticipantRecord::new(display_name));
        if record.display_name != display_name {
            record.display_name = display_name.to_string();
        }
        record
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantRecord)> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|r| (id, r)))
    }

    /// Clear cycle-scoped fields on every record.
    pub fn reset_cycle(&mut self) {
        for record in self.records.values_mut() {
            record.reset_cycle();
        }
    }

    /// Number of known participants.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no participant has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
