//! The effect catalog.
//!
//! Each cycle's hidden target and every draw result are identifiers taken
//! from this catalog. The built-in catalog holds the 22 major arcana with the
//! in-game benefit each one grants while it is the week's oracle.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Built-in effects: `(identifier, benefit)` pairs (22 entries).
pub const DEFAULT_EFFECTS: &[(&str, &str)] = &[
    ("Strength", "Max damage +35"),
    ("The Emperor", "Critical damage +2%"),
    ("The Empress", "Harvest Song duration +300s"),
    ("The Sun", "Vivace duration +300s"),
    ("Justice", "Max HP +1000"),
    ("Judgement", "Gathering speed +20"),
    ("The Hierophant", "Fuse chance +10%"),
    ("The High Priestess", "Movement speed while trading +20"),
    ("The Lovers", "Music buff effect +2"),
    ("The Chariot", "Battlefield Overture duration +300s"),
    ("The Moon", "Max stamina +1000"),
    ("The Tower", "Alchemy damage +15"),
    ("The Hanged Man", "Combat EXP x2"),
    ("The World", "Piercing +1"),
    ("Temperance", "Movement speed +40"),
    ("The Hermit", "Defense and magic defense +20"),
    ("The Magician", "Magic attack +35"),
    ("Death", "Part-time job successes x2"),
    ("The Fool", "Exploration EXP x2"),
    ("The Devil", "Max critical chance +1"),
    ("Wheel of Fortune", "Production success rate +5%"),
    ("The Star", "Max mana +1000"),
];

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Unique identifier, also the text shown when the effect is drawn.
    pub id: String,
    /// Human-readable description of the in-game benefit.
    pub description: String,
}

impl Effect {
    /// Create an effect from an identifier and description.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// An immutable, non-empty, ordered set of effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Effect>", into = "Vec<Effect>")]
pub struct EffectCatalog {
    effects: Vec<Effect>,
}

impl EffectCatalog {
    /// Build a catalog, rejecting empty lists and duplicate identifiers.
    pub fn new(effects: Vec<Effect>) -> EngineResult<Self> {
        if effects.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for effect in &effects {
            if !seen.insert(effect.id.as_str()) {
                return Err(EngineError::DuplicateEffect(effect.id.clone()));
            }
        }
        Ok(Self { effects })
    }

    /// The built-in 22-entry catalog.
    pub fn builtin() -> Self {
        Self {
            effects: DEFAULT_EFFECTS
                .iter()
                .map(|(id, desc)| Effect::new(*id, *desc))
                .collect(),
        }
    }

    /// Build a catalog of effects with empty descriptions.
    pub fn from_ids<I, S>(ids: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(|id| Effect::new(id, "")).collect())
    }

    /// Parse a JSON array of `{ "id": ..., "description": ... }` objects.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let effects: Vec<Effect> = serde_json::from_str(json)?;
        Self::new(effects)
    }

    /// All effects in declaration order.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Identifiers in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().map(|e| e.id.as_str())
    }

    /// Look up an effect by identifier.
    pub fn get(&self, id: &str) -> Option<&Effect> {
        self.effects.iter().find(|e| e.id == id)
    }

    /// Whether the identifier is in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of effects (always at least one).
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Pick an effect uniformly at random.
    pub fn random<'a>(&'a self, rng: &mut StdRng) -> &'a Effect {
        &self.effects[rng.random_range(0..self.effects.len())]
    }
}

impl Default for EffectCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<Effect>> for EffectCatalog {
    type Error = EngineError;

    fn try_from(effects: Vec<Effect>) -> EngineResult<Self> {
        Self::new(effects)
    }
}

impl From<EffectCatalog> for Vec<Effect> {
    fn from(catalog: EffectCatalog) -> Self {
        catalog.effects
    }
}
