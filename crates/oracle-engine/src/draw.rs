//! Draw kinds and the randomized draw.
//!
//! A draw picks uniformly from a pool built out of the catalog. A boosted
//! draw adds one extra copy of the live target to its pool, giving the target
//! 2 chances in N+1. A bonus draw rolls twice: once against its own pool and
//! again against a freshly rebuilt standard pool, and only the second value
//! counts.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::catalog::EffectCatalog;

/// The three kinds of draw a participant can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawKind {
    /// One draw per local day, catalog odds.
    Standard,
    /// Replaces the daily draw once per cycle, doubled odds on the target.
    Boosted,
    /// One extra draw unlocked by each standard or boosted draw.
    Bonus,
}

impl DrawKind {
    /// All kinds, in the order they are usually offered.
    pub const ALL: [DrawKind; 3] = [DrawKind::Standard, DrawKind::Boosted, DrawKind::Bonus];

    /// Whether this kind counts against the once-per-day limit.
    pub fn is_daily(self) -> bool {
        matches!(self, Self::Standard | Self::Boosted)
    }

    /// Parse a kind name (case-insensitive, with a few aliases).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "normal" | "draw" => Some(Self::Standard),
            "boosted" | "boost" => Some(Self::Boosted),
            "bonus" | "sacred" => Some(Self::Bonus),
            _ => None,
        }
    }
}

impl std::fmt::Display for DrawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Boosted => write!(f, "boosted"),
            Self::Bonus => write!(f, "bonus"),
        }
    }
}

/// Build the selection pool for a draw of `kind` against `target`.
pub fn build_pool<'a>(catalog: &'a EffectCatalog, target: &'a str, kind: DrawKind) -> Vec<&'a str> {
    let mut pool: Vec<&str> = catalog.ids().collect();
    if kind == DrawKind::Boosted {
        pool.push(target);
    }
    pool
}

fn pick<'a>(pool: &[&'a str], rng: &mut StdRng) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

/// Perform the randomized part of a draw and return the drawn identifier.
pub fn roll(catalog: &EffectCatalog, target: &str, kind: DrawKind, rng: &mut StdRng) -> String {
    let pool = build_pool(catalog, target, kind);
    let first = pick(&pool, rng);
    if kind != DrawKind::Bonus {
        return first.to_string();
    }

    let reroll_pool = build_pool(catalog, target, DrawKind::Standard);
    pick(&reroll_pool, rng).to_string()
}
