//! Task ordering within a column using fractional indexing.
//!
//! Ranks are strings over a base-62 alphabet that sort lexicographically in
//! display order. A new rank can always be generated between two existing ones,
//! so moving a task never rewrites the ranks of its neighbours.
//!
//! Well-formed ranks are non-empty, use only [`DIGITS`], and never end in the
//! smallest digit `0`; that last rule guarantees there is always room below.

use serde::{Deserialize, Serialize};

/// Rank alphabet in ascending byte order.
const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Ordering key of a task inside its column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(String);

impl Rank {
    /// Rank for the first task of an empty column
    pub fn initial() -> Self {
        Self::from_bytes(midpoint(&[], None))
    }

    /// Rank after all existing ranks.
    ///
    /// A malformed `last` is extended instead; any string sorts below its own
    /// extensions.
    pub fn after(last: &Rank) -> Self {
        if !last.is_well_formed() {
            return Self(format!("{}{}", last.0, Self::initial().0));
        }
        Self::from_bytes(midpoint(last.0.as_bytes(), None))
    }

    /// Rank before all existing ranks
    pub fn before(first: &Rank) -> Self {
        if !first.is_well_formed() {
            return Self::initial();
        }
        Self::from_bytes(midpoint(&[], Some(first.0.as_bytes())))
    }

    /// Rank strictly between two ranks.
    ///
    /// Out-of-order or malformed bounds cannot bracket anything; the result then
    /// falls back to a rank after `before`.
    pub fn between(before: &Rank, after: &Rank) -> Self {
        if before >= after || !before.is_well_formed() || !after.is_well_formed() {
            return Self::after(before);
        }
        Self::from_bytes(midpoint(before.0.as_bytes(), Some(after.0.as_bytes())))
    }

    /// Rank for a slot bounded by optional neighbours
    pub fn for_slot(prev: Option<&Rank>, next: Option<&Rank>) -> Self {
        match (prev, next) {
            (None, None) => Self::initial(),
            (Some(prev), None) => Self::after(prev),
            (None, Some(next)) => Self::before(next),
            (Some(prev), Some(next)) => Self::between(prev, next),
        }
    }

    /// `count` strictly increasing ranks, starting from [`Rank::initial`]
    pub fn sequence(count: usize) -> Vec<Rank> {
        let mut ranks: Vec<Rank> = Vec::with_capacity(count);
        for _ in 0..count {
            let next = match ranks.last() {
                Some(last) => Self::after(last),
                None => Self::initial(),
            };
            ranks.push(next);
        }
        ranks
    }

    /// Wrap a rank string received from the server
    pub fn from_string(rank: impl Into<String>) -> Self {
        Self(rank.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this rank follows the alphabet and trailing-digit rules
    pub fn is_well_formed(&self) -> bool {
        let bytes = self.0.as_bytes();
        !bytes.is_empty()
            && bytes.iter().all(|b| DIGITS.contains(b))
            && bytes.last() != Some(&DIGITS[0])
    }

    fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes.into_iter().map(char::from).collect())
    }
}

impl Default for Rank {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn digit_value(byte: u8) -> usize {
    DIGITS.iter().position(|&d| d == byte).unwrap_or(0)
}

/// Key strictly between `lower` and `upper`; an absent upper bound is +infinity
/// and an empty lower bound is zero.
fn midpoint(lower: &[u8], upper: Option<&[u8]>) -> Vec<u8> {
    let upper = upper.filter(|u| !u.is_empty());

    if let Some(upper) = upper {
        // Shared prefix, reading missing lower digits as zero
        let mut n = 0;
        while n < upper.len() && lower.get(n).copied().unwrap_or(DIGITS[0]) == upper[n] {
            n += 1;
        }
        if n > 0 {
            let rest = lower.get(n..).unwrap_or(&[]);
            let mut out = upper[..n].to_vec();
            out.extend(midpoint(rest, Some(&upper[n..])));
            return out;
        }
    }

    let lo = lower.first().map(|&b| digit_value(b)).unwrap_or(0);
    let hi = upper.map(|u| digit_value(u[0])).unwrap_or(DIGITS.len());

    if hi > lo + 1 {
        vec![DIGITS[(lo + hi + 1) / 2]]
    } else if let Some(upper) = upper.filter(|u| u.len() > 1) {
        vec![upper[0]]
    } else {
        let mut out = vec![DIGITS[lo]];
        out.extend(midpoint(lower.get(1..).unwrap_or(&[]), None));
        out
    }
}
